pub mod config;
pub mod error;
pub mod memory;

pub use config::{
  Config, ConfigSource, DedupConfig, INSIGHT_KEYWORDS, LOW_SIGNAL_PHRASES, LoggingConfig, PROFILE_REFERENCE_TOKENS, RelevanceConfig,
};
pub use error::{Error, Result};
pub use memory::{DEFAULT_IMPORTANCE, MemoryKind, importance_or_default};
