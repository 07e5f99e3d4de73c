pub mod dedup;
pub mod gate;
pub mod normalize;
pub mod relevance;
pub mod signature;

pub use dedup::{DuplicateChecker, DuplicateMatch, are_near_duplicate_memories, jaccard};
pub use gate::{GateDecision, MemoryGate};
pub use normalize::{is_meaningful, normalize_memory_text, tokenize, unique_token_set};
pub use relevance::{
  LOW_SIGNAL_RULES, LowSignalRule, Rejection, RelevanceFilter, is_likely_relevant_insight,
  is_likely_relevant_memory, is_likely_relevant_profile_fact, matching_low_signal_rule,
};
pub use signature::{declared_name, is_name_declaration, memory_signature, signature_of_normalized};
