//! CLI command implementations

mod config;
mod dedup;
mod inspect;
mod relevance;

pub use config::{cmd_config_init, cmd_config_show};
pub use dedup::cmd_dedup;
pub use inspect::{cmd_normalize, cmd_signature, cmd_tokens};
pub use relevance::{cmd_gate, cmd_relevant};

/// Print a value as pretty JSON
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
