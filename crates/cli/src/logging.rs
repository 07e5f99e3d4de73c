//! Logging setup for CLI commands

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, LevelFilter};

/// Parse log level from config string
fn parse_log_level(level: &str) -> Option<tracing::Level> {
  match level.to_lowercase().as_str() {
    "off" => None,
    "error" => Some(tracing::Level::ERROR),
    "warn" => Some(tracing::Level::WARN),
    "info" => Some(tracing::Level::INFO),
    "debug" => Some(tracing::Level::DEBUG),
    "trace" => Some(tracing::Level::TRACE),
    _ => Some(tracing::Level::WARN),
  }
}

/// Initialize console logging on stderr, leaving stdout for command output.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_cli_logging(level: &str) {
  let directive: Directive = match parse_log_level(level) {
    Some(level) => level.into(),
    None => LevelFilter::OFF.into(),
  };

  let env_filter = EnvFilter::builder().with_default_directive(directive).from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(true)
    .with_writer(std::io::stderr)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_level() {
    assert_eq!(parse_log_level("off"), None);
    assert_eq!(parse_log_level("DEBUG"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_log_level("nonsense"), Some(tracing::Level::WARN));
  }
}
