//! Configuration for the Waypoint memory filter with per-project overrides.
//!
//! Config priority: project-relative (.waypoint/memory.toml) > user (~/.config/waypoint/config.toml) > defaults.
//!
//! The default tables below are the canonical rule data. Externalized copies
//! may extend or shrink them, but an absent section always means "use these".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

// ============================================================================
// Default Rule Tables
// ============================================================================

/// Whole-text acknowledgements that never carry a memory
pub const LOW_SIGNAL_PHRASES: &[&str] = &[
  "ok",
  "okay",
  "cool",
  "nice",
  "great",
  "sounds good",
  "thanks",
  "thank you",
  "got it",
];

/// Person references that mark a statement as being about someone
pub const PROFILE_REFERENCE_TOKENS: &[&str] = &["i", "my", "me", "user", "they", "their"];

/// Keywords signalling decision, obstacle or preference content
pub const INSIGHT_KEYWORDS: &[&str] = &[
  "decided",
  "decision",
  "blocked",
  "blocker",
  "prefers",
  "preference",
  "goal",
  "constraint",
  "risk",
  "stuck",
  "problem",
];

fn owned(table: &[&str]) -> Vec<String> {
  table.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Relevance Configuration
// ============================================================================

/// Thresholds and tables for the relevance classifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
  /// Exact (lowercased, normalized) texts rejected outright
  pub low_signal_phrases: Vec<String>,

  /// Texts with at most this many tokens are "short" (default: 2)
  pub short_max_tokens: usize,

  /// Short texts under this many characters are rejected (default: 18)
  pub short_min_chars: usize,

  /// Minimum count of tokens longer than two characters (default: 2)
  pub min_meaningful_tokens: usize,

  /// Texts lacking meaningful tokens are still kept from this length on (default: 26)
  pub meaningful_min_chars: usize,

  /// Whole-word person references for profile facts
  pub profile_reference_tokens: Vec<String>,

  /// Token count that makes a profile fact relevant on its own (default: 5)
  pub profile_min_tokens: usize,

  /// Substrings marking an insight as significant
  pub insight_keywords: Vec<String>,

  /// Importance at or above which an insight is always kept (default: 7)
  pub insight_importance_threshold: i32,

  /// Token count that makes an insight relevant on its own (default: 6)
  pub insight_min_tokens: usize,
}

impl Default for RelevanceConfig {
  fn default() -> Self {
    Self {
      low_signal_phrases: owned(LOW_SIGNAL_PHRASES),
      short_max_tokens: 2,
      short_min_chars: 18,
      min_meaningful_tokens: 2,
      meaningful_min_chars: 26,
      profile_reference_tokens: owned(PROFILE_REFERENCE_TOKENS),
      profile_min_tokens: 5,
      insight_keywords: owned(INSIGHT_KEYWORDS),
      insight_importance_threshold: 7,
      insight_min_tokens: 6,
    }
  }
}

// ============================================================================
// Dedup Configuration
// ============================================================================

/// Near-duplicate detection thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
  /// Minimum token-set Jaccard similarity of two signatures (default: 0.82)
  pub jaccard_threshold: f64,

  /// Both signatures must be longer than this for containment to count (default: 18)
  pub containment_min_len: usize,
}

impl Default for DedupConfig {
  fn default() -> Self {
    Self {
      jaccard_threshold: 0.82,
      containment_min_len: 18,
    }
  }
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: "off", "error", "warn", "info", "debug", "trace"
  /// Default: "warn"
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// Where an effective configuration was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
  Project(PathBuf),
  User(PathBuf),
  Default,
}

impl std::fmt::Display for ConfigSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ConfigSource::Project(path) => write!(f, "project config: {:?}", path),
      ConfigSource::User(path) => write!(f, "user config: {:?}", path),
      ConfigSource::Default => write!(f, "default configuration (no config file found)"),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub relevance: RelevanceConfig,

  #[serde(default)]
  pub dedup: DedupConfig,

  #[serde(default)]
  pub logging: LoggingConfig,
}

impl Config {
  /// Load config for a project, with fallback to user config and then defaults.
  ///
  /// Unreadable or invalid files are skipped rather than reported; use
  /// [`Config::load_from`] when the caller needs the error.
  pub fn load_for_project(project_path: &Path) -> Self {
    Self::load_for_project_with_source(project_path).0
  }

  /// Same lookup as [`Config::load_for_project`], also reporting which file won
  pub fn load_for_project_with_source(project_path: &Path) -> (Self, ConfigSource) {
    let project_config = Self::project_config_path(project_path);
    if project_config.exists()
      && let Ok(config) = Self::load_from(&project_config)
    {
      return (config, ConfigSource::Project(project_config));
    }

    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
      && let Ok(config) = Self::load_from(&user_config_path)
    {
      return (config, ConfigSource::User(user_config_path));
    }

    (Self::default(), ConfigSource::Default)
  }

  /// Load and validate a specific config file
  pub fn load_from(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WAYPOINT_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("waypoint").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("waypoint").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(".waypoint").join("memory.toml")
  }

  /// Reject values the classifiers cannot work with
  pub fn validate(&self) -> Result<()> {
    let threshold = self.dedup.jaccard_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
      return Err(Error::validation(
        "dedup.jaccard_threshold",
        format!("must be in (0, 1], got {}", threshold),
      ));
    }

    for (field, table) in [
      ("relevance.low_signal_phrases", &self.relevance.low_signal_phrases),
      ("relevance.profile_reference_tokens", &self.relevance.profile_reference_tokens),
      ("relevance.insight_keywords", &self.relevance.insight_keywords),
    ] {
      if let Some(entry) = table.iter().find(|e| e.trim().is_empty() || e.as_str() != e.to_lowercase()) {
        return Err(Error::validation(
          field,
          format!("entries must be non-empty and lowercase, got {:?}", entry),
        ));
      }
    }

    if !matches!(
      self.logging.level.to_lowercase().as_str(),
      "off" | "error" | "warn" | "info" | "debug" | "trace"
    ) {
      return Err(Error::validation(
        "logging.level",
        format!("unknown level '{}'", self.logging.level),
      ));
    }

    Ok(())
  }

  /// Serialize the effective configuration
  pub fn to_toml(&self) -> Result<String> {
    Ok(toml::to_string_pretty(self)?)
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    let quoted = |table: &[&str]| {
      table
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
    };

    format!(
      r#"# Waypoint Memory Filter Configuration
# Place in .waypoint/memory.toml (project) or ~/.config/waypoint/config.toml (user)

# ============================================================================
# Relevance
# ============================================================================

[relevance]
# Whole-text acknowledgements that are never stored (compared lowercased)
low_signal_phrases = [{phrases}]

# Reject texts with <= short_max_tokens tokens AND fewer than short_min_chars chars
short_max_tokens = 2
short_min_chars = 18

# Reject texts with < min_meaningful_tokens words longer than 2 chars
# AND fewer than meaningful_min_chars chars
min_meaningful_tokens = 2
meaningful_min_chars = 26

# Profile facts: whole-word person references, or enough tokens
profile_reference_tokens = [{references}]
profile_min_tokens = 5

# Insights: importance floor, keywords, or enough tokens
insight_keywords = [{keywords}]
insight_importance_threshold = 7
insight_min_tokens = 6

# ============================================================================
# Deduplication
# ============================================================================

[dedup]
# Token-set similarity of signatures at or above this is a duplicate
jaccard_threshold = 0.82

# Substring containment only counts when both signatures are longer than this
containment_min_len = 18

# ============================================================================
# Logging
# ============================================================================

[logging]
# off, error, warn, info, debug, trace (RUST_LOG overrides)
level = "warn"
"#,
      phrases = quoted(LOW_SIGNAL_PHRASES),
      references = quoted(PROFILE_REFERENCE_TOKENS),
      keywords = quoted(INSIGHT_KEYWORDS),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use tempfile::TempDir;

  #[test]
  fn test_default_tables() {
    let config = Config::default();
    assert_eq!(config.relevance.low_signal_phrases.len(), 9);
    assert!(config.relevance.low_signal_phrases.contains(&"thank you".to_string()));
    assert_eq!(config.relevance.insight_keywords.len(), 11);
    assert_eq!(config.relevance.profile_reference_tokens, owned(PROFILE_REFERENCE_TOKENS));
    assert_eq!(config.dedup.jaccard_threshold, 0.82);
    assert_eq!(config.dedup.containment_min_len, 18);
    assert_eq!(config.logging.level, "warn");
  }

  #[test]
  fn test_template_parses_to_defaults() {
    let parsed: Config = toml::from_str(&Config::generate_template()).unwrap();
    assert_eq!(parsed, Config::default());
  }

  #[test]
  fn test_partial_config_keeps_other_defaults() {
    let toml_content = r#"
[dedup]
jaccard_threshold = 0.9
"#;
    let config: Config = toml::from_str(toml_content).unwrap();
    assert_eq!(config.dedup.jaccard_threshold, 0.9);
    assert_eq!(config.dedup.containment_min_len, 18);
    assert_eq!(config.relevance, RelevanceConfig::default());
  }

  #[test]
  fn test_toml_roundtrip() {
    let mut config = Config::default();
    config.relevance.insight_keywords.push("relapse".to_string());
    config.logging.level = "debug".to_string();

    let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
    assert_eq!(parsed, config);
  }

  #[test]
  fn test_validate_rejects_bad_threshold() {
    for bad in [0.0, -0.5, 1.5] {
      let mut config = Config::default();
      config.dedup.jaccard_threshold = bad;
      let err = config.validate().unwrap_err();
      assert!(matches!(err, Error::Validation { ref field, .. } if field == "dedup.jaccard_threshold"));
    }
  }

  #[test]
  fn test_validate_rejects_uppercase_entries() {
    let mut config = Config::default();
    config.relevance.low_signal_phrases.push("Thanks!".to_string());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.relevance.insight_keywords.push("  ".to_string());
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_rejects_unknown_log_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_load_project_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".waypoint");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
      dir.join("memory.toml"),
      r#"
[relevance]
insight_importance_threshold = 8
"#,
    )
    .unwrap();

    let config = Config::load_for_project(temp.path());
    assert_eq!(config.relevance.insight_importance_threshold, 8);
    assert_eq!(config.relevance.insight_min_tokens, 6);
  }

  #[test]
  fn test_load_from_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[dedup\njaccard_threshold = ").unwrap();

    assert!(matches!(Config::load_from(&path), Err(Error::ConfigParse(_))));
    assert!(matches!(
      Config::load_from(&temp.path().join("missing.toml")),
      Err(Error::Io(_))
    ));
  }

  #[test]
  fn test_invalid_project_config_falls_back() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".waypoint");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("memory.toml"), "[dedup]\njaccard_threshold = 3.0\n").unwrap();

    // Falls through to the user config or defaults; either way the invalid value is not used
    let config = Config::load_for_project(temp.path());
    assert_ne!(config.dedup.jaccard_threshold, 3.0);

    let (_, source) = Config::load_for_project_with_source(temp.path());
    assert!(!matches!(source, ConfigSource::Project(_)));
  }

  #[test]
  fn test_source_reports_project_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".waypoint");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("memory.toml"), "[dedup]\njaccard_threshold = 0.9\n").unwrap();

    let (config, source) = Config::load_for_project_with_source(temp.path());
    assert_eq!(config.dedup.jaccard_threshold, 0.9);
    assert_eq!(source, ConfigSource::Project(dir.join("memory.toml")));
    assert!(source.to_string().starts_with("project config"));
  }
}
