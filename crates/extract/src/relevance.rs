//! Relevance classifiers deciding whether candidate text is worth remembering.
//!
//! The base classifier rejects empty text, acknowledgements, greetings and
//! meta-commentary, then applies length floors. Profile facts and insights
//! layer their own acceptance rules on top of a passing base verdict.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;
use waypoint_core::{MemoryKind, RelevanceConfig, importance_or_default};

use crate::normalize::{char_len, is_meaningful, normalize_memory_text, tokenize};
use crate::signature::is_name_declaration;

/// A named pattern marking text as conversational filler
pub struct LowSignalRule {
  pub name: &'static str,
  regex: Regex,
}

impl LowSignalRule {
  #[allow(clippy::expect_used)]
  fn new(name: &'static str, pattern: &str) -> Self {
    Self {
      name,
      regex: Regex::new(pattern).expect("valid regex"),
    }
  }

  /// Match against lowercased, normalized text
  pub fn is_match(&self, lower: &str) -> bool {
    self.regex.is_match(lower)
  }
}

/// Filler patterns, checked in order against lowercased normalized text
pub static LOW_SIGNAL_RULES: LazyLock<Vec<LowSignalRule>> = LazyLock::new(|| {
  vec![
    LowSignalRule::new("greeting", r"^(?:hi|hello|hey)[!.?,]*$"),
    LowSignalRule::new("agreement", r"^(?:(?:sounds|looks|all) good|makes sense)[!.]*$"),
    LowSignalRule::new(
      "conversation_opening",
      concat!(
        r"\b(?:start|beginning|opening|first\s+message)\s+(?:of|in)\s+(?:(?:the|a|this|our)\s+)?(?:new\s+)?(?:conversation|chat)\b",
        r"|\b(?:conversation|chat)\s+(?:just\s+)?(?:started|began|opened)\b",
        r"|\b(?:started|opened|began|initiated|starts|opens|begins|initiates)\s+(?:the|a|this|our)\s+(?:new\s+)?(?:conversation|chat)\b",
      ),
    ),
    LowSignalRule::new(
      "user_said_ok",
      r#"^(?:the\s+)?user\s+(?:said|says|replied|responded|answered)(?:\s+with)?\s*[:,]?\s*["']?(?:ok|okay)["']?[.!]*$"#,
    ),
    LowSignalRule::new(
      "assistant_greeting",
      r"\bassistant\s+(?:greeted|said hello|says hello|said hi|says hi)\b",
    ),
    LowSignalRule::new("small_talk", r"\bsmall talk\b|\bgeneric greeting\b"),
  ]
});

/// Name of the first low-signal rule matching the text, if any
pub fn matching_low_signal_rule(lower: &str) -> Option<&'static str> {
  LOW_SIGNAL_RULES.iter().find(|r| r.is_match(lower)).map(|r| r.name)
}

/// Why the base classifier rejected a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rejection {
  /// Nothing left after normalization
  Empty,
  /// Whole text is an acknowledgement
  LowSignalPhrase,
  /// Matched a filler pattern
  LowSignalPattern { rule: &'static str },
  /// Too few tokens and too few characters
  TooShort,
  /// Too few meaningful words and too few characters
  TooFewMeaningfulTokens,
}

impl std::fmt::Display for Rejection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Rejection::Empty => f.write_str("empty"),
      Rejection::LowSignalPhrase => f.write_str("low-signal phrase"),
      Rejection::LowSignalPattern { rule } => write!(f, "low-signal pattern ({})", rule),
      Rejection::TooShort => f.write_str("too short"),
      Rejection::TooFewMeaningfulTokens => f.write_str("too few meaningful words"),
    }
  }
}

/// Text that passed the base rules, kept around for the specialized checks
struct Accepted {
  lower: String,
  tokens: Vec<String>,
}

/// Relevance classifier family over one configuration
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
  config: RelevanceConfig,
  low_signal_phrases: HashSet<String>,
  reference_tokens: HashSet<String>,
}

impl Default for RelevanceFilter {
  fn default() -> Self {
    Self::new(RelevanceConfig::default())
  }
}

static DEFAULT_FILTER: LazyLock<RelevanceFilter> = LazyLock::new(RelevanceFilter::default);

impl RelevanceFilter {
  pub fn new(config: RelevanceConfig) -> Self {
    let low_signal_phrases = config.low_signal_phrases.iter().cloned().collect();
    let reference_tokens = config.profile_reference_tokens.iter().cloned().collect();
    Self {
      config,
      low_signal_phrases,
      reference_tokens,
    }
  }

  pub fn config(&self) -> &RelevanceConfig {
    &self.config
  }

  fn assess(&self, text: &str) -> Result<Accepted, Rejection> {
    let normalized = normalize_memory_text(text);
    if normalized.is_empty() {
      return Err(Rejection::Empty);
    }

    let lower = normalized.to_lowercase();
    if self.low_signal_phrases.contains(&lower) {
      return Err(Rejection::LowSignalPhrase);
    }

    if let Some(rule) = matching_low_signal_rule(&lower) {
      return Err(Rejection::LowSignalPattern { rule });
    }

    let length = char_len(&normalized);
    let tokens = tokenize(&normalized);
    if tokens.len() <= self.config.short_max_tokens && length < self.config.short_min_chars {
      return Err(Rejection::TooShort);
    }

    let meaningful = tokens.iter().filter(|t| is_meaningful(t)).count();
    if meaningful < self.config.min_meaningful_tokens && length < self.config.meaningful_min_chars {
      return Err(Rejection::TooFewMeaningfulTokens);
    }

    Ok(Accepted { lower, tokens })
  }

  /// Reason the base classifier rejects the text, or `None` if it passes
  pub fn rejection_reason(&self, text: &str) -> Option<Rejection> {
    let rejection = self.assess(text).err();
    if let Some(reason) = rejection {
      trace!(text_len = text.len(), reason = %reason, "Candidate rejected");
    }
    rejection
  }

  /// Base relevance
  pub fn is_relevant(&self, text: &str) -> bool {
    self.rejection_reason(text).is_none()
  }

  /// Base relevance plus a person reference, a name, or enough words
  pub fn is_relevant_profile_fact(&self, text: &str) -> bool {
    let Ok(accepted) = self.assess(text) else {
      return false;
    };

    is_name_declaration(&accepted.lower)
      || accepted.tokens.iter().any(|t| self.reference_tokens.contains(t))
      || accepted.tokens.len() >= self.config.profile_min_tokens
  }

  /// Base relevance plus high importance, a signal keyword, or enough words
  pub fn is_relevant_insight(&self, text: &str, importance: Option<i32>) -> bool {
    let Ok(accepted) = self.assess(text) else {
      return false;
    };

    if importance_or_default(importance) >= self.config.insight_importance_threshold {
      return true;
    }

    self
      .config
      .insight_keywords
      .iter()
      .any(|k| accepted.lower.contains(k.as_str()))
      || accepted.tokens.len() >= self.config.insight_min_tokens
  }

  /// Pick the classifier matching the memory kind
  pub fn is_relevant_for(&self, kind: MemoryKind, text: &str, importance: Option<i32>) -> bool {
    match kind {
      MemoryKind::Generic => self.is_relevant(text),
      MemoryKind::ProfileFact => self.is_relevant_profile_fact(text),
      MemoryKind::Insight => self.is_relevant_insight(text, importance),
    }
  }
}

pub fn is_likely_relevant_memory(text: &str) -> bool {
  DEFAULT_FILTER.is_relevant(text)
}

pub fn is_likely_relevant_profile_fact(text: &str) -> bool {
  DEFAULT_FILTER.is_relevant_profile_fact(text)
}

/// Insight relevance; `None` importance counts as the default of 5
pub fn is_likely_relevant_insight(text: &str, importance: Option<i32>) -> bool {
  DEFAULT_FILTER.is_relevant_insight(text, importance)
}
