use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Importance assumed for an insight when the producer does not supply one
pub const DEFAULT_IMPORTANCE: i32 = 5;

/// Memory kind selects which relevance rules a candidate must pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
  /// Anything worth remembering - base rules only
  #[default]
  Generic,
  /// Stable facts about the user (name, circumstances, history)
  ProfileFact,
  /// Observations about decisions, obstacles, preferences
  Insight,
}

impl MemoryKind {
  pub const ALL: [MemoryKind; 3] = [MemoryKind::Generic, MemoryKind::ProfileFact, MemoryKind::Insight];

  pub fn as_str(&self) -> &'static str {
    match self {
      MemoryKind::Generic => "generic",
      MemoryKind::ProfileFact => "profile_fact",
      MemoryKind::Insight => "insight",
    }
  }
}

impl std::fmt::Display for MemoryKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for MemoryKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "generic" | "memory" => Ok(MemoryKind::Generic),
      "profile_fact" | "profile-fact" | "profile" | "fact" => Ok(MemoryKind::ProfileFact),
      "insight" => Ok(MemoryKind::Insight),
      _ => Err(Error::validation(
        "kind",
        format!("unknown memory kind '{}' (expected generic, profile_fact or insight)", s),
      )),
    }
  }
}

/// Resolve an optional producer-supplied importance score
pub fn importance_or_default(importance: Option<i32>) -> i32 {
  importance.unwrap_or(DEFAULT_IMPORTANCE)
}
