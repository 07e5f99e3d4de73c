use std::collections::HashSet;
use std::hash::Hash;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::{debug, trace};
use waypoint_core::DedupConfig;

use crate::normalize::{normalize_memory_text, unique_token_set};
use crate::signature::signature_of_normalized;

/// Jaccard similarity of two token sets.
///
/// Returns 0.0 when either side is empty, including when both are: two
/// texts with nothing to compare are never considered the same.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  let intersection = a.intersection(b).count();
  let union = a.len() + b.len() - intersection;

  intersection as f64 / union as f64
}

/// Result of duplicate check
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum DuplicateMatch {
  /// Signatures are identical
  Signature,
  /// One long signature contains the other
  Containment,
  /// Signature token sets overlap enough
  Jaccard { similarity: f64 },
  /// No match
  None,
}

impl DuplicateMatch {
  pub fn is_duplicate(&self) -> bool {
    !matches!(self, DuplicateMatch::None)
  }
}

/// Check if two memories are duplicates
#[derive(Debug, Clone)]
pub struct DuplicateChecker {
  jaccard_threshold: f64,
  containment_min_len: usize,
}

impl Default for DuplicateChecker {
  fn default() -> Self {
    Self::new(&DedupConfig::default())
  }
}

static DEFAULT_CHECKER: LazyLock<DuplicateChecker> = LazyLock::new(DuplicateChecker::default);

impl DuplicateChecker {
  pub fn new(config: &DedupConfig) -> Self {
    Self {
      jaccard_threshold: config.jaccard_threshold,
      containment_min_len: config.containment_min_len,
    }
  }

  pub fn with_threshold(mut self, threshold: f64) -> Self {
    self.jaccard_threshold = threshold;
    self
  }

  pub fn jaccard_threshold(&self) -> f64 {
    self.jaccard_threshold
  }

  /// Check for duplicate using a cheapest-first strategy.
  ///
  /// Every level is symmetric, so `check(a, b) == check(b, a)`.
  pub fn check(&self, candidate: &str, existing: &str) -> DuplicateMatch {
    let candidate = normalize_memory_text(candidate);
    let existing = normalize_memory_text(existing);
    if candidate.is_empty() || existing.is_empty() {
      return DuplicateMatch::None;
    }

    let sig_a = signature_of_normalized(&candidate.to_lowercase());
    let sig_b = signature_of_normalized(&existing.to_lowercase());
    if sig_a.is_empty() || sig_b.is_empty() {
      trace!("Empty signature, skipping dedup");
      return DuplicateMatch::None;
    }

    // Level 1: identical signatures
    if sig_a == sig_b {
      debug!(signature = %sig_a, "Duplicate found (signature match)");
      return DuplicateMatch::Signature;
    }

    // Level 2: containment, only for signatures long enough to be specific
    if sig_a.len() > self.containment_min_len
      && sig_b.len() > self.containment_min_len
      && (sig_a.contains(sig_b.as_str()) || sig_b.contains(sig_a.as_str()))
    {
      debug!(
        candidate = %sig_a,
        existing = %sig_b,
        "Duplicate found (signature containment)"
      );
      return DuplicateMatch::Containment;
    }

    // Level 3: token overlap of the signatures
    let similarity = jaccard(&unique_token_set(&sig_a), &unique_token_set(&sig_b));

    trace!(
      similarity = similarity,
      threshold = self.jaccard_threshold,
      "Jaccard check"
    );

    if similarity >= self.jaccard_threshold {
      debug!(similarity = similarity, "Near-duplicate found (Jaccard match)");
      return DuplicateMatch::Jaccard { similarity };
    }

    DuplicateMatch::None
  }

  /// Check a candidate against existing memories, returning the first duplicate
  pub fn find_duplicate<'a, I>(&self, candidate: &str, existing: I) -> Option<(usize, DuplicateMatch)>
  where
    I: IntoIterator<Item = &'a str>,
  {
    existing
      .into_iter()
      .enumerate()
      .map(|(index, memory)| (index, self.check(candidate, memory)))
      .find(|(_, result)| result.is_duplicate())
  }
}

/// Whether two memory texts state the same thing, using default thresholds
pub fn are_near_duplicate_memories(candidate: &str, existing: &str) -> bool {
  DEFAULT_CHECKER.check(candidate, existing).is_duplicate()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
  }

  #[test]
  fn test_jaccard_identical() {
    let a = set(&["run", "morning", "park"]);
    assert_eq!(jaccard(&a, &a), 1.0);
  }

  #[test]
  fn test_jaccard_empty_is_zero() {
    let empty: HashSet<String> = HashSet::new();
    assert_eq!(jaccard(&empty, &empty), 0.0);
    assert_eq!(jaccard(&set(&["run"]), &empty), 0.0);
    assert_eq!(jaccard(&empty, &set(&["run"])), 0.0);
  }

  #[test]
  fn test_jaccard_partial_and_symmetric() {
    let a = set(&["hello", "world", "foo", "bar"]);
    let b = set(&["hello", "world", "foo", "baz"]);
    assert_eq!(jaccard(&a, &b), 3.0 / 5.0);
    assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    assert_eq!(jaccard(&set(&["one"]), &set(&["two"])), 0.0);
  }

  #[test]
  fn test_signature_match() {
    let checker = DuplicateChecker::default();
    assert_eq!(checker.check("My name is Alex", "my name is alex!!"), DuplicateMatch::Signature);
    assert_eq!(
      checker.check("The user runs every morning", "user runs every morning."),
      DuplicateMatch::Signature
    );
  }

  #[test]
  fn test_containment_requires_long_signatures() {
    let checker = DuplicateChecker::default();
    assert_eq!(
      checker.check(
        "User is training for a half marathon",
        "User is training for a half marathon in October"
      ),
      DuplicateMatch::Containment
    );
    // "likes tea" is contained but too short to be specific
    assert_eq!(
      checker.check("likes tea", "likes tea with honey every evening"),
      DuplicateMatch::None
    );
  }

  #[test]
  fn test_containment_length_floor_is_exclusive() {
    let checker = DuplicateChecker::default();
    // 18-character signature: contained, but not longer than the floor
    assert_eq!(
      checker.check("abcdefgh ijklmnopq", "abcdefgh ijklmnopq rstuv wxyz"),
      DuplicateMatch::None
    );
    // 19 characters clears it
    assert_eq!(
      checker.check("abcdefgh ijklmnopqr", "abcdefgh ijklmnopqr stuvw xyzab"),
      DuplicateMatch::Containment
    );
    assert_eq!(
      checker.check("abcdefgh ijklmnopqr stuvw xyzab", "abcdefgh ijklmnopqr"),
      DuplicateMatch::Containment
    );
  }

  #[test]
  fn test_jaccard_level() {
    let checker = DuplicateChecker::default();
    let result = checker.check(
      "morning walks help with anxiety and sleep quality",
      "sleep quality and anxiety help with morning walks",
    );
    assert!(matches!(result, DuplicateMatch::Jaccard { similarity } if similarity == 1.0));
  }

  #[test]
  fn test_low_overlap_is_not_duplicate() {
    assert!(!are_near_duplicate_memories(
      "I went for a long run this morning",
      "I baked bread yesterday"
    ));
  }

  #[test]
  fn test_empty_inputs_are_never_duplicates() {
    assert!(!are_near_duplicate_memories("", ""));
    assert!(!are_near_duplicate_memories("   ", "anything"));
    assert!(!are_near_duplicate_memories("the", "the"));
    assert!(!are_near_duplicate_memories("日本語のメモ", "日本語のメモ"));
  }

  #[test]
  fn test_threshold_is_inclusive_boundary() {
    // 5 shared of 6 total = 0.833, just above 0.82
    assert!(are_near_duplicate_memories(
      "alpha bravo charlie delta echo",
      "alpha bravo charlie foxtrot delta echo"
    ));
    // 9 shared of 11 total = 0.818, just below 0.82
    assert!(!are_near_duplicate_memories(
      "alpha bravo charlie delta echo foxtrot golf hotel india",
      "alpha bravo charlie delta juliet kilo echo foxtrot golf hotel india"
    ));
  }

  #[test]
  fn test_custom_threshold() {
    let checker = DuplicateChecker::default().with_threshold(0.5);
    assert_eq!(checker.jaccard_threshold(), 0.5);
    assert!(
      checker
        .check("walked dog park today", "walked dog beach today")
        .is_duplicate()
    );
  }

  #[test]
  fn test_find_duplicate_returns_first_match() {
    let checker = DuplicateChecker::default();
    let existing = [
      "User baked sourdough bread",
      "My name is Alex",
      "my name is alex.",
    ];
    let found = checker.find_duplicate("MY NAME IS ALEX", existing.iter().copied());
    assert_eq!(found, Some((1, DuplicateMatch::Signature)));
    assert_eq!(checker.find_duplicate("Completely new fact about running", existing), None);
  }
}
