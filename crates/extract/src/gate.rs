//! Store gate: the relevance-then-dedup sequence a memory store runs before insert.

use serde::Serialize;
use tracing::debug;
use waypoint_core::{Config, MemoryKind};

use crate::dedup::{DuplicateChecker, DuplicateMatch};
use crate::relevance::{Rejection, RelevanceFilter};

/// What the store should do with a candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
  /// Relevant and new
  Store,
  /// Fails the relevance rules for its kind
  Irrelevant {
    /// Base rejection, absent when only the kind-specific rules failed
    reason: Option<Rejection>,
  },
  /// Restates the existing memory at `index`
  Duplicate { index: usize, reason: DuplicateMatch },
}

impl GateDecision {
  pub fn should_store(&self) -> bool {
    matches!(self, GateDecision::Store)
  }
}

/// Relevance filter and duplicate checker built from one configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryGate {
  relevance: RelevanceFilter,
  dedup: DuplicateChecker,
}

impl MemoryGate {
  pub fn new(config: &Config) -> Self {
    Self {
      relevance: RelevanceFilter::new(config.relevance.clone()),
      dedup: DuplicateChecker::new(&config.dedup),
    }
  }

  pub fn relevance(&self) -> &RelevanceFilter {
    &self.relevance
  }

  pub fn dedup(&self) -> &DuplicateChecker {
    &self.dedup
  }

  /// Decide whether a candidate of `kind` should be stored.
  ///
  /// `existing` should hold the owner's memories of the same kind.
  pub fn evaluate<'a, I>(&self, kind: MemoryKind, candidate: &str, importance: Option<i32>, existing: I) -> GateDecision
  where
    I: IntoIterator<Item = &'a str>,
  {
    if !self.relevance.is_relevant_for(kind, candidate, importance) {
      let reason = self.relevance.rejection_reason(candidate);
      debug!(kind = %kind, reason = ?reason, "Candidate gated out as irrelevant");
      return GateDecision::Irrelevant { reason };
    }

    if let Some((index, reason)) = self.dedup.find_duplicate(candidate, existing) {
      debug!(kind = %kind, index = index, "Candidate gated out as duplicate");
      return GateDecision::Duplicate { index, reason };
    }

    GateDecision::Store
  }
}
