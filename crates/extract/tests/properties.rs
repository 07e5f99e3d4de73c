//! Cross-module properties of the memory filter over hand-picked corpora.

use std::collections::HashSet;

use extract::{
  DuplicateChecker, are_near_duplicate_memories, is_likely_relevant_insight, is_likely_relevant_memory,
  is_likely_relevant_profile_fact, jaccard, memory_signature, normalize_memory_text, unique_token_set,
};
use pretty_assertions::assert_eq;

const CORPUS: &[&str] = &[
  "",
  "   ",
  "ok",
  "Hey!",
  "My name is Alex",
  "my name is alex!!",
  "  Hello   “world”  ",
  "The user’s name is Jordan-Lee",
  "I went for a long run this morning",
  "I went for a long run this morning before work",
  "I baked bread yesterday",
  "The user seems stuck on motivation",
  "User decided to cut back on caffeine after 2pm",
  "user decided to cut back on caffeine",
  "Sobriety day 30 reached on the 4th of July",
  "sobriety day 30 reached on 4th of july",
  "我今天去跑步了",
  "Привет, меня зовут Саша",
  "the a an",
  "\t\n“”‘’",
];

#[test]
fn normalize_is_idempotent() {
  for text in CORPUS {
    let once = normalize_memory_text(text);
    assert_eq!(normalize_memory_text(&once), once, "input {:?}", text);
  }
}

#[test]
fn signature_is_deterministic_and_normalization_invariant() {
  for text in CORPUS {
    let signature = memory_signature(text);
    assert_eq!(memory_signature(text), signature);
    assert_eq!(memory_signature(&normalize_memory_text(text)), signature);
  }
}

#[test]
fn duplicate_check_is_symmetric() {
  let checker = DuplicateChecker::default();
  for a in CORPUS {
    for b in CORPUS {
      assert_eq!(
        are_near_duplicate_memories(a, b),
        are_near_duplicate_memories(b, a),
        "{:?} vs {:?}",
        a,
        b
      );
      assert_eq!(checker.check(a, b), checker.check(b, a), "{:?} vs {:?}", a, b);
    }
  }
}

#[test]
fn jaccard_bounds_and_symmetry() {
  let sets: Vec<HashSet<String>> = CORPUS.iter().map(|t| unique_token_set(t)).collect();
  for a in &sets {
    for b in &sets {
      let similarity = jaccard(a, b);
      assert!((0.0..=1.0).contains(&similarity));
      assert_eq!(similarity, jaccard(b, a));
      if a.is_empty() || b.is_empty() {
        assert_eq!(similarity, 0.0);
      }
    }
    if !a.is_empty() {
      assert_eq!(jaccard(a, a), 1.0);
    }
  }
}

#[test]
fn classifiers_are_total() {
  for text in CORPUS {
    let base = is_likely_relevant_memory(text);
    // Specializations never accept what the base rejects
    if !base {
      assert!(!is_likely_relevant_profile_fact(text), "{:?}", text);
      for importance in [None, Some(1), Some(7), Some(10), Some(i32::MIN), Some(i32::MAX)] {
        assert!(!is_likely_relevant_insight(text, importance), "{:?}", text);
      }
    }
  }
}

#[test]
fn documented_examples() {
  assert_eq!(normalize_memory_text("  Hello   “world”  "), "Hello \"world\"");
  assert_eq!(memory_signature("My name is Alex."), "name:alex");
  assert!(are_near_duplicate_memories("My name is Alex", "my name is alex!!"));
  assert!(!are_near_duplicate_memories(
    "I went for a long run this morning",
    "I baked bread yesterday"
  ));
  assert!(!is_likely_relevant_memory("ok"));
  assert!(!is_likely_relevant_memory("Hey"));
  assert!(is_likely_relevant_memory("I want to finish my thesis draft by Friday"));
  assert!(is_likely_relevant_profile_fact("My name is Alex"));
  assert!(is_likely_relevant_insight("The user seems stuck on motivation", Some(5)));
  assert!(!is_likely_relevant_insight("nice weather today", Some(5)));
}

#[test]
fn restated_facts_are_caught() {
  assert!(are_near_duplicate_memories(
    "I went for a long run this morning",
    "I went for a long run this morning before work"
  ));
  assert!(are_near_duplicate_memories(
    "User decided to cut back on caffeine after 2pm",
    "user decided to cut back on caffeine"
  ));
  assert!(are_near_duplicate_memories(
    "Sobriety day 30 reached on the 4th of July",
    "sobriety day 30 reached on 4th of july"
  ));
}
