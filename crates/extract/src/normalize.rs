//! Text canonicalization shared by every classifier.

use std::collections::HashSet;

/// Tokens at or below this length carry no meaning on their own
const MEANINGFUL_MIN_LEN: usize = 3;

/// Collapse whitespace runs, straighten curly quotes and trim.
///
/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize_memory_text(text: &str) -> String {
  let straightened: String = text
    .chars()
    .map(|c| match c {
      '\u{201C}' | '\u{201D}' => '"',
      '\u{2018}' | '\u{2019}' => '\'',
      other => other,
    })
    .collect();

  straightened.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase ASCII alphanumeric tokens, in order of appearance.
///
/// Anything outside `[a-z0-9]` separates tokens, so text in non-Latin scripts
/// yields no tokens at all.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .to_lowercase()
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

/// Is this token long enough to count as a meaningful word
pub fn is_meaningful(token: &str) -> bool {
  token.len() >= MEANINGFUL_MIN_LEN
}

/// Distinct meaningful tokens of a text
pub fn unique_token_set(text: &str) -> HashSet<String> {
  tokenize(text).into_iter().filter(|t| is_meaningful(t)).collect()
}

/// Character (not byte) length used by the length rules
pub(crate) fn char_len(text: &str) -> usize {
  text.chars().count()
}
