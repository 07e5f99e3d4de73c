//! Canonical comparison keys for memories.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::normalize::normalize_memory_text;

/// "my name is X" and its third-person paraphrases
#[allow(clippy::expect_used)]
static NAME_DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:my|user's|user|their)\s+name\s+is\s+([a-z][a-z0-9-]*)").expect("valid regex")
});

const ARTICLES: &[&str] = &["a", "an", "the"];

/// Identifier declared by a name statement, if the text contains one
pub fn declared_name(text: &str) -> Option<String> {
  NAME_DECLARATION_RE
    .captures(text)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_lowercase())
}

/// Does the text declare someone's name
pub fn is_name_declaration(text: &str) -> bool {
  NAME_DECLARATION_RE.is_match(text)
}

/// Signature of text that is already normalized and lowercased.
///
/// Name declarations collapse to `name:<identifier>`; everything else keeps
/// its alphanumeric words minus English articles. The result may be empty.
pub fn signature_of_normalized(lower: &str) -> String {
  if let Some(name) = declared_name(lower) {
    return format!("name:{}", name);
  }

  lower
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|w| !w.is_empty() && !ARTICLES.contains(w))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Signature of arbitrary candidate text
pub fn memory_signature(text: &str) -> String {
  let lower = normalize_memory_text(text).to_lowercase();
  let signature = signature_of_normalized(&lower);

  trace!(text_len = text.len(), signature = %signature, "Signature computed");

  signature
}
