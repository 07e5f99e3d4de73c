//! Text inspection commands (normalize, signature, tokens)

use anyhow::Result;
use extract::{memory_signature, normalize_memory_text, tokenize, unique_token_set};
use serde::Serialize;

use super::print_json;

#[derive(Serialize)]
struct TokensOutput {
  tokens: Vec<String>,
  meaningful: Vec<String>,
}

pub fn cmd_normalize(text: &str, json_output: bool) -> Result<()> {
  let normalized = normalize_memory_text(text);
  if json_output {
    return print_json(&serde_json::json!({ "normalized": normalized }));
  }
  println!("{}", normalized);
  Ok(())
}

pub fn cmd_signature(text: &str, json_output: bool) -> Result<()> {
  let signature = memory_signature(text);
  if json_output {
    return print_json(&serde_json::json!({ "signature": signature }));
  }

  if signature.is_empty() {
    println!("(empty signature - not usable for dedup)");
  } else {
    println!("{}", signature);
  }
  Ok(())
}

pub fn cmd_tokens(text: &str, json_output: bool) -> Result<()> {
  let normalized = normalize_memory_text(text);
  let mut meaningful: Vec<String> = unique_token_set(&normalized).into_iter().collect();
  meaningful.sort();

  let output = TokensOutput {
    tokens: tokenize(&normalized),
    meaningful,
  };

  if json_output {
    return print_json(&output);
  }

  println!("Tokens ({}):     {}", output.tokens.len(), output.tokens.join(" "));
  println!("Meaningful ({}): {}", output.meaningful.len(), output.meaningful.join(" "));
  Ok(())
}
