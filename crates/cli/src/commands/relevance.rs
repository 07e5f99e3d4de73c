//! Relevance and store-gate commands

use std::path::Path;

use anyhow::{Context, Result};
use extract::{GateDecision, MemoryGate, Rejection, RelevanceFilter};
use serde::Serialize;
use waypoint_core::{Config, MemoryKind, importance_or_default};

use super::print_json;

#[derive(Serialize)]
struct RelevanceOutput {
  kind: MemoryKind,
  importance: i32,
  relevant: bool,
  base_rejection: Option<Rejection>,
}

/// Report whether a candidate passes the relevance rules for its kind
pub fn cmd_relevant(
  config: &Config,
  text: &str,
  kind: MemoryKind,
  importance: Option<i32>,
  json_output: bool,
) -> Result<()> {
  let filter = RelevanceFilter::new(config.relevance.clone());
  let output = RelevanceOutput {
    kind,
    importance: importance_or_default(importance),
    relevant: filter.is_relevant_for(kind, text, importance),
    base_rejection: filter.rejection_reason(text),
  };

  if json_output {
    return print_json(&output);
  }

  if output.relevant {
    println!("relevant ({})", kind);
  } else {
    match output.base_rejection {
      Some(reason) => println!("not relevant: {}", reason),
      None => println!("not relevant: fails {} rules", kind),
    }
  }
  Ok(())
}

/// Existing memories from repeated flags plus an optional file, one memory per line
pub fn collect_existing(existing: &[String], existing_file: Option<&Path>) -> Result<Vec<String>> {
  let mut memories = existing.to_vec();

  if let Some(path) = existing_file {
    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read existing memories from {:?}", path))?;
    memories.extend(
      content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string),
    );
  }

  Ok(memories)
}

/// Run the full relevance-then-dedup gate for a candidate
pub fn cmd_gate(
  config: &Config,
  text: &str,
  kind: MemoryKind,
  importance: Option<i32>,
  existing: &[String],
  existing_file: Option<&Path>,
  json_output: bool,
) -> Result<()> {
  let memories = collect_existing(existing, existing_file)?;
  let gate = MemoryGate::new(config);
  let decision = gate.evaluate(kind, text, importance, memories.iter().map(String::as_str));

  if json_output {
    return print_json(&decision);
  }

  match decision {
    GateDecision::Store => println!("store"),
    GateDecision::Irrelevant { reason: Some(reason) } => println!("skip: {}", reason),
    GateDecision::Irrelevant { reason: None } => println!("skip: fails {} rules", kind),
    GateDecision::Duplicate { index, .. } => println!("skip: duplicate of #{}: {}", index, memories[index]),
  }
  Ok(())
}
