use anyhow::Result;
use extract::{DuplicateChecker, DuplicateMatch, memory_signature};
use serde::Serialize;
use waypoint_core::Config;

use super::print_json;

#[derive(Serialize)]
struct DedupOutput<'a> {
  candidate_signature: String,
  duplicate_of: Option<usize>,
  existing: Option<&'a str>,
  result: DuplicateMatch,
}

/// Compare a candidate against existing memories and report the first duplicate
pub fn cmd_dedup(config: &Config, candidate: &str, existing: &[String], json_output: bool) -> Result<()> {
  let checker = DuplicateChecker::new(&config.dedup);
  let found = checker.find_duplicate(candidate, existing.iter().map(String::as_str));

  let output = DedupOutput {
    candidate_signature: memory_signature(candidate),
    duplicate_of: found.map(|(index, _)| index),
    existing: found.map(|(index, _)| existing[index].as_str()),
    result: found.map(|(_, result)| result).unwrap_or(DuplicateMatch::None),
  };

  if json_output {
    return print_json(&output);
  }

  println!("Signature: {}", output.candidate_signature);
  match (output.duplicate_of, output.existing) {
    (Some(index), Some(text)) => {
      let reason = match output.result {
        DuplicateMatch::Signature => "identical signature".to_string(),
        DuplicateMatch::Containment => "signature containment".to_string(),
        DuplicateMatch::Jaccard { similarity } => format!("token overlap {:.3}", similarity),
        DuplicateMatch::None => "none".to_string(),
      };
      println!("Duplicate of #{} ({}): {}", index, reason, text);
    }
    _ => println!("No duplicate among {} existing memories", existing.len()),
  }

  Ok(())
}
