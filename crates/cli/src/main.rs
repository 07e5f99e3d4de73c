//! Waypoint CLI - inspect and run the memory relevance and dedup filter

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use waypoint_core::{Config, MemoryKind};

mod commands;
mod logging;

use commands::{
  cmd_config_init, cmd_config_show, cmd_dedup, cmd_gate, cmd_normalize, cmd_relevant, cmd_signature, cmd_tokens,
};
use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Decide which conversation snippets become long-term memories")]
#[command(after_help = "\
QUICK START:
  waypoint relevant \"I want to finish my thesis by Friday\"
  waypoint relevant \"User seems stuck\" --kind insight --importance 8
  waypoint dedup \"My name is Alex\" \"my name is alex!!\"
  waypoint gate \"Runs every Sunday\" --existing-file memories.txt")]
struct Cli {
  /// Config file to use instead of project/user lookup
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `waypoint config`
#[derive(Subcommand)]
pub enum ConfigCommand {
  /// Show current effective configuration
  #[command(long_about = "Show the current effective configuration.\n\n\
    Displays which config file is being used and its contents as TOML.")]
  Show,

  /// Initialize project config file (.waypoint/memory.toml)
  Init,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the normalized form of a text
  Normalize {
    text: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Print the dedup signature of a text
  Signature {
    text: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Print the tokens and meaningful token set of a text
  Tokens {
    text: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Check a candidate against existing memories for near-duplicates
  Dedup {
    /// Candidate memory text
    candidate: String,
    /// Existing memory texts, compared in order
    #[arg(required = true)]
    existing: Vec<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Check whether a candidate is worth remembering
  Relevant {
    text: String,
    /// Memory kind (generic, profile_fact, insight)
    #[arg(short, long, default_value = "generic")]
    kind: MemoryKind,
    /// Importance score 1-10 for insights (default: 5)
    #[arg(short, long)]
    importance: Option<i32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Run relevance and dedup together, as a store would before inserting
  #[command(after_help = "\
EXAMPLES:
  waypoint gate \"My name is Alex\" --kind profile_fact --existing \"my name is alex\"
  waypoint gate \"Decided to quit vaping\" --kind insight --existing-file insights.txt")]
  Gate {
    text: String,
    /// Memory kind (generic, profile_fact, insight)
    #[arg(short, long, default_value = "generic")]
    kind: MemoryKind,
    /// Importance score 1-10 for insights (default: 5)
    #[arg(short, long)]
    importance: Option<i32>,
    /// Existing memory of the same kind (repeatable)
    #[arg(long)]
    existing: Vec<String>,
    /// File with one existing memory per line
    #[arg(long, value_name = "FILE")]
    existing_file: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Manage configuration
  #[command(after_help = "\
CONFIG LOCATIONS:
  Project: .waypoint/memory.toml
  User:    ~/.config/waypoint/config.toml")]
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
  match explicit {
    Some(path) => Config::load_from(path).with_context(|| format!("Failed to load config from {:?}", path)),
    None => Ok(Config::load_for_project(cwd)),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let config = load_config(cli.config.as_deref(), &cwd)?;
  init_cli_logging(&config.logging.level);

  match cli.command {
    Commands::Normalize { text, json } => cmd_normalize(&text, json),
    Commands::Signature { text, json } => cmd_signature(&text, json),
    Commands::Tokens { text, json } => cmd_tokens(&text, json),
    Commands::Dedup {
      candidate,
      existing,
      json,
    } => cmd_dedup(&config, &candidate, &existing, json),
    Commands::Relevant {
      text,
      kind,
      importance,
      json,
    } => cmd_relevant(&config, &text, kind, importance, json),
    Commands::Gate {
      text,
      kind,
      importance,
      existing,
      existing_file,
      json,
    } => cmd_gate(
      &config,
      &text,
      kind,
      importance,
      &existing,
      existing_file.as_deref(),
      json,
    ),
    Commands::Config { command } => match command {
      ConfigCommand::Show => cmd_config_show(&config, cli.config.as_deref(), &cwd),
      ConfigCommand::Init => cmd_config_init(&cwd),
    },
  }
}
