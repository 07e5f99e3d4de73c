//! Configuration commands (show, init)

use std::path::Path;

use anyhow::{Context, Result, bail};
use waypoint_core::{Config, ConfigSource};

/// Lines describing which config file is in effect, and any project file that was skipped
pub fn describe_config_source(explicit: Option<&Path>, cwd: &Path) -> Vec<String> {
  if let Some(path) = explicit {
    return vec![format!("Using config: {:?}", path)];
  }

  let mut lines = Vec::new();
  let project_config = Config::project_config_path(cwd);
  let (_, source) = Config::load_for_project_with_source(cwd);

  if project_config.exists()
    && !matches!(source, ConfigSource::Project(_))
    && let Err(e) = Config::load_from(&project_config)
  {
    lines.push(format!("Skipped invalid project config {:?}: {}", project_config, e));
  }

  lines.push(format!("Using {}", source));
  lines
}

/// Show the effective configuration and where it came from
pub fn cmd_config_show(config: &Config, explicit: Option<&Path>, cwd: &Path) -> Result<()> {
  for line in describe_config_source(explicit, cwd) {
    println!("{}", line);
  }
  println!();

  println!("{}", config.to_toml()?);
  Ok(())
}

/// Write a commented project config template
pub fn cmd_config_init(cwd: &Path) -> Result<()> {
  let config_path = Config::project_config_path(cwd);

  if config_path.exists() {
    bail!(
      "Config file already exists: {:?}. Delete it first if you want to regenerate",
      config_path
    );
  }

  if let Some(parent) = config_path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
  }

  std::fs::write(&config_path, Config::generate_template())
    .with_context(|| format!("Failed to write {:?}", config_path))?;

  println!("Created project config: {:?}", config_path);
  println!("Edit the file to customize rule tables and thresholds.");
  Ok(())
}
