//! Implementation of `--dry-run`.
//!
//! Resolves the version and paths and lists the install steps without
//! touching the network or the filesystem.

use std::path::PathBuf;

use anyhow::{Context, Result};

use setup_luarocks_lib::config::SetupConfig;
use setup_luarocks_lib::setup;

use crate::output::{self, OutputFormat};

/// Execute the dry run.
///
/// Prints the resolved archive, the install layout and the numbered steps.
pub fn cmd_plan(version: &str, with_lua_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let config = SetupConfig::from_env(version, with_lua_path).context("Failed to read configuration")?;
  let plan = setup::plan(&config)?;

  if format.is_json() {
    return output::print_json(&plan);
  }

  output::print_info(&format!("LuaRocks {} ({})", plan.version, plan.os));
  output::print_stat("Archive", &plan.archive.url);
  output::print_stat("Build dir", &plan.paths.build_dir.display().to_string());
  output::print_stat("Prefix", &plan.paths.install_prefix.display().to_string());
  output::print_stat("Lua", &plan.paths.lua_prefix.display().to_string());

  println!();
  println!("Steps:");
  for (i, step) in plan.steps.iter().enumerate() {
    println!("  {}. {}", i + 1, step);
  }

  Ok(())
}
