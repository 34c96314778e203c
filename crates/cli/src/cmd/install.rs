//! Implementation of the install run.
//!
//! Installs LuaRocks and applies the resulting environment changes, either to
//! the pipeline's environment files or, outside a pipeline, as shell exports
//! on stdout.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use setup_luarocks_lib::config::SetupConfig;
use setup_luarocks_lib::consts::LUAROCKS_PREFIX;
use setup_luarocks_lib::env::{EnvPatch, GithubEnvSink, ShellEnvSink};
use setup_luarocks_lib::host::SystemHost;
use setup_luarocks_lib::setup;

use crate::output::{self, OutputFormat};

/// Execute the install.
///
/// - Reads the run configuration from inputs and environment
/// - Downloads, builds or copies LuaRocks into `./.luarocks`
/// - Publishes `PATH`, `LUA_PATH` and `LUA_CPATH` for later steps
///
/// Prints a summary with the install prefix and elapsed time.
pub fn cmd_install(version: &str, with_lua_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let config = SetupConfig::from_env(version, with_lua_path).context("Failed to read configuration")?;
  debug!(
    version = %config.luarocks_version,
    cwd = %config.cwd.display(),
    temp_root = %config.temp_root.display(),
    "resolved configuration"
  );
  let host = SystemHost::new().context("Failed to initialize HTTP client")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let patch = rt.block_on(setup::run(&host, &config))?;

  let in_pipeline = publish(&patch, format, GithubEnvSink::from_env(), &mut std::io::stdout().lock())?;

  if in_pipeline && !format.is_json() {
    let elapsed = Duration::from_millis(start.elapsed().as_millis() as u64);
    output::print_success(&format!("LuaRocks {} installed", version.trim()));
    output::print_stat("Prefix", &config.cwd.join(LUAROCKS_PREFIX).display().to_string());
    output::print_stat("Elapsed", &humantime::format_duration(elapsed).to_string());
  }

  Ok(())
}

/// Apply `patch` to the pipeline files when available and render it to `out`.
///
/// JSON output is the patch itself. Text output outside a pipeline is a list
/// of shell exports. Returns whether the pipeline files were written.
fn publish<W: Write>(
  patch: &EnvPatch,
  format: OutputFormat,
  github: Option<GithubEnvSink>,
  out: &mut W,
) -> Result<bool> {
  let in_pipeline = github.is_some();
  if let Some(mut sink) = github {
    patch.apply(&mut sink)?;
  }

  if format.is_json() {
    serde_json::to_writer_pretty(&mut *out, patch).context("Failed to serialize to JSON")?;
    writeln!(out)?;
  } else if !in_pipeline {
    output::print_warning("GITHUB_PATH/GITHUB_ENV not set, printing shell exports instead");
    patch.apply(&mut ShellEnvSink::new(out))?;
  }

  Ok(in_pipeline)
}
