//! setup-luarocks: installs LuaRocks for later steps of a build pipeline.

mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

/// Install LuaRocks against an existing Lua installation
#[derive(Parser)]
#[command(name = "setup-luarocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// LuaRocks version to install; `@<ref>` builds a branch, tag or commit (`@` alone: master)
  #[arg(long = "luarocks-version", env = "INPUT_LUAROCKSVERSION")]
  luarocks_version: Option<String>,

  /// Prefix of the Lua installation (default: ./.lua)
  #[arg(long, env = "INPUT_WITHLUAPATH")]
  with_lua_path: Option<PathBuf>,

  /// Show what would be done without downloading or installing anything
  #[arg(long)]
  dry_run: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Logs go to stderr; stdout carries exports and results.
  let default_filter = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let Some(version) = cli.luarocks_version.filter(|v| !v.trim().is_empty()) else {
    output::print_failure("Input required and not supplied: luaRocksVersion");
    return ExitCode::FAILURE;
  };

  let result = if cli.dry_run {
    cmd::cmd_plan(&version, cli.with_lua_path, cli.format)
  } else {
    cmd::cmd_install(&version, cli.with_lua_path, cli.format)
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_failure(&format!("Failed to install LuaRocks: {:#}", err));
      ExitCode::FAILURE
    }
  }
}
