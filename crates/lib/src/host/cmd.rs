//! Process execution.
//!
//! Commands inherit the parent environment. Extra search-path entries are
//! prepended to the child's `PATH` only, so binaries installed during a run
//! resolve without touching the parent process.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Result, SetupError};

/// Options for executing a command.
///
/// # Example
///
/// ```
/// use setup_luarocks_lib::host::CmdOpts;
///
/// let opts = CmdOpts::new("make").with_args(["install"]).with_cwd("/build/luarocks-3.9.2");
/// assert_eq!(opts.to_string(), "make install");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CmdOpts {
  /// The program to execute.
  pub cmd: String,
  /// Arguments, passed without shell interpretation.
  pub args: Vec<String>,
  /// Environment variables to set on top of the inherited environment.
  pub env: BTreeMap<String, String>,
  /// Working directory; the parent's when unset.
  pub cwd: Option<PathBuf>,
  /// Directories prepended to the child's `PATH`.
  pub path: Vec<PathBuf>,
}

impl CmdOpts {
  /// Create a new command with default options.
  pub fn new(cmd: impl Into<String>) -> Self {
    Self {
      cmd: cmd.into(),
      ..Default::default()
    }
  }

  /// Append arguments.
  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Set an environment variable for the command.
  pub fn with_env(mut self, key: &str, value: &str) -> Self {
    self.env.insert(key.to_string(), value.to_string());
    self
  }

  /// Set the working directory for the command.
  pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
    self.cwd = Some(cwd.as_ref().to_path_buf());
    self
  }

  /// Prepend directories to the command's `PATH`.
  pub fn with_path(mut self, dirs: &[PathBuf]) -> Self {
    self.path.extend(dirs.iter().cloned());
    self
  }
}

impl std::fmt::Display for CmdOpts {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.cmd)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// `PATH` for the child: `extra` followed by the inherited entries.
fn child_path(extra: &[PathBuf]) -> Result<OsString> {
  let inherited = std::env::var_os("PATH")
    .map(|p| std::env::split_paths(&p).collect::<Vec<_>>())
    .unwrap_or_default();

  std::env::join_paths(extra.iter().cloned().chain(inherited))
    .map_err(|e| SetupError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))
}

/// Execute a command and wait for it to finish.
///
/// # Returns
///
/// The stdout of the command on success (trimmed). stdout is only read once
/// the process has exited.
///
/// # Errors
///
/// [`SetupError::CmdFailed`] carrying the trimmed stderr if the command exits
/// unsuccessfully, [`SetupError::Io`] if it cannot be spawned.
pub async fn execute_cmd(opts: &CmdOpts) -> Result<String> {
  info!(cmd = %opts, "executing command");

  let mut command = Command::new(&opts.cmd);
  command.args(&opts.args);

  if let Some(cwd) = &opts.cwd {
    command.current_dir(cwd);
  }

  if !opts.path.is_empty() {
    command.env("PATH", child_path(&opts.path)?);
  }

  for (key, value) in &opts.env {
    command.env(key, value);
  }

  debug!(cmd = %opts, working_dir = ?opts.cwd, "spawning process");

  let output = command.output().await?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stderr.is_empty() {
    debug!(stderr = %stderr, "command stderr");
  }

  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }

    return Err(SetupError::CmdFailed {
      cmd: opts.to_string(),
      code: output.status.code(),
      stderr: stderr.trim().to_string(),
    });
  }

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command output");
  }

  Ok(stdout)
}
