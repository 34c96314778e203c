//! Error types for setup-luarocks-lib.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::ParseError;

/// Errors that abort a setup run.
///
/// Nothing is retried: the first error ends the run and is reported as-is.
#[derive(Debug, Error)]
pub enum SetupError {
  #[error(transparent)]
  Source(#[from] ParseError),

  #[error("download of '{url}' failed: {message}")]
  FetchFailed { url: String, message: String },

  #[error("failed to extract '{}': {message}", .archive.display())]
  ExtractionFailed { archive: PathBuf, message: String },

  #[error(
    "command `{cmd}` failed ({}){}",
    .code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}")),
    if .stderr.is_empty() { String::new() } else { format!(": {}", .stderr) }
  )]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("unrecognized Lua version output: {0:?}")]
  UnrecognizedLuaVersion(String),

  #[error("invalid LuaRocks version '{version}': {source}")]
  InvalidVersion {
    version: String,
    #[source]
    source: semver::Error,
  },

  #[error("value of {name} contains the delimiter used to write it")]
  UnwritableValue { name: String },

  #[error("failed to write '{}': {source}", .path.display())]
  EnvFileWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;
