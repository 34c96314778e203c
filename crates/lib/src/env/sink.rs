//! Destinations for an [`EnvPatch`](super::EnvPatch).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// Something that can make environment changes visible to later steps.
pub trait EnvSink {
  /// Put `dir` in front of `PATH`.
  fn add_path(&mut self, dir: &Path) -> Result<()>;

  /// Export `name=value`.
  fn export_var(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes to the pipeline's environment files (`GITHUB_PATH` and `GITHUB_ENV`).
///
/// Every line appended to the path file is prepended to `PATH` for the
/// following steps. Variables use `NAME=value`, or a heredoc when the value
/// spans lines.
#[derive(Debug, Clone)]
pub struct GithubEnvSink {
  path_file: PathBuf,
  env_file: PathBuf,
}

impl GithubEnvSink {
  pub const PATH_FILE_VAR: &'static str = "GITHUB_PATH";
  pub const ENV_FILE_VAR: &'static str = "GITHUB_ENV";

  pub fn new(path_file: impl Into<PathBuf>, env_file: impl Into<PathBuf>) -> Self {
    Self {
      path_file: path_file.into(),
      env_file: env_file.into(),
    }
  }

  /// Use the files named by `GITHUB_PATH` and `GITHUB_ENV`, if both are set.
  pub fn from_env() -> Option<Self> {
    let file = |var: &str| std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from);
    Some(Self::new(file(Self::PATH_FILE_VAR)?, file(Self::ENV_FILE_VAR)?))
  }

  fn append(file: &Path, content: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
      let mut f = OpenOptions::new().create(true).append(true).open(file)?;
      f.write_all(content.as_bytes())
    };
    write().map_err(|source| SetupError::EnvFileWrite {
      path: file.to_path_buf(),
      source,
    })
  }
}

impl EnvSink for GithubEnvSink {
  fn add_path(&mut self, dir: &Path) -> Result<()> {
    Self::append(&self.path_file, &format!("{}\n", dir.display()))
  }

  fn export_var(&mut self, name: &str, value: &str) -> Result<()> {
    let line = if value.contains('\n') {
      let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
      if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(SetupError::UnwritableValue { name: name.to_string() });
      }
      format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
      format!("{}={}\n", name, value)
    };
    Self::append(&self.env_file, &line)
  }
}

/// Writes POSIX `export` statements, for use outside the pipeline.
#[derive(Debug)]
pub struct ShellEnvSink<W: Write> {
  out: W,
}

impl<W: Write> ShellEnvSink<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }
}

/// Single-quote a value for a POSIX shell.
fn shell_quote(value: &str) -> String {
  format!("'{}'", value.replace('\'', r"'\''"))
}

impl<W: Write> EnvSink for ShellEnvSink<W> {
  fn add_path(&mut self, dir: &Path) -> Result<()> {
    writeln!(self.out, "export PATH={}:\"$PATH\"", shell_quote(&dir.to_string_lossy()))?;
    Ok(())
  }

  fn export_var(&mut self, name: &str, value: &str) -> Result<()> {
    writeln!(self.out, "export {}={}", name, shell_quote(value))?;
    Ok(())
  }
}
