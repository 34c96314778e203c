//! Test utilities for setup-luarocks-lib.
//!
//! This module provides cross-platform helpers for tests that need to execute
//! shell commands, and [`FakeHost`], a scripted [`Host`] that records every
//! call instead of touching the network or spawning processes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, SetupError};
use crate::host::fetch::file_name_from_url;
use crate::host::{CmdOpts, Host};

/// Returns the shell command and args to echo an environment variable.
///
/// Since environment variable expansion requires a shell, this returns
/// the shell binary and appropriate arguments.
#[cfg(unix)]
pub fn shell_echo_env(var: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), format!("echo \"${}\"", var)])
}

#[cfg(windows)]
pub fn shell_echo_env(var: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), format!("echo %{}%", var)])
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  // Use PowerShell to create an empty file - more reliable than cmd.exe approaches
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// A call made against a [`FakeHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  Download { url: String, dest_dir: PathBuf },
  Extract { archive: PathBuf, dest: PathBuf },
  CreateDir(PathBuf),
  RemoveDir(PathBuf),
  Copy { src: PathBuf, dst: PathBuf },
  Run(CmdOpts),
}

/// Short form of a command: program file stem followed by its arguments.
///
/// ```
/// use setup_luarocks_lib::host::CmdOpts;
/// use setup_luarocks_lib::util::testutil::command_line;
///
/// let opts = CmdOpts::new("/work/.luarocks/bin/luarocks").with_args(["path", "--lr-bin"]);
/// assert_eq!(command_line(&opts), "luarocks path --lr-bin");
/// ```
pub fn command_line(opts: &CmdOpts) -> String {
  let program = Path::new(&opts.cmd)
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| opts.cmd.clone());

  std::iter::once(program)
    .chain(opts.args.iter().cloned())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Scripted [`Host`] for tests.
///
/// Filesystem operations are real (use a temp directory), everything else is
/// recorded. Downloads produce an empty file, extraction creates the entries
/// registered with [`FakeHost::with_archive`], and commands answer with the
/// stdout registered for the first matching [`command_line`] prefix.
#[derive(Debug, Default)]
pub struct FakeHost {
  calls: Mutex<Vec<Call>>,
  responses: Vec<(String, String)>,
  failing_commands: Vec<String>,
  failing_downloads: Vec<String>,
  archives: HashMap<String, Vec<String>>,
}

impl FakeHost {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answer commands starting with `prefix` with `stdout`.
  pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
    self.responses.push((prefix.to_string(), stdout.to_string()));
    self
  }

  /// Make commands starting with `prefix` exit with status 1.
  pub fn fail_command(mut self, prefix: &str) -> Self {
    self.failing_commands.push(prefix.to_string());
    self
  }

  /// Make downloads whose URL contains `pattern` fail with a 404.
  pub fn fail_download(mut self, pattern: &str) -> Self {
    self.failing_downloads.push(pattern.to_string());
    self
  }

  /// Files created when the archive named `file_name` is extracted.
  pub fn with_archive(mut self, file_name: &str, entries: &[&str]) -> Self {
    self
      .archives
      .insert(file_name.to_string(), entries.iter().map(|e| e.to_string()).collect());
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().map(|c| c.clone()).unwrap_or_default()
  }

  /// Every command run so far, in [`command_line`] form.
  pub fn commands(&self) -> Vec<String> {
    self
      .calls()
      .iter()
      .filter_map(|call| match call {
        Call::Run(opts) => Some(command_line(opts)),
        _ => None,
      })
      .collect()
  }

  /// Every command run so far, with full options.
  pub fn command_opts(&self) -> Vec<CmdOpts> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        Call::Run(opts) => Some(opts),
        _ => None,
      })
      .collect()
  }

  /// Every URL downloaded so far.
  pub fn downloads(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        Call::Download { url, .. } => Some(url),
        _ => None,
      })
      .collect()
  }

  fn record(&self, call: Call) {
    if let Ok(mut calls) = self.calls.lock() {
      calls.push(call);
    }
  }
}

impl Host for FakeHost {
  async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
    self.record(Call::Download {
      url: url.to_string(),
      dest_dir: dest_dir.to_path_buf(),
    });

    if self.failing_downloads.iter().any(|p| url.contains(p.as_str())) {
      return Err(SetupError::FetchFailed {
        url: url.to_string(),
        message: "HTTP status client error (404 Not Found)".to_string(),
      });
    }

    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(file_name_from_url(url));
    fs::write(&dest, "")?;
    Ok(dest)
  }

  async fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
    self.record(Call::Extract {
      archive: archive.to_path_buf(),
      dest: dest.to_path_buf(),
    });

    let name = archive.file_name().and_then(|n| n.to_str()).unwrap_or("");
    for entry in self.archives.get(name).into_iter().flatten() {
      let path = dest.join(entry);
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
      }
      fs::write(&path, "")?;
    }
    Ok(())
  }

  async fn create_dir_all(&self, path: &Path) -> Result<()> {
    self.record(Call::CreateDir(path.to_path_buf()));
    fs::create_dir_all(path)?;
    Ok(())
  }

  async fn remove_dir_all(&self, path: &Path) -> Result<()> {
    self.record(Call::RemoveDir(path.to_path_buf()));
    match fs::remove_dir_all(path) {
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      other => Ok(other?),
    }
  }

  async fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
    self.record(Call::Copy {
      src: src.to_path_buf(),
      dst: dst.to_path_buf(),
    });
    fs::copy(src, dst)?;
    Ok(())
  }

  async fn run(&self, opts: &CmdOpts) -> Result<String> {
    self.record(Call::Run(opts.clone()));
    let line = command_line(opts);

    if self.failing_commands.iter().any(|p| line.starts_with(p.as_str())) {
      return Err(SetupError::CmdFailed {
        cmd: opts.to_string(),
        code: Some(1),
        stderr: String::new(),
      });
    }

    Ok(
      self
        .responses
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix.as_str()))
        .map(|(_, stdout)| stdout.trim().to_string())
        .unwrap_or_default(),
    )
  }
}
