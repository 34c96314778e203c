//! Shared fixtures for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Environment variables that leak pipeline state into a run.
const SCRUBBED_VARS: &[&str] = &[
  "INPUT_LUAROCKSVERSION",
  "INPUT_WITHLUAPATH",
  "GITHUB_ACTIONS",
  "GITHUB_PATH",
  "GITHUB_ENV",
  "VCINSTALLDIR",
  "RUST_LOG",
];

/// An isolated working directory and scratch root for one CLI run.
pub struct TestEnv {
  _dir: TempDir,
  root: PathBuf,
}

impl TestEnv {
  pub fn empty() -> Self {
    let dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    std::fs::create_dir_all(root.join("work")).unwrap();
    std::fs::create_dir_all(root.join("tmp")).unwrap();
    Self { _dir: dir, root }
  }

  pub fn cwd(&self) -> PathBuf {
    self.root.join("work")
  }

  pub fn temp_root(&self) -> PathBuf {
    self.root.join("tmp")
  }

  pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
    self.root.join(rel)
  }

  /// The binary under test, run from `cwd()` with a clean pipeline environment.
  pub fn cmd(&self) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("setup-luarocks");
    cmd.current_dir(self.cwd()).env("RUNNER_TEMP", self.temp_root());
    for var in SCRUBBED_VARS {
      cmd.env_remove(var);
    }
    cmd
  }
}
