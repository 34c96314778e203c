//! Shared test helpers for library integration tests.

use std::path::{Path, PathBuf};

use setup_luarocks_lib::config::{SetupConfig, Toolchain};
use setup_luarocks_lib::platform::Os;
use tempfile::TempDir;

/// Isolated working directory and temp root for one run.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Working directory of the simulated job.
  pub fn cwd(&self) -> PathBuf {
    self.temp.path().join("work")
  }

  /// Runner temp root.
  pub fn temp_root(&self) -> PathBuf {
    self.temp.path().join("runner-temp")
  }

  pub fn build_dir(&self) -> PathBuf {
    self.temp_root().join(".build-luarocks")
  }

  pub fn config(&self, version: &str, os: Os, toolchain: Toolchain) -> SetupConfig {
    SetupConfig {
      luarocks_version: version.to_string(),
      lua_prefix: None,
      cwd: self.cwd(),
      temp_root: self.temp_root(),
      toolchain,
      os,
    }
  }

  /// Read a file below the temp directory.
  pub fn read(&self, path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(self.temp.path().join(path)).unwrap_or_default()
  }
}
