//! Run configuration.
//!
//! Inputs and ambient environment are read once, here. Nothing below the
//! orchestrator looks at process environment again.

use std::path::PathBuf;

use crate::consts::{NATIVE_TOOLCHAIN_MARKER, RUNNER_TEMP};
use crate::error::Result;
use crate::platform::Os;

/// C toolchain available on a Windows runner.
///
/// This is a heuristic: `VCINSTALLDIR` is exported by the Visual Studio
/// developer environment, and a runner without it is assumed to build native
/// rocks with MinGW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
  Msvc,
  MinGw,
}

impl Toolchain {
  /// Guess the toolchain from the process environment.
  pub fn detect() -> Self {
    let marker = std::env::var_os(NATIVE_TOOLCHAIN_MARKER);
    if marker.is_some_and(|v| !v.is_empty()) {
      Toolchain::Msvc
    } else {
      Toolchain::MinGw
    }
  }
}

/// Inputs of a setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
  /// Raw `luaRocksVersion` input.
  pub luarocks_version: String,
  /// Raw `withLuaPath` input.
  pub lua_prefix: Option<PathBuf>,
  pub cwd: PathBuf,
  /// Root for the scratch directory.
  pub temp_root: PathBuf,
  pub toolchain: Toolchain,
  pub os: Os,
}

impl SetupConfig {
  /// Build the configuration from inputs and the current process environment.
  ///
  /// The temp root is `RUNNER_TEMP`, or the OS temp dir when that is unset or empty.
  pub fn from_env(luarocks_version: impl Into<String>, lua_prefix: Option<PathBuf>) -> Result<Self> {
    let cwd = dunce::canonicalize(std::env::current_dir()?)?;
    let temp_root = std::env::var_os(RUNNER_TEMP)
      .filter(|v| !v.is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(std::env::temp_dir);

    Ok(Self {
      luarocks_version: luarocks_version.into(),
      lua_prefix: lua_prefix.filter(|p| !p.as_os_str().is_empty()),
      cwd,
      temp_root,
      toolchain: Toolchain::detect(),
      os: Os::current(),
    })
  }
}
