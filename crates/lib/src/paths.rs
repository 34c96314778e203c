//! Filesystem layout of a setup run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::{BUILD_PREFIX, LUA_PREFIX, LUAROCKS_PREFIX};
use crate::platform::Os;

/// Directories a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPaths {
  /// Scratch directory for downloads and extracted trees.
  pub build_dir: PathBuf,
  /// Where LuaRocks gets installed.
  pub install_prefix: PathBuf,
  /// Existing Lua installation LuaRocks is configured against.
  pub lua_prefix: PathBuf,
  /// `<lua_prefix>/bin/lua[.exe]`
  pub lua_exe: PathBuf,
  #[serde(skip)]
  os: Os,
}

impl InstallPaths {
  /// Derive the layout from the working directory and temp root.
  ///
  /// A relative `lua_prefix` is resolved against `cwd`. Without one, the
  /// default `<cwd>/.lua` is used.
  pub fn new(cwd: &Path, temp_root: &Path, lua_prefix: Option<&Path>, os: Os) -> Self {
    let lua_prefix = match lua_prefix {
      Some(p) => cwd.join(p),
      None => cwd.join(LUA_PREFIX),
    };
    let lua_exe = lua_prefix.join("bin").join(os.exe_name("lua"));

    Self {
      build_dir: temp_root.join(BUILD_PREFIX),
      install_prefix: cwd.join(LUAROCKS_PREFIX),
      lua_prefix,
      lua_exe,
      os,
    }
  }

  pub fn install_bin(&self) -> PathBuf {
    self.install_prefix.join("bin")
  }

  /// Installed `luarocks` executable.
  pub fn luarocks_exe(&self) -> PathBuf {
    self.install_bin().join(self.os.exe_name("luarocks"))
  }

  pub fn lua_libdir(&self) -> PathBuf {
    self.lua_prefix.join("lib")
  }
}
