//! Environment publishing.
//!
//! After installation the new `luarocks` is asked for its own bin directory
//! and module search templates. The result is collected in an [`EnvPatch`]
//! that the caller applies once, through an [`EnvSink`].

pub mod sink;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

pub use sink::{EnvSink, GithubEnvSink, ShellEnvSink};

use crate::error::Result;
use crate::host::Host;
use crate::install::InstallContext;

/// Prefix that keeps Lua's built-in search locations after the exported ones.
pub const DEFAULT_PATH_PREFIX: &str = ";;";

/// Paths reported by `luarocks path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
  /// `luarocks path --lr-bin`
  pub bin: String,
  /// `luarocks path --lr-path`
  pub lua_path: String,
  /// `luarocks path --lr-cpath`
  pub lua_cpath: String,
}

/// Query the installed tool for its paths. Each answer is trimmed.
pub async fn query_tool_paths<H: Host>(host: &H, ctx: &InstallContext) -> Result<ToolPaths> {
  let bin = host.run(&ctx.luarocks(["path", "--lr-bin"])).await?;
  let lua_path = host.run(&ctx.luarocks(["path", "--lr-path"])).await?;
  let lua_cpath = host.run(&ctx.luarocks(["path", "--lr-cpath"])).await?;

  Ok(ToolPaths {
    bin: bin.trim().to_string(),
    lua_path: lua_path.trim().to_string(),
    lua_cpath: lua_cpath.trim().to_string(),
  })
}

/// Environment changes produced by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvPatch {
  /// Directories to put on `PATH`, in the order they were added. Later
  /// entries end up in front.
  pub path: Vec<PathBuf>,
  /// Variables to export.
  pub vars: BTreeMap<String, String>,
}

impl EnvPatch {
  /// Add a directory to the search path. Repeated directories are ignored.
  pub fn add_path(&mut self, dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    if !self.path.iter().any(|p| p == dir) {
      self.path.push(dir.to_path_buf());
    }
  }

  pub fn set_var(&mut self, name: &str, value: impl Into<String>) {
    self.vars.insert(name.to_string(), value.into());
  }

  /// Fold the tool's reported paths in. Empty answers are skipped.
  pub fn publish(&mut self, tool: &ToolPaths) {
    if !tool.bin.is_empty() {
      self.add_path(&tool.bin);
    }
    if !tool.lua_path.is_empty() {
      self.set_var("LUA_PATH", format!("{}{}", DEFAULT_PATH_PREFIX, tool.lua_path));
    }
    if !tool.lua_cpath.is_empty() {
      self.set_var("LUA_CPATH", format!("{}{}", DEFAULT_PATH_PREFIX, tool.lua_cpath));
    }
  }

  pub fn is_empty(&self) -> bool {
    self.path.is_empty() && self.vars.is_empty()
  }

  /// Hand every change to `sink`, paths first.
  pub fn apply<S: EnvSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
    for dir in &self.path {
      info!(dir = %dir.display(), "adding to PATH");
      sink.add_path(dir)?;
    }
    for (name, value) in &self.vars {
      info!(name = %name, "exporting variable");
      sink.export_var(name, value)?;
    }
    Ok(())
  }
}
