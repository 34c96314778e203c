//! Platform installers.
//!
//! Exactly one [`Installer`] is chosen per run, from the host OS. Both variants
//! share the [`InstallContext`] built by the orchestrator and only act through
//! a [`Host`].

pub mod probe;
pub mod unix;
pub mod windows;

use std::path::PathBuf;

use crate::config::Toolchain;
use crate::error::Result;
use crate::host::{CmdOpts, Host};
use crate::paths::InstallPaths;
use crate::platform::Os;
use crate::source::VersionSpec;

/// Everything an installer needs to know about the run.
#[derive(Debug, Clone)]
pub struct InstallContext {
  pub os: Os,
  pub spec: VersionSpec,
  pub paths: InstallPaths,
  pub toolchain: Toolchain,
  /// Directories prepended to `PATH` for every child process.
  pub search_path: Vec<PathBuf>,
}

impl InstallContext {
  /// A command that sees the run's search path.
  pub fn command(&self, program: impl Into<String>) -> CmdOpts {
    CmdOpts::new(program).with_path(&self.search_path)
  }

  /// The installed `luarocks` with the given arguments.
  pub fn luarocks<I, S>(&self, args: I) -> CmdOpts
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .command(self.paths.luarocks_exe().to_string_lossy().into_owned())
      .with_args(args)
  }

  /// The `lua` found on the search path, with the given arguments.
  pub fn lua<I, S>(&self, args: I) -> CmdOpts
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.command("lua").with_args(args)
  }
}

/// Installation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
  /// Prebuilt binaries configured for the target Lua.
  Windows,
  /// Source build with `configure` and `make`.
  Unix,
}

impl Installer {
  pub fn for_os(os: Os) -> Self {
    match os {
      Os::Windows => Installer::Windows,
      Os::Unix => Installer::Unix,
    }
  }

  /// Install LuaRocks into `ctx.paths.install_prefix`.
  pub async fn install<H: Host>(self, host: &H, ctx: &InstallContext) -> Result<()> {
    match self {
      Installer::Windows => windows::install(host, ctx).await,
      Installer::Unix => unix::install(host, ctx).await,
    }
  }

  /// Human-readable steps this installer would take.
  ///
  /// Fails for inputs the install itself would reject.
  pub fn describe(self, ctx: &InstallContext) -> Result<Vec<String>> {
    match self {
      Installer::Windows => windows::describe(ctx),
      Installer::Unix => Ok(unix::describe(ctx)),
    }
  }
}
