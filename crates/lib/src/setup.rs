//! The setup run: resolve, install, publish.

use serde::Serialize;
use tracing::info;

use crate::config::SetupConfig;
use crate::env::{EnvPatch, query_tool_paths};
use crate::error::Result;
use crate::host::Host;
use crate::install::{InstallContext, Installer};
use crate::paths::InstallPaths;
use crate::platform::Os;
use crate::source::{ArchiveSource, VersionSpec, resolve};

/// What a run would do, without doing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupPlan {
  pub os: Os,
  pub version: VersionSpec,
  pub archive: ArchiveSource,
  pub paths: InstallPaths,
  pub steps: Vec<String>,
}

fn context(config: &SetupConfig) -> Result<InstallContext> {
  let spec = resolve(&config.luarocks_version, config.os)?;
  let paths = InstallPaths::new(
    &config.cwd,
    &config.temp_root,
    config.lua_prefix.as_deref(),
    config.os,
  );

  Ok(InstallContext {
    os: config.os,
    spec,
    search_path: vec![paths.install_bin()],
    paths,
    toolchain: config.toolchain,
  })
}

/// Resolve the configuration into a [`SetupPlan`].
pub fn plan(config: &SetupConfig) -> Result<SetupPlan> {
  let ctx = context(config)?;
  let installer = Installer::for_os(ctx.os);

  Ok(SetupPlan {
    os: ctx.os,
    archive: ctx.spec.archive(ctx.os),
    steps: installer.describe(&ctx)?,
    version: ctx.spec,
    paths: ctx.paths,
  })
}

/// Install LuaRocks and return the environment changes for later steps.
///
/// The scratch directory is recreated empty. The LuaRocks bin directory is
/// on the children's `PATH` from the start, so the installed tool can be
/// configured and queried. The returned patch is not applied here.
pub async fn run<H: Host>(host: &H, config: &SetupConfig) -> Result<EnvPatch> {
  let ctx = context(config)?;
  info!(
    os = %ctx.os,
    version = %ctx.spec,
    prefix = %ctx.paths.install_prefix.display(),
    lua = %ctx.paths.lua_prefix.display(),
    "setting up LuaRocks"
  );

  host.remove_dir_all(&ctx.paths.build_dir).await?;
  host.create_dir_all(&ctx.paths.build_dir).await?;

  let mut patch = EnvPatch::default();
  patch.add_path(ctx.paths.install_bin());

  Installer::for_os(ctx.os).install(host, &ctx).await?;

  let tool = query_tool_paths(host, &ctx).await?;
  patch.publish(&tool);

  info!(path_entries = patch.path.len(), vars = patch.vars.len(), "LuaRocks ready");
  Ok(patch)
}
