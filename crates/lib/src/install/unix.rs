//! Source build for Unix-like hosts.

use std::path::{Path, PathBuf};

use tracing::info;

use super::InstallContext;
use crate::error::Result;
use crate::host::{CmdOpts, Host};
use crate::platform::Os;

/// Extracted source tree for this run.
pub fn source_dir(ctx: &InstallContext) -> PathBuf {
  ctx.paths.build_dir.join(ctx.spec.archive(Os::Unix).dir_name)
}

/// The configure/make sequence, each step running inside `src_dir`.
///
/// LuaRocks 2.x needs a separate `make build`; later versions fold it into `make`.
pub fn build_steps(ctx: &InstallContext, src_dir: &Path) -> Vec<CmdOpts> {
  let configure = ctx.command(src_dir.join("configure").to_string_lossy().into_owned()).with_args([
    format!("--with-lua={}", ctx.paths.lua_prefix.display()),
    format!("--prefix={}", ctx.paths.install_prefix.display()),
  ]);

  let mut steps = vec![configure, ctx.command("make")];
  if ctx.spec.is_legacy() {
    steps.push(ctx.command("make").with_args(["build"]));
  }
  steps.push(ctx.command("make").with_args(["install"]));

  steps.into_iter().map(|step| step.with_cwd(src_dir)).collect()
}

pub async fn install<H: Host>(host: &H, ctx: &InstallContext) -> Result<()> {
  let source = ctx.spec.archive(Os::Unix);
  info!(version = %ctx.spec, url = %source.url, "installing LuaRocks from source");

  let tarball = host.download(&source.url, &ctx.paths.build_dir).await?;
  host.extract(&tarball, &ctx.paths.build_dir).await?;

  let src_dir = source_dir(ctx);
  for step in build_steps(ctx, &src_dir) {
    host.run(&step).await?;
  }

  Ok(())
}

pub fn describe(ctx: &InstallContext) -> Vec<String> {
  let source = ctx.spec.archive(Os::Unix);
  let src_dir = source_dir(ctx);

  let mut steps = vec![
    format!("download {}", source.url),
    format!("extract into {}", ctx.paths.build_dir.display()),
  ];
  steps.extend(build_steps(ctx, &src_dir).iter().map(|s| s.to_string()));
  steps
}
