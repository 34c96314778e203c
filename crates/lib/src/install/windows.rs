//! Prebuilt-binary install for Windows hosts.

use std::path::PathBuf;

use tracing::info;

use super::{InstallContext, probe};
use crate::config::Toolchain;
use crate::consts::{MINGW_GCC, MINGW_OVERRIDE_BEFORE, WINDOWS_EXECUTABLES};
use crate::error::{Result, SetupError};
use crate::host::Host;
use crate::platform::Os;

/// Parse a LuaRocks release number, padding `X` and `X.Y` to three components.
///
/// ```
/// use setup_luarocks_lib::install::windows::parse_release;
///
/// assert_eq!(parse_release("3.11").unwrap(), semver::Version::new(3, 11, 0));
/// assert!(parse_release("@main").is_err());
/// ```
pub fn parse_release(version: &str) -> Result<semver::Version> {
  let padded = match version.matches('.').count() {
    0 => format!("{}.0.0", version),
    1 => format!("{}.0", version),
    _ => version.to_string(),
  };

  semver::Version::parse(&padded).map_err(|source| SetupError::InvalidVersion {
    version: version.to_string(),
    source,
  })
}

/// Releases before 3.9.2 misdetect the MinGW compiler and need CC/LD set.
pub fn needs_mingw_override(version: &str) -> Result<bool> {
  Ok(parse_release(version)? < parse_release(MINGW_OVERRIDE_BEFORE)?)
}

fn extracted_dir(ctx: &InstallContext) -> PathBuf {
  ctx.paths.build_dir.join(ctx.spec.archive(Os::Windows).dir_name)
}

/// Run `luarocks config <key> <value>`.
async fn set_config<H: Host>(host: &H, ctx: &InstallContext, key: &str, value: &str) -> Result<()> {
  info!(key, value, "configuring LuaRocks");
  host.run(&ctx.luarocks(["config", key, value])).await?;
  Ok(())
}

pub async fn install<H: Host>(host: &H, ctx: &InstallContext) -> Result<()> {
  let source = ctx.spec.archive(Os::Windows);
  info!(version = %ctx.spec, url = %source.url, "installing prebuilt LuaRocks");

  let zip = host.download(&source.url, &ctx.paths.build_dir).await?;
  host.extract(&zip, &ctx.paths.build_dir).await?;

  let src_dir = extracted_dir(ctx);
  let bin = ctx.paths.install_bin();
  host.create_dir_all(&bin).await?;
  for exe in WINDOWS_EXECUTABLES {
    host.copy_file(&src_dir.join(exe), &bin.join(exe)).await?;
  }

  let lua_version = probe::lua_version(host, ctx).await?;
  set_config(host, ctx, "lua_version", &lua_version).await?;
  set_config(host, ctx, "LUA_LIBDIR", &ctx.paths.lua_libdir().to_string_lossy()).await?;

  if ctx.toolchain == Toolchain::MinGw {
    if needs_mingw_override(ctx.spec.as_str())? {
      set_config(host, ctx, "variables.CC", MINGW_GCC).await?;
      set_config(host, ctx, "variables.LD", MINGW_GCC).await?;
    }

    if let Some(tag) = probe::detect_msvcrt(host, ctx).await? {
      set_config(host, ctx, "variables.MSVCRT", tag).await?;
    }
  }

  Ok(())
}

pub fn describe(ctx: &InstallContext) -> Result<Vec<String>> {
  let source = ctx.spec.archive(Os::Windows);
  let bin = ctx.paths.install_bin();

  let mut steps = vec![
    format!("download {}", source.url),
    format!("extract into {}", ctx.paths.build_dir.display()),
  ];
  steps.extend(
    WINDOWS_EXECUTABLES
      .iter()
      .map(|exe| format!("copy {} to {}", exe, bin.display())),
  );
  steps.push("luarocks config lua_version <detected>".to_string());
  steps.push(format!("luarocks config LUA_LIBDIR {}", ctx.paths.lua_libdir().display()));

  if ctx.toolchain == Toolchain::MinGw {
    if needs_mingw_override(ctx.spec.as_str())? {
      steps.push(format!("luarocks config variables.CC {}", MINGW_GCC));
      steps.push(format!("luarocks config variables.LD {}", MINGW_GCC));
    }
    let (url, _) = probe::pe_parser_archive();
    steps.push(format!("download {}", url));
    steps.push("luarocks config variables.MSVCRT <detected>".to_string());
  }

  Ok(steps)
}
