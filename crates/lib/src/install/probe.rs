//! Runtime probes for the target Lua on Windows.
//!
//! Both probes run the ambient `lua` interpreter. The version probe is strict
//! (an unknown format is an error), the C runtime probe is tolerant (anything
//! it cannot classify means "no tag").

use std::path::Path;

use tracing::{info, warn};

use super::InstallContext;
use crate::consts::{PE_PARSER_URL, PE_PARSER_VERSION};
use crate::error::{Result, SetupError};
use crate::host::Host;

/// Answer of the PE parser for binaries linked against `msvcrt.dll`.
const MSVCRT_ANSWER: &str = "MSVCRT";
/// LuaRocks' `MSVCRT` variable value for the classic runtime.
pub const MSVCRT_TAG: &str = "m";

/// Extract `X.Y` from a Lua `_VERSION` string such as `Lua 5.4`.
///
/// `Lua X.Y.Z` is accepted as well. Anything else is reported as
/// [`SetupError::UnrecognizedLuaVersion`].
///
/// ```
/// use setup_luarocks_lib::install::probe::parse_lua_version;
///
/// assert_eq!(parse_lua_version("Lua 5.4\n").unwrap(), "5.4");
/// assert!(parse_lua_version("LuaJIT").is_err());
/// ```
pub fn parse_lua_version(output: &str) -> Result<String> {
  let unrecognized = || SetupError::UnrecognizedLuaVersion(output.to_string());

  let version = output
    .trim()
    .strip_prefix("Lua ")
    .and_then(|rest| rest.split_whitespace().next())
    .ok_or_else(unrecognized)?;

  let parts: Vec<&str> = version.split('.').collect();
  let numeric = parts
    .iter()
    .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
  if !(2..=3).contains(&parts.len()) || !numeric {
    return Err(unrecognized());
  }

  Ok(format!("{}.{}", parts[0], parts[1]))
}

/// Map the PE parser's answer to the LuaRocks `MSVCRT` tag.
///
/// Only an exact `MSVCRT` (after trimming) yields a tag.
pub fn msvcrt_tag(answer: &str) -> Option<&'static str> {
  (answer.trim() == MSVCRT_ANSWER).then_some(MSVCRT_TAG)
}

/// Lua chunk asking the PE parser which C runtime `lua_exe` uses.
pub fn msvcrt_script(parser: &Path, lua_exe: &Path) -> String {
  format!(
    "local pe = assert(loadfile([[{}]]))(); local rt, _ = pe.msvcrt([[{}]]); print(rt or 'nil')",
    parser.display(),
    lua_exe.display()
  )
}

/// URL of the pinned PE parser release and the directory it expands to.
pub fn pe_parser_archive() -> (String, String) {
  (
    format!("{}/version_{}.tar.gz", PE_PARSER_URL, PE_PARSER_VERSION),
    format!("pe-parser-version_{}", PE_PARSER_VERSION),
  )
}

/// Ask the ambient `lua` for its version.
pub async fn lua_version<H: Host>(host: &H, ctx: &InstallContext) -> Result<String> {
  let output = host.run(&ctx.lua(["-e", "print(_VERSION)"])).await?;
  let version = parse_lua_version(&output)?;
  info!(lua_version = %version, "detected Lua version");
  Ok(version)
}

/// Fetch the PE parser and classify the C runtime of the target Lua executable.
pub async fn detect_msvcrt<H: Host>(host: &H, ctx: &InstallContext) -> Result<Option<&'static str>> {
  let (url, dir_name) = pe_parser_archive();
  let tarball = host.download(&url, &ctx.paths.build_dir).await?;
  host.extract(&tarball, &ctx.paths.build_dir).await?;

  let parser = ctx.paths.build_dir.join(dir_name).join("src").join("pe-parser.lua");
  let answer = host
    .run(&ctx.lua(["-e".to_string(), msvcrt_script(&parser, &ctx.paths.lua_exe)]))
    .await?;

  let tag = msvcrt_tag(&answer);
  match tag {
    Some(tag) => info!(tag, "detected C runtime"),
    None => warn!(answer = %answer, "no C runtime tag for the target Lua, leaving MSVCRT unset"),
  }
  Ok(tag)
}
