//! Version specifier parsing and archive resolution.
//!
//! This module turns the requested LuaRocks version into a typed
//! [`VersionSpec`] and resolves it to the archive to download.
//!
//! # Supported Formats
//!
//! - `3.9.2` - Official release
//! - `@v3.9.2` - Git tag from the LuaRocks repository
//! - `@main` - Git branch
//! - `@abc123def` - Git commit
//! - `@` - Default branch (`master`)
//!
//! The `@` form is only recognized on Unix. Windows installs always use the
//! prebuilt release zip, so a leading `@` there is kept as part of the version.

use serde::Serialize;
use thiserror::Error;

use crate::consts::{DEFAULT_BRANCH, RELEASES_URL, REF_SIGIL, SOURCE_ARCHIVE_URL};
use crate::platform::Os;

/// A parsed version specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum VersionSpec {
  /// An official release, e.g. `3.9.2`.
  Release(String),
  /// A branch, tag or commit of the source repository.
  Ref(String),
}

/// Errors that can occur when parsing a version specifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  /// Nothing (or only whitespace) was given.
  #[error("LuaRocks version is empty")]
  Empty,
}

/// An archive to download and the top-level directory it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSource {
  pub url: String,
  pub dir_name: String,
}

/// Parse a raw version specifier for the given OS.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ParseError::Empty`] if the specifier is blank.
///
/// # Example
///
/// ```
/// use setup_luarocks_lib::platform::Os;
/// use setup_luarocks_lib::source::{resolve, VersionSpec};
///
/// assert_eq!(resolve("3.9.2", Os::Unix).unwrap(), VersionSpec::Release("3.9.2".into()));
/// assert_eq!(resolve("@", Os::Unix).unwrap(), VersionSpec::Ref("master".into()));
/// assert_eq!(resolve("@main", Os::Windows).unwrap(), VersionSpec::Release("@main".into()));
/// ```
pub fn resolve(raw: &str, os: Os) -> Result<VersionSpec, ParseError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(ParseError::Empty);
  }

  match os {
    Os::Windows => Ok(VersionSpec::Release(raw.to_string())),
    Os::Unix => Ok(parse(raw)),
  }
}

/// Parse a non-empty specifier with the `@` ref form recognized.
fn parse(raw: &str) -> VersionSpec {
  match raw.strip_prefix(REF_SIGIL) {
    Some("") => VersionSpec::Ref(DEFAULT_BRANCH.to_string()),
    Some(reference) => VersionSpec::Ref(reference.to_string()),
    None => VersionSpec::Release(raw.to_string()),
  }
}

impl VersionSpec {
  /// The release version or reference name, without the sigil.
  pub fn as_str(&self) -> &str {
    match self {
      VersionSpec::Release(v) | VersionSpec::Ref(v) => v,
    }
  }

  /// Whether this names a LuaRocks 2.x version, which needs an extra `make build`.
  pub fn is_legacy(&self) -> bool {
    self.as_str().starts_with("2.")
  }

  /// Resolve the archive to download on the given OS.
  pub fn archive(&self, os: Os) -> ArchiveSource {
    match (os, self) {
      (Os::Windows, spec) => {
        let name = format!("luarocks-{}-windows-64", spec.as_str());
        ArchiveSource {
          url: format!("{}/{}.zip", RELEASES_URL, name),
          dir_name: name,
        }
      }
      (Os::Unix, VersionSpec::Release(version)) => ArchiveSource {
        url: format!("{}/luarocks-{}.tar.gz", RELEASES_URL, version),
        dir_name: format!("luarocks-{}", version),
      },
      (Os::Unix, VersionSpec::Ref(reference)) => ArchiveSource {
        url: format!("{}/{}.tar.gz", SOURCE_ARCHIVE_URL, reference),
        dir_name: format!("luarocks-{}", reference),
      },
    }
  }
}

impl std::fmt::Display for VersionSpec {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      VersionSpec::Release(v) => write!(f, "{}", v),
      VersionSpec::Ref(r) => write!(f, "{}{}", REF_SIGIL, r),
    }
  }
}
