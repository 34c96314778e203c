//! Host operating system detection.

use serde::Serialize;

/// The two installation strategies, selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  /// Prebuilt binaries from the Windows release zip.
  Windows,
  /// Source build with `configure` and `make`.
  Unix,
}

impl Os {
  /// The OS this binary was compiled for.
  pub fn current() -> Self {
    if cfg!(windows) { Os::Windows } else { Os::Unix }
  }

  /// File name of an executable on this OS.
  ///
  /// ```
  /// use setup_luarocks_lib::platform::Os;
  ///
  /// assert_eq!(Os::Windows.exe_name("lua"), "lua.exe");
  /// assert_eq!(Os::Unix.exe_name("lua"), "lua");
  /// ```
  pub fn exe_name(self, name: &str) -> String {
    match self {
      Os::Windows => format!("{}.exe", name),
      Os::Unix => name.to_string(),
    }
  }
}

impl std::fmt::Display for Os {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Os::Windows => write!(f, "windows"),
      Os::Unix => write!(f, "unix"),
    }
  }
}
