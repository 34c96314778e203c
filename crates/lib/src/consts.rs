pub const APP_NAME: &str = "setup-luarocks";

/// Scratch directory created under the temp root for downloads and builds.
pub const BUILD_PREFIX: &str = ".build-luarocks";
/// Default location of an existing Lua installation, relative to the working directory.
pub const LUA_PREFIX: &str = ".lua";
/// Location of the LuaRocks installation, relative to the working directory.
pub const LUAROCKS_PREFIX: &str = ".luarocks";

/// Host of the official release tarballs and Windows zips.
pub const RELEASES_URL: &str = "https://luarocks.org/releases";
/// Source-control archive endpoint for branch, tag and commit downloads.
pub const SOURCE_ARCHIVE_URL: &str = "https://github.com/luarocks/luarocks/archive";

/// Marks a version specifier as a source-control reference.
pub const REF_SIGIL: char = '@';
/// Reference used when the specifier is the bare sigil.
pub const DEFAULT_BRANCH: &str = "master";

/// Pinned release of https://github.com/Tieske/pe-parser.
pub const PE_PARSER_VERSION: &str = "0.6";
pub const PE_PARSER_URL: &str = "https://github.com/Tieske/pe-parser/archive/refs/tags";

/// LuaRocks releases older than this need the MinGW compiler set explicitly.
pub const MINGW_OVERRIDE_BEFORE: &str = "3.9.2";
pub const MINGW_GCC: &str = "x86_64-w64-mingw32-gcc";

/// Set by the Visual Studio developer shell. Its absence is taken to mean MinGW.
pub const NATIVE_TOOLCHAIN_MARKER: &str = "VCINSTALLDIR";

/// Pipeline temp root; falls back to the OS temp dir when unset.
pub const RUNNER_TEMP: &str = "RUNNER_TEMP";

/// Executables shipped in the Windows release zip.
pub const WINDOWS_EXECUTABLES: [&str; 2] = ["luarocks.exe", "luarocks-admin.exe"];
