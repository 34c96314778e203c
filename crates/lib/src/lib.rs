//! setup-luarocks-lib: bootstraps a LuaRocks installation for a build pipeline.
//!
//! The crate resolves a requested LuaRocks version into an archive, installs it
//! with the strategy matching the host operating system, and computes the
//! environment changes (`PATH`, `LUA_PATH`, `LUA_CPATH`) that later pipeline
//! steps need.
//!
//! # Flow
//!
//! 1. [`config::SetupConfig`] captures inputs and the ambient environment once.
//! 2. [`setup::run`] prepares the scratch directory and picks an
//!    [`install::Installer`] for the host OS.
//! 3. The installer drives a [`host::Host`] (download, extract, copy, run).
//! 4. The freshly installed tool is queried for its own paths and the result is
//!    returned as an [`env::EnvPatch`].
//! 5. The caller applies the patch through an [`env::EnvSink`].

pub mod config;
pub mod consts;
pub mod env;
pub mod error;
pub mod host;
pub mod install;
pub mod paths;
pub mod platform;
pub mod setup;
pub mod source;
pub mod util;

pub use error::{Result, SetupError};
