//! Capability provider.
//!
//! Installers never touch the network, filesystem or processes directly. They
//! go through a [`Host`], which keeps them testable with a scripted fake and
//! keeps every external call a single awaited step.

pub mod archive;
pub mod cmd;
pub mod fetch;

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::trace;

pub use cmd::CmdOpts;

use crate::error::Result;

/// External operations a setup run depends on.
pub trait Host {
  /// Download `url` into `dest_dir` and return the path of the saved file.
  fn download(&self, url: &str, dest_dir: &Path) -> impl Future<Output = Result<PathBuf>> + Send;

  /// Unpack `archive` into `dest`.
  fn extract(&self, archive: &Path, dest: &Path) -> impl Future<Output = Result<()>> + Send;

  /// Create a directory and its parents.
  fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

  /// Remove a directory tree. A missing directory is not an error.
  fn remove_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

  /// Copy a single file.
  fn copy_file(&self, src: &Path, dst: &Path) -> impl Future<Output = Result<()>> + Send;

  /// Run a command to completion and return its trimmed stdout.
  fn run(&self, opts: &CmdOpts) -> impl Future<Output = Result<String>> + Send;
}

/// [`Host`] backed by the real network, filesystem and process table.
#[derive(Debug, Clone)]
pub struct SystemHost {
  client: reqwest::Client,
}

impl SystemHost {
  pub fn new() -> Result<Self> {
    Ok(Self {
      client: fetch::client()?,
    })
  }
}

impl Host for SystemHost {
  async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
    fetch::download(&self.client, url, dest_dir).await
  }

  async fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
    archive::unpack(archive, dest).await
  }

  async fn create_dir_all(&self, path: &Path) -> Result<()> {
    trace!(path = %path.display(), "creating directory");
    tokio::fs::create_dir_all(path).await?;
    Ok(())
  }

  async fn remove_dir_all(&self, path: &Path) -> Result<()> {
    trace!(path = %path.display(), "removing directory");
    match tokio::fs::remove_dir_all(path).await {
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      other => Ok(other?),
    }
  }

  async fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
    trace!(src = %src.display(), dst = %dst.display(), "copying file");
    tokio::fs::copy(src, dst).await?;
    Ok(())
  }

  async fn run(&self, opts: &CmdOpts) -> Result<String> {
    cmd::execute_cmd(opts).await
  }
}
