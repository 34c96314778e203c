//! HTTP downloads.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::consts::APP_NAME;
use crate::error::{Result, SetupError};

/// Build the HTTP client used for all downloads.
pub fn client() -> Result<reqwest::Client> {
  reqwest::Client::builder()
    .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
    .build()
    .map_err(|e| SetupError::FetchFailed {
      url: String::new(),
      message: e.to_string(),
    })
}

/// Last path segment of a URL, ignoring query and fragment.
///
/// ```
/// use setup_luarocks_lib::host::fetch::file_name_from_url;
///
/// assert_eq!(file_name_from_url("https://luarocks.org/releases/luarocks-3.9.2.tar.gz"), "luarocks-3.9.2.tar.gz");
/// assert_eq!(file_name_from_url("https://example.com/a.zip?token=1"), "a.zip");
/// assert_eq!(file_name_from_url("https://example.com/"), "download");
/// ```
pub fn file_name_from_url(url: &str) -> &str {
  let without_query = url.split(['?', '#']).next().unwrap_or(url);
  match without_query.rsplit('/').next() {
    Some(name) if !name.is_empty() => name,
    _ => "download",
  }
}

/// Download `url` into `dest_dir`, named after the URL's last segment.
///
/// The body is written to a temporary file first and renamed into place, so a
/// failed download never leaves a truncated archive behind.
///
/// # Errors
///
/// [`SetupError::FetchFailed`] for connection errors and non-success HTTP statuses.
pub async fn download(client: &reqwest::Client, url: &str, dest_dir: &Path) -> Result<PathBuf> {
  info!(url = %url, "downloading");

  let fetch_failed = |e: reqwest::Error| SetupError::FetchFailed {
    url: url.to_string(),
    message: e.to_string(),
  };

  let response = client
    .get(url)
    .send()
    .await
    .and_then(|r| r.error_for_status())
    .map_err(fetch_failed)?;
  let bytes = response.bytes().await.map_err(fetch_failed)?;

  debug!(url = %url, bytes = bytes.len(), "download complete");

  tokio::fs::create_dir_all(dest_dir).await?;
  let dest = dest_dir.join(file_name_from_url(url));
  let dir = dest_dir.to_path_buf();

  tokio::task::spawn_blocking(move || -> Result<PathBuf> {
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(&dest).map_err(|e| SetupError::Io(e.error))?;
    Ok(dest)
  })
  .await
  .map_err(|e| SetupError::Io(std::io::Error::other(e)))?
}
