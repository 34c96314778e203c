//! Archive extraction.
//!
//! Supports: .tar.gz (release and source tarballs), .zip (Windows release)

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::info;

use crate::error::{Result, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
  TarGz,
  Zip,
}

impl ArchiveFormat {
  /// Detect the format from the archive's file name.
  pub fn detect(archive: &Path) -> Result<Self> {
    let filename = archive.file_name().and_then(|f| f.to_str()).unwrap_or("");

    if filename.ends_with(".tar.gz") {
      Ok(ArchiveFormat::TarGz)
    } else if filename.ends_with(".zip") {
      Ok(ArchiveFormat::Zip)
    } else {
      Err(SetupError::ExtractionFailed {
        archive: archive.to_path_buf(),
        message: format!("unknown archive format: {}", filename),
      })
    }
  }
}

/// Unpack an archive into `dest`, creating it if needed.
///
/// Runs on the blocking thread pool.
pub async fn unpack(archive: &Path, dest: &Path) -> Result<()> {
  info!(archive = %archive.display(), dest = %dest.display(), "extracting");

  let format = ArchiveFormat::detect(archive)?;
  let archive = archive.to_path_buf();
  let dest = dest.to_path_buf();

  tokio::task::spawn_blocking(move || unpack_blocking(format, &archive, &dest))
    .await
    .map_err(|e| SetupError::Io(io::Error::other(e)))?
}

fn unpack_blocking(format: ArchiveFormat, archive: &Path, dest: &Path) -> Result<()> {
  fs::create_dir_all(dest)?;

  let result = match format {
    ArchiveFormat::TarGz => unpack_tar_gz(archive, dest),
    ArchiveFormat::Zip => unpack_zip(archive, dest),
  };

  result.map_err(|message| SetupError::ExtractionFailed {
    archive: archive.to_path_buf(),
    message,
  })
}

fn unpack_tar_gz(archive: &Path, dest: &Path) -> std::result::Result<(), String> {
  let file = File::open(archive).map_err(|e| e.to_string())?;
  let decoder = GzDecoder::new(BufReader::new(file));
  Archive::new(decoder).unpack(dest).map_err(|e| e.to_string())
}

fn unpack_zip(archive: &Path, dest: &Path) -> std::result::Result<(), String> {
  let file = File::open(archive).map_err(|e| e.to_string())?;
  let mut archive = zip::ZipArchive::new(file).map_err(|e| format!("failed to open zip: {}", e))?;

  for i in 0..archive.len() {
    let mut entry = archive
      .by_index(i)
      .map_err(|e| format!("failed to read zip entry: {}", e))?;

    let outpath: PathBuf = match entry.enclosed_name() {
      Some(path) => dest.join(path),
      None => continue,
    };

    if entry.is_dir() {
      fs::create_dir_all(&outpath).map_err(|e| e.to_string())?;
    } else {
      if let Some(parent) = outpath.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
      }
      let mut outfile = File::create(&outpath).map_err(|e| e.to_string())?;
      io::copy(&mut entry, &mut outfile).map_err(|e| e.to_string())?;
    }

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      if let Some(mode) = entry.unix_mode() {
        fs::set_permissions(&outpath, fs::Permissions::from_mode(mode)).map_err(|e| e.to_string())?;
      }
    }
  }

  Ok(())
}
