//! Archive unpacking behind a trait seam.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use zip::ZipArchive;

/// Errors raised while unpacking a downloaded archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("bad archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("disk error: {0}")]
    Disk(#[from] std::io::Error),

    #[error("extraction task failed: {0}")]
    Spawn(#[from] tokio::task::JoinError),
}

/// Unpacks all members of an on-disk archive into a destination
/// directory, creating it if absent.
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError>;
}

/// ZIP extractor. Runs on the blocking pool since `zip` does
/// synchronous I/O.
pub struct ZipExtractor;

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        let archive: PathBuf = archive.to_path_buf();
        let destination: PathBuf = destination.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<(), ExtractError> {
            std::fs::create_dir_all(&destination)?;
            let file = std::fs::File::open(&archive)?;
            let mut zip = ZipArchive::new(file)?;
            zip.extract(&destination)?;
            Ok(())
        })
        .await?
    }
}
