//! Fetch-and-extract protocol for a single archive.
//!
//! Transient transport failures are retried with exponential backoff; a
//! 404 short-circuits to a skip. The archive body is fully written to the
//! download directory before extraction starts, and extraction reads only
//! the on-disk file, so a crash in between leaves a complete archive
//! behind rather than nothing.

use std::path::Path;

use crate::extract::ArchiveExtractor;
use crate::planner;
use crate::retry::{self, RetryAction, RetryConfig};

use super::error::SyncError;
use super::transport::{FetchError, Transport};

/// Terminal state of one archive within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Fetched, stored, and extracted.
    Downloaded,
    /// Absent on the server (404); recorded as seen, never re-fetched.
    SkippedMissing,
}

/// Download one archive into `download_dir` and unpack it into
/// `extract_dir`.
///
/// Errors are fatal for the calling cycle: either the retry budget ran
/// out, the archive could not be stored, or extraction failed (extraction
/// is never retried).
pub async fn fetch_and_extract(
    transport: &dyn Transport,
    extractor: &dyn ArchiveExtractor,
    retry: &RetryConfig,
    url: &str,
    download_dir: &Path,
    extract_dir: &Path,
) -> Result<ItemOutcome, SyncError> {
    let result = retry::retry_with_backoff(
        retry,
        |e: &FetchError| {
            if e.is_retryable() {
                RetryAction::Retry
            } else {
                RetryAction::Abort
            }
        },
        || transport.fetch(url),
    )
    .await;

    let body = match result {
        Ok(body) => body,
        Err(e) if e.is_not_found() => {
            tracing::info!("{} is absent on the server, skipping", url);
            return Ok(ItemOutcome::SkippedMissing);
        }
        Err(source) => {
            return Err(SyncError::RetriesExhausted {
                url: url.to_string(),
                attempts: retry.max_attempts,
                source,
            });
        }
    };

    let archive_path = download_dir.join(planner::basename(url));
    tokio::fs::create_dir_all(download_dir)
        .await
        .map_err(|source| SyncError::Disk {
            path: download_dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(&archive_path, &body)
        .await
        .map_err(|source| SyncError::Disk {
            path: archive_path.clone(),
            source,
        })?;

    extractor
        .extract(&archive_path, extract_dir)
        .await
        .map_err(|source| SyncError::Extract {
            path: archive_path,
            source,
        })?;

    Ok(ItemOutcome::Downloaded)
}
