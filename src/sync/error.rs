//! Error types for the sync engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::datecode::DateCodeError;
use crate::extract::ExtractError;

use super::transport::FetchError;

/// A fatal error that aborts the current target's cycle.
///
/// The target's manifest is left uncommitted so the next run replans the
/// same work; targets that already completed keep their results.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The retry budget for one archive ran out.
    #[error("giving up on {url} after {attempts} attempts: {source}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        source: FetchError,
    },

    /// The category's listing page could not be fetched.
    #[error("failed to fetch listing {url}: {source}")]
    Listing { url: String, source: FetchError },

    /// Writing a downloaded archive to disk failed.
    #[error("failed to store {path}: {source}")]
    Disk {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unpacking a downloaded archive failed. Never retried: re-fetching
    /// a corrupt archive returns the same bytes.
    #[error("failed to extract {path}: {source}")]
    Extract { path: PathBuf, source: ExtractError },

    /// The target's manifest could not be read or rewritten.
    #[error("failed to access manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scanned code carried an out-of-range year fragment.
    #[error(transparent)]
    DateCode(#[from] DateCodeError),
}
