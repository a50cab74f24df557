//! Sync engine — drives one incremental cycle per target.
//!
//! A cycle diffs the freshly discovered candidate list against the
//! target's manifest, fetches and extracts each new archive
//! sequentially, and commits the full candidate list back to the
//! manifest only when every item ended in a download or a skip. A fatal
//! item failure leaves the manifest untouched so the next run replans
//! the same work.

pub mod error;
pub mod fetcher;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::extract::ArchiveExtractor;
use crate::listing;
use crate::manifest;
use crate::planner;
use crate::retry::RetryConfig;
use crate::scanner;
use crate::targets::{CategoryPage, MasterKind, SyncTarget};

pub use error::SyncError;
pub use fetcher::ItemOutcome;
pub use transport::Transport;

/// What one cycle did, for the end-of-run report.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleStats {
    pub candidates: usize,
    pub new_items: usize,
    pub downloaded: usize,
    pub skipped: usize,
}

/// One engine serves every target in a run; targets own disjoint
/// directories and manifests, so cycles never share mutable state.
pub struct SyncEngine<'a> {
    pub transport: &'a dyn Transport,
    pub extractor: &'a dyn ArchiveExtractor,
    pub retry: RetryConfig,
    pub dry_run: bool,
    pub no_progress_bar: bool,
}

impl SyncEngine<'_> {
    /// Sync one listing-backed category: discover candidates on its
    /// index page, then run the cycle.
    pub async fn sync_category(&self, page: &CategoryPage) -> Result<CycleStats, SyncError> {
        let candidates = listing::discover(self.transport, &page.page_url, &page.base_url)
            .await
            .map_err(|source| SyncError::Listing {
                url: page.page_url.clone(),
                source,
            })?;
        self.run_cycle(&page.target, candidates).await
    }

    /// Sync one master sub-kind from the shared ordered code sequence.
    pub async fn sync_master(
        &self,
        kind: &MasterKind,
        codes: &[String],
    ) -> Result<CycleStats, SyncError> {
        let candidates = scanner::master_urls(codes, &kind.template)?;
        self.run_cycle(&kind.target, candidates).await
    }

    /// Run one incremental cycle for `target` over `candidates`.
    ///
    /// The committed manifest is the full pre-exclusion candidate list:
    /// exclusion is re-applied fresh from the listing on every run, and
    /// items skipped as absent are recorded as seen so they are never
    /// fetched again.
    pub async fn run_cycle(
        &self,
        target: &SyncTarget,
        candidates: Vec<String>,
    ) -> Result<CycleStats, SyncError> {
        let previous = manifest::load(&target.manifest_path, target.manifest_flavor).map_err(
            |source| SyncError::Manifest {
                path: target.manifest_path.clone(),
                source,
            },
        )?;
        let new_items = planner::plan(&candidates, &previous, target.exclude_prefix.as_deref());
        tracing::info!(
            category = %target.category,
            candidates = candidates.len(),
            new = new_items.len(),
            "Planned cycle"
        );

        let pb = create_progress_bar(self.no_progress_bar, new_items.len() as u64);
        let mut stats = CycleStats {
            candidates: candidates.len(),
            new_items: new_items.len(),
            ..CycleStats::default()
        };

        for url in &new_items {
            pb.set_message(planner::basename(url).to_string());
            if self.dry_run {
                tracing::info!("[DRY RUN] Would download {}", url);
                pb.inc(1);
                continue;
            }
            let outcome = fetcher::fetch_and_extract(
                self.transport,
                self.extractor,
                &self.retry,
                url,
                &target.download_dir,
                &target.extract_dir,
            )
            .await;
            match outcome {
                Ok(ItemOutcome::Downloaded) => stats.downloaded += 1,
                Ok(ItemOutcome::SkippedMissing) => stats.skipped += 1,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        if !self.dry_run {
            manifest::save(&target.manifest_path, &candidates).map_err(|source| {
                SyncError::Manifest {
                    path: target.manifest_path.clone(),
                    source,
                }
            })?;
        }

        Ok(stats)
    }
}

/// Progress bar over the cycle's new items.
///
/// Hidden when the user passed `--no-progress-bar` or stdout is not a
/// TTY (piped output, cron jobs).
fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .expect("valid template")
        .progress_chars("=> "),
    );
    pb
}
