//! jrdb-sync — incremental mirror of the JRDB data archive.
//!
//! Discovers downloadable packages on the member listing pages, fetches
//! only those not recorded in a per-target manifest, and extracts them
//! into category directories. Master packages, which are never listed,
//! are derived from the six-digit date codes embedded in already-mirrored
//! filenames. Transient fetch failures retry with exponential backoff; a
//! 404 marks the item as permanently absent.

#![warn(clippy::all)]

mod cli;
mod config;
mod datecode;
mod extract;
mod listing;
mod manifest;
mod planner;
mod retry;
mod scanner;
mod sync;
mod targets;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use extract::ZipExtractor;
use sync::transport::HttpTransport;
use sync::{CycleStats, SyncEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = cli.log_level.as_filter();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::info!(
        zip_dir = %config.zip_dir.display(),
        txt_dir = %config.txt_dir.display(),
        "Starting jrdb-sync"
    );

    let transport = HttpTransport::new(
        config.credentials.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    let extractor = ZipExtractor;
    let engine = SyncEngine {
        transport: &transport,
        extractor: &extractor,
        retry: config.retry,
        dry_run: config.dry_run,
        no_progress_bar: config.no_progress_bar,
    };

    let mut failed_targets: Vec<String> = Vec::new();

    for page in targets::category_pages(&config) {
        if !config.wants_category(&page.target.category) {
            continue;
        }
        match engine.sync_category(&page).await {
            Ok(stats) => report_cycle(&page.target.category, stats),
            Err(e) => {
                tracing::error!(category = %page.target.category, "Cycle failed: {e}");
                failed_targets.push(page.target.category.clone());
            }
        }
    }

    if !config.skip_masters {
        let codes = scanner::scan_codes(&config.zip_dir)?;
        tracing::info!(count = codes.len(), "Scanned master date codes");

        for kind in targets::master_kinds(&config) {
            match engine.sync_master(&kind, &codes).await {
                Ok(stats) => report_cycle(&kind.target.category, stats),
                Err(e) => {
                    tracing::error!(category = %kind.target.category, "Cycle failed: {e}");
                    failed_targets.push(kind.target.category.clone());
                }
            }
        }
    }

    if !failed_targets.is_empty() {
        anyhow::bail!(
            "{} target(s) failed: {}",
            failed_targets.len(),
            failed_targets.join(", ")
        );
    }
    Ok(())
}

fn report_cycle(category: &str, stats: CycleStats) {
    tracing::info!(
        category,
        new = stats.new_items,
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        "Cycle complete"
    );
}
