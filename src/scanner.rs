//! Derives master-data candidates from archives already on disk.
//!
//! Master packages are never listed on a page; their filenames embed a
//! six-digit `YYMMDD` code. Scanning the download tree for codes and
//! substituting them into per-kind URL templates yields the candidate
//! lists for the six master sub-kinds.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::datecode::{self, DateCodeError};
use crate::listing::ARCHIVE_SUFFIX;

/// Collect the distinct six-digit codes embedded in archive filenames
/// under `root`, ordered most recent first.
///
/// Only maximal runs of exactly six digits count; a seven-digit run is
/// not a date code. Traversal order is irrelevant since codes are
/// deduplicated before sorting; unreadable entries are skipped.
pub fn scan_codes(root: &Path) -> Result<Vec<String>, DateCodeError> {
    let digit_runs = Regex::new("[0-9]+").expect("valid pattern");

    let mut codes: HashSet<String> = HashSet::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(ARCHIVE_SUFFIX) {
            continue;
        }
        for run in digit_runs.find_iter(&name) {
            if run.as_str().len() == 6 {
                codes.insert(run.as_str().to_string());
            }
        }
    }

    let mut keyed = codes
        .into_iter()
        .map(|code| Ok((datecode::sort_key(&code)?, code)))
        .collect::<Result<Vec<(String, String)>, DateCodeError>>()?;
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, code)| code).collect())
}

/// Substitute each code into `template`, which carries `{year}` and
/// `{number}` placeholders. Code order is preserved.
pub fn master_urls(codes: &[String], template: &str) -> Result<Vec<String>, DateCodeError> {
    codes
        .iter()
        .map(|code| {
            let year = datecode::year_of(code)?;
            Ok(template
                .replace("{year}", &year.to_string())
                .replace("{number}", code))
        })
        .collect()
}
