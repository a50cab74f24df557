//! Decides which discovered archives actually need fetching this cycle.

/// Final path segment of a URL.
pub fn basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Filter `candidates` down to the items worth fetching: drop any whose
/// basename starts with `exclude_prefix`, then drop any already present in
/// `manifest`. Order is preserved.
pub fn plan(
    candidates: &[String],
    manifest: &[String],
    exclude_prefix: Option<&str>,
) -> Vec<String> {
    let seen: std::collections::HashSet<&str> = manifest.iter().map(String::as_str).collect();
    candidates
        .iter()
        .filter(|url| match exclude_prefix {
            Some(prefix) => !basename(url).starts_with(prefix),
            None => true,
        })
        .filter(|url| !seen.contains(url.as_str()))
        .cloned()
        .collect()
}
