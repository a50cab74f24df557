//! Per-target manifest of already-seen archive URLs.
//!
//! A manifest is a newline-joined list of URLs, rewritten wholesale at the
//! end of each successful cycle. It records everything the cycle *saw*,
//! not just what it downloaded, so items skipped as absent on the server
//! are never re-fetched.

use std::fs;
use std::io;
use std::path::Path;

/// On-disk manifest format.
///
/// Early deployments wrote a three-line header before the URL list;
/// `Headered` reads those files. New manifests are always `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFlavor {
    #[default]
    Plain,
    Headered,
}

/// Number of lines the `Headered` flavor discards before the URL list.
const HEADER_LINES: usize = 3;

/// Read the manifest at `path`. A missing file is an empty manifest.
pub fn load(path: &Path, flavor: ManifestFlavor) -> io::Result<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let skip = match flavor {
        ManifestFlavor::Plain => 0,
        ManifestFlavor::Headered => HEADER_LINES,
    };
    Ok(contents.lines().skip(skip).map(str::to_owned).collect())
}

/// Overwrite the manifest at `path` with `ids`, creating parent
/// directories as needed.
///
/// The contents are written to a `.tmp` sibling and renamed into place so
/// a crash mid-write cannot leave a truncated manifest behind.
pub fn save(path: &Path, ids: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, ids.join("\n"))?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        assert!(load(&path, ManifestFlavor::Plain).unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let ids = vec![
            "http://example.com/a.zip".to_string(),
            "http://example.com/b.zip".to_string(),
        ];
        save(&path, &ids).unwrap();
        assert_eq!(load(&path, ManifestFlavor::Plain).unwrap(), ids);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Paci").join("list.txt");
        save(&path, &["x".to_string()]).unwrap();
        assert_eq!(load(&path, ManifestFlavor::Plain).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        save(&path, &["old-1".to_string(), "old-2".to_string()]).unwrap();
        save(&path, &["new".to_string()]).unwrap();
        assert_eq!(load(&path, ManifestFlavor::Plain).unwrap(), vec!["new"]);
    }

    #[test]
    fn test_save_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        save(&path, &[]).unwrap();
        assert!(load(&path, ManifestFlavor::Plain).unwrap().is_empty());
    }

    #[test]
    fn test_headered_flavor_skips_three_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "header 1\nheader 2\nheader 3\nurl-a\nurl-b").unwrap();
        assert_eq!(
            load(&path, ManifestFlavor::Headered).unwrap(),
            vec!["url-a", "url-b"]
        );
        assert_eq!(
            load(&path, ManifestFlavor::Plain).unwrap().len(),
            5,
            "plain flavor keeps every line"
        );
    }
}
