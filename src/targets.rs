//! Static description of every sync target in the JRDB deployment.
//!
//! Five listing-backed categories plus six master sub-kinds. The three
//! master pairs (CZA/CSA, KZA/KSA, MZA/MSA) share a download directory
//! but keep separate manifests.

use std::path::PathBuf;

use crate::config::Config;
use crate::manifest::ManifestFlavor;

/// One category or master sub-kind's complete configuration for an
/// incremental cycle. Immutable for the duration of a run; each target
/// owns its directories and manifest exclusively.
#[derive(Debug, Clone)]
pub struct SyncTarget {
    pub category: String,
    pub download_dir: PathBuf,
    pub extract_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Basename prefix filtered out of the plan each cycle. The site
    /// lists both weekly packs and `SED_`-style cumulative bundles on
    /// the same page; the bundles are not worth mirroring.
    pub exclude_prefix: Option<String>,
    pub manifest_flavor: ManifestFlavor,
}

/// A listing-backed category: candidates come from its index page.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub page_url: String,
    pub base_url: String,
    pub target: SyncTarget,
}

/// A master sub-kind: candidates are synthesized from scanned codes.
#[derive(Debug, Clone)]
pub struct MasterKind {
    /// URL template with `{year}` and `{number}` placeholders.
    pub template: String,
    pub target: SyncTarget,
}

const CATEGORIES: [(&str, Option<&str>); 5] = [
    ("Paci", None),
    ("Ov", None),
    ("Sed", Some("SED_")),
    ("Skb", Some("SKB_")),
    ("Hjc", Some("HJC_")),
];

const MASTER_KINDS: [(&str, &str, &str); 6] = [
    ("CZA", "Cs", "list_cz.txt"),
    ("CSA", "Cs", "list_cs.txt"),
    ("KZA", "Ks", "list_kz.txt"),
    ("KSA", "Ks", "list_ks.txt"),
    ("MZA", "Ms", "list_mz.txt"),
    ("MSA", "Ms", "list_ms.txt"),
];

pub fn category_pages(config: &Config) -> Vec<CategoryPage> {
    CATEGORIES
        .iter()
        .map(|(name, exclude)| CategoryPage {
            page_url: format!("{}/{}/index.html", config.base_url, name),
            base_url: format!("{}/{}/", config.base_url, name),
            target: SyncTarget {
                category: name.to_string(),
                download_dir: config.zip_dir.join(name),
                extract_dir: config.txt_dir.join(name),
                manifest_path: config.zip_dir.join(name).join("list.txt"),
                exclude_prefix: exclude.map(str::to_string),
                manifest_flavor: ManifestFlavor::Plain,
            },
        })
        .collect()
}

pub fn master_kinds(config: &Config) -> Vec<MasterKind> {
    MASTER_KINDS
        .iter()
        .map(|(name, dir, manifest_file)| MasterKind {
            template: format!("{}/{}/{{year}}/{}{{number}}.zip", config.base_url, dir, name),
            target: SyncTarget {
                category: name.to_string(),
                download_dir: config.zip_dir.join(dir),
                extract_dir: config.txt_dir.join(dir),
                manifest_path: config.zip_dir.join(dir).join(manifest_file),
                exclude_prefix: None,
                manifest_flavor: ManifestFlavor::Plain,
            },
        })
        .collect()
}
