//! File-system license catalog scanner.
//!
//! The catalog lives under a base directory, by default
//! `/usr/share/puavo-ltsp-client/restricted-packages`, with one
//! sub-directory per package:
//!
//! ```text
//! restricted-packages/
//!   spotify/
//!     license.json        {"name": "...", "url": "..."}
//!   vidyodesktop/
//!     license.json
//! ```
//!
//! The sub-directory name is the package key.  Malformed descriptors are
//! skipped with a warning; a missing base directory yields an empty
//! catalog.  Entries are returned sorted by key so the overview is stable
//! across runs.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::application::licenses::LicenseInfo;

/// Shape of one `license.json` descriptor.
#[derive(Debug, Deserialize)]
struct LicenseDescriptor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

/// Scanner over the on-disk license catalog.
pub struct LicenseCatalog {
    base_dir: PathBuf,
}

impl LicenseCatalog {
    /// Creates a catalog over `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Reads every package's descriptor, skipping unusable entries.
    pub fn scan(&self) -> Vec<LicenseInfo> {
        let entries = match std::fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "cannot read license catalog at {}: {e}",
                    self.base_dir.display()
                );
                return Vec::new();
            }
        };

        let mut catalog = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let key = match entry.file_name().into_string() {
                Ok(key) => key,
                Err(_) => {
                    warn!(
                        "skipping license directory with a non-UTF-8 name in {}",
                        self.base_dir.display()
                    );
                    continue;
                }
            };

            let descriptor_path = path.join("license.json");
            let content = match std::fs::read_to_string(&descriptor_path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(
                        "skipping license `{key}`: cannot read {}: {e}",
                        descriptor_path.display()
                    );
                    continue;
                }
            };
            let descriptor: LicenseDescriptor = match serde_json::from_str(&content) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!("skipping license `{key}`: malformed descriptor: {e}");
                    continue;
                }
            };
            if descriptor.name.trim().is_empty() || descriptor.url.trim().is_empty() {
                warn!("skipping license `{key}`: descriptor is missing name or url");
                continue;
            }

            catalog.push(LicenseInfo {
                key,
                name: descriptor.name,
                url: descriptor.url,
            });
        }

        catalog.sort_by(|a, b| a.key.cmp(&b.key));
        catalog
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
