//! License overview: catalog entries merged with stored and reported state.
//!
//! Restricted packages ship a license descriptor per package on the
//! device image.  Whether the operator has *accepted* a license lives in
//! the persisted configuration; whether the package is actually *present*
//! on disk is only known to the restricted-package tool.  This use case
//! merges the three sources into one row per package for display.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use plc_core::Configuration;

use super::ToolError;

/// One entry of the on-disk license catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseInfo {
    /// Package key, taken from the catalog sub-directory name.
    pub key: String,
    /// Human-readable license name.
    pub name: String,
    /// Where the full license text lives.
    pub url: String,
}

/// A catalog entry merged with acceptance and download state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseStatus {
    pub key: String,
    pub name: String,
    pub url: String,
    /// Whether the configuration of record accepts this license.
    pub accepted: bool,
    /// Whether the package tool reports the package as present on disk.
    pub downloaded: bool,
}

/// The restricted-package helper tools.
#[async_trait]
pub trait RestrictedPackageTool: Send + Sync {
    /// Returns the key → downloaded map reported by the package tool.
    async fn download_states(&self) -> Result<HashMap<String, bool>, ToolError>;

    /// Fetches the restricted package behind `key`.
    async fn download(&self, key: &str) -> Result<(), ToolError>;
}

/// The Manage Licenses use case.
pub struct ManageLicensesUseCase {
    package_tool: Arc<dyn RestrictedPackageTool>,
}

impl ManageLicensesUseCase {
    /// Creates a new use case over the given package tool.
    pub fn new(package_tool: Arc<dyn RestrictedPackageTool>) -> Self {
        Self { package_tool }
    }

    /// Merges `catalog` with the download report and the acceptance flags
    /// stored in `config`, preserving catalog order.
    ///
    /// Packages the tool does not report and licenses the configuration
    /// does not mention both default to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the package tool cannot be run.
    pub async fn overview(
        &self,
        catalog: Vec<LicenseInfo>,
        config: &Configuration,
    ) -> Result<Vec<LicenseStatus>, ToolError> {
        let states = self.package_tool.download_states().await?;

        Ok(catalog
            .into_iter()
            .map(|entry| {
                let accepted = config.licenses.get(&entry.key).copied().unwrap_or(false);
                let downloaded = states.get(&entry.key).copied().unwrap_or(false);
                LicenseStatus {
                    key: entry.key,
                    name: entry.name,
                    url: entry.url,
                    accepted,
                    downloaded,
                }
            })
            .collect())
    }

    /// Downloads one restricted package.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the download tool fails; other packages
    /// are unaffected.
    pub async fn download(&self, key: &str) -> Result<(), ToolError> {
        self.package_tool.download(key).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPackageTool {
        states: HashMap<String, bool>,
        downloads: Mutex<Vec<String>>,
        should_fail: bool,
    }

    #[async_trait]
    impl RestrictedPackageTool for RecordingPackageTool {
        async fn download_states(&self) -> Result<HashMap<String, bool>, ToolError> {
            if self.should_fail {
                return Err(ToolError::Spawn {
                    command: "mock-tool".into(),
                    message: "mock failure".into(),
                });
            }
            Ok(self.states.clone())
        }

        async fn download(&self, key: &str) -> Result<(), ToolError> {
            if self.should_fail {
                return Err(ToolError::Spawn {
                    command: "mock-tool".into(),
                    message: "mock failure".into(),
                });
            }
            self.downloads.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    fn catalog_entry(key: &str) -> LicenseInfo {
        LicenseInfo {
            key: key.to_string(),
            name: format!("{key} license"),
            url: format!("https://example.com/{key}"),
        }
    }

    fn config_accepting(keys: &[&str]) -> Configuration {
        let mut config = Configuration::default();
        for key in keys {
            config.licenses.insert((*key).to_string(), true);
        }
        config
    }

    #[tokio::test]
    async fn test_overview_merges_acceptance_and_download_state() {
        // Arrange: spotify accepted + downloaded, vidyo neither
        let tool = Arc::new(RecordingPackageTool {
            states: HashMap::from([("spotify".to_string(), true)]),
            ..RecordingPackageTool::default()
        });
        let use_case =
            ManageLicensesUseCase::new(Arc::clone(&tool) as Arc<dyn RestrictedPackageTool>);
        let catalog = vec![catalog_entry("spotify"), catalog_entry("vidyo")];

        // Act
        let rows = use_case
            .overview(catalog, &config_accepting(&["spotify"]))
            .await
            .expect("overview must succeed");

        // Assert
        assert_eq!(rows.len(), 2);
        assert!(rows[0].accepted && rows[0].downloaded);
        assert!(!rows[1].accepted && !rows[1].downloaded);
    }

    #[tokio::test]
    async fn test_packages_missing_from_the_report_count_as_not_downloaded() {
        // Arrange: the tool reports nothing at all
        let tool = Arc::new(RecordingPackageTool::default());
        let use_case =
            ManageLicensesUseCase::new(Arc::clone(&tool) as Arc<dyn RestrictedPackageTool>);

        // Act
        let rows = use_case
            .overview(vec![catalog_entry("spotify")], &Configuration::default())
            .await
            .expect("overview must succeed");

        // Assert
        assert!(!rows[0].downloaded);
    }

    #[tokio::test]
    async fn test_tool_failure_propagates() {
        // Arrange
        let tool = Arc::new(RecordingPackageTool {
            should_fail: true,
            ..RecordingPackageTool::default()
        });
        let use_case =
            ManageLicensesUseCase::new(Arc::clone(&tool) as Arc<dyn RestrictedPackageTool>);

        // Act
        let result = use_case
            .overview(vec![catalog_entry("spotify")], &Configuration::default())
            .await;

        // Assert
        assert!(matches!(result, Err(ToolError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_download_delegates_the_key_to_the_tool() {
        // Arrange
        let tool = Arc::new(RecordingPackageTool::default());
        let use_case =
            ManageLicensesUseCase::new(Arc::clone(&tool) as Arc<dyn RestrictedPackageTool>);

        // Act
        use_case.download("spotify").await.expect("download must succeed");

        // Assert
        assert_eq!(*tool.downloads.lock().unwrap(), vec!["spotify".to_string()]);
    }
}
