//! JSON persistence for the host-local configuration file.
//!
//! The whole configuration lives in a single file, by default
//! `/state/etc/puavo/local/config.json`, replaced as a unit on every
//! submission.  There are no partial updates: readers either see the old
//! file or the new one.
//!
//! # Atomicity
//!
//! `save` writes the serialized configuration to `<path>.tmp` and then
//! renames it over the final path.  The temp file sits next to the final
//! file so the rename never crosses a file-system boundary.  A crash
//! between the two steps leaves the old configuration intact plus a stray
//! `.tmp` file that the next successful save overwrites.

use std::path::{Path, PathBuf};

use thiserror::Error;

use plc_core::Configuration;

use crate::application::session::ConfigRepository;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's JSON could not be parsed, or the configuration could
    /// not be serialized back.
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed store for the host-local configuration.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store over the configuration file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, returning `Configuration::default()` when
    /// the file does not yet exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system errors other than "not
    /// found", and [`StoreError::Json`] if the content is malformed.
    pub fn load(&self) -> Result<Configuration, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let config: Configuration = serde_json::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Configuration::default()),
            Err(e) => Err(StoreError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Replaces the configuration file as a single unit.
    ///
    /// Serializes to compact, newline-terminated JSON.  The parent
    /// directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system failures or
    /// [`StoreError::Json`] if serialization fails.
    pub fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut content = serde_json::to_string(config)?;
        content.push('\n');

        let tmp_path = temp_sibling(&self.path);
        std::fs::write(&tmp_path, content).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Appends `.tmp` to the full file name, keeping the temp file in the same
/// directory as the final file.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

impl ConfigRepository for ConfigStore {
    fn load(&self) -> Result<Configuration, String> {
        ConfigStore::load(self).map_err(|error| error.to_string())
    }

    fn save(&self, config: &Configuration) -> Result<(), String> {
        ConfigStore::save(self, config).map_err(|error| error.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use plc_core::LocalUser;
    use uuid::Uuid;

    fn temp_store() -> (PathBuf, ConfigStore) {
        let dir = std::env::temp_dir().join(format!("plc_store_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = ConfigStore::new(dir.join("config.json"));
        (dir, store)
    }

    fn sample_config() -> Configuration {
        let mut config = Configuration {
            admins: vec!["admin.user".to_string()],
            allow_logins_for: vec!["admin.user".to_string(), "visitor".to_string()],
            allow_remoteadmins: true,
            local_users: vec![LocalUser {
                hashed_password: "$6$salt$digest".to_string(),
                login: "admin.user".to_string(),
                name: "Admin User".to_string(),
            }],
            version: Some(1),
            ..Configuration::default()
        };
        config.licenses.insert("spotify".to_string(), true);
        config
    }

    #[test]
    fn test_load_returns_defaults_when_file_absent() {
        // Arrange
        let (dir, store) = temp_store();

        // Act
        let config = store.load().expect("missing file must yield defaults");

        // Assert
        assert_eq!(config, Configuration::default());
        assert_eq!(config.allow_logins_for, vec!["*"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let (dir, store) = temp_store();
        let config = sample_config();

        // Act
        store.save(&config).expect("save must succeed");
        let loaded = store.load().expect("load must succeed");

        // Assert
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_writes_compact_newline_terminated_json() {
        // Arrange
        let (dir, store) = temp_store();

        // Act
        store.save(&sample_config()).expect("save must succeed");
        let content = std::fs::read_to_string(store.path()).unwrap();

        // Assert: a single compact line plus the trailing newline
        assert!(content.ends_with('\n'));
        assert!(!content.trim_end().contains('\n'));
        assert!(content.starts_with(r#"{"admins":["admin.user"]"#));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_configuration_file_content_is_stable() {
        // Arrange
        let (dir, store) = temp_store();

        // Act
        store.save(&Configuration::default()).expect("save must succeed");
        let content = std::fs::read_to_string(store.path()).unwrap();

        // Assert
        assert_eq!(
            content,
            concat!(
                r#"{"admins":[],"allow_logins_for":["*"],"allow_remoteadmins":false,"#,
                r#""licenses":{},"local_users":[]}"#,
                "\n"
            )
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        // Arrange
        let (dir, store) = temp_store();

        // Act
        store.save(&sample_config()).expect("save must succeed");

        // Assert
        assert!(store.path().exists());
        assert!(!temp_sibling(store.path()).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        // Arrange: the parent directory does not exist yet
        let dir = std::env::temp_dir().join(format!("plc_store_test_{}", Uuid::new_v4()));
        let store = ConfigStore::new(dir.join("nested").join("config.json"));

        // Act
        store.save(&sample_config()).expect("save must create the directory");

        // Assert
        assert!(store.path().exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        // Arrange
        let (dir, store) = temp_store();
        std::fs::write(store.path(), "{ not json").unwrap();

        // Act
        let result = store.load();

        // Assert
        assert!(matches!(result, Err(StoreError::Json(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_temp_sibling_appends_to_the_full_file_name() {
        let tmp = temp_sibling(Path::new("/state/etc/puavo/local/config.json"));
        assert_eq!(tmp, PathBuf::from("/state/etc/puavo/local/config.json.tmp"));
    }
}
