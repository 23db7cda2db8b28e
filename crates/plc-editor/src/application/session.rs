//! EditorSession: drives one editing run end to end.
//!
//! The session owns the load → submit → persist → apply pipeline.  The
//! configuration file is the single source of truth, so every operation
//! starts by loading it; edits never accumulate in memory between runs.
//!
//! Persistence and the update tool sit behind traits ([`ConfigRepository`],
//! [`SystemConfigurator`]) whose real implementations live in the
//! infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use plc_core::{Configuration, FormSubmission, ValidationReport};

use super::submit::{HasherError, PasswordHasher, SubmitError, SubmitUseCase};
use super::ToolError;

/// Access to the persisted configuration file.
pub trait ConfigRepository: Send + Sync {
    /// Loads the current configuration, falling back to built-in defaults
    /// when no file exists yet.
    fn load(&self) -> Result<Configuration, String>;

    /// Replaces the persisted configuration as a single unit.
    fn save(&self, config: &Configuration) -> Result<(), String>;
}

/// Applies the persisted configuration to the running system.
#[async_trait]
pub trait SystemConfigurator: Send + Sync {
    /// Runs the system update tool against the configuration of record.
    async fn apply(&self) -> Result<(), ToolError>;
}

/// Error produced by a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The submission failed validation; nothing was hashed or written.
    #[error("{0}")]
    Validation(ValidationReport),

    /// The password hasher failed; nothing was written.
    #[error("password hashing failed: {0}")]
    Hasher(HasherError),

    /// The configuration file could not be read or written.
    #[error("configuration store failure: {0}")]
    Store(String),

    /// The new configuration was saved, but the update tool reported failure.
    #[error("system update tool failed: {0}")]
    Apply(#[from] ToolError),
}

impl From<SubmitError> for SessionError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::Validation(report) => Self::Validation(report),
            SubmitError::Hasher(error) => Self::Hasher(error),
        }
    }
}

/// One editing session over the host-local configuration.
pub struct EditorSession {
    repository: Arc<dyn ConfigRepository>,
    assembler: SubmitUseCase,
    configurator: Arc<dyn SystemConfigurator>,
}

impl EditorSession {
    /// Creates a session over the given repository, hasher, and update tool.
    pub fn new(
        repository: Arc<dyn ConfigRepository>,
        hasher: Arc<dyn PasswordHasher>,
        configurator: Arc<dyn SystemConfigurator>,
    ) -> Self {
        Self {
            repository,
            assembler: SubmitUseCase::new(hasher),
            configurator,
        }
    }

    /// Returns the configuration of record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the file exists but cannot be
    /// read or parsed.
    pub fn current(&self) -> Result<Configuration, SessionError> {
        self.repository.load().map_err(SessionError::Store)
    }

    /// Returns an editable form seeded from the configuration of record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the configuration cannot be
    /// loaded.
    pub fn seed_form(&self) -> Result<FormSubmission, SessionError> {
        Ok(FormSubmission::seed_from(&self.current()?))
    }

    /// Validates `submission` without touching the file system.
    ///
    /// # Errors
    ///
    /// Returns the per-row [`ValidationReport`] when any row is invalid.
    pub fn check(&self, submission: &FormSubmission) -> Result<(), ValidationReport> {
        plc_core::validate_submission(submission).map(|_| ())
    }

    /// Runs `submission` through the full pipeline: validate, resolve
    /// credentials, persist atomically, then apply to the system.
    ///
    /// # Errors
    ///
    /// Validation, hashing, and store failures leave the previous
    /// configuration in force.  [`SessionError::Apply`] means the new
    /// configuration *was* persisted before the update tool failed.
    pub async fn submit(&self, submission: &FormSubmission) -> Result<Configuration, SessionError> {
        let previous = self.current()?;
        let next = self.assembler.assemble(&previous, submission).await?;
        self.repository.save(&next).map_err(SessionError::Store)?;
        self.configurator.apply().await?;
        Ok(next)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
