//! SubmitUseCase: turns a form submission into the next configuration.
//!
//! This use case glues the pure pipeline from `plc-core` (validate, then
//! assemble) to the one impure step in the middle: resolving each local
//! user's password hash.  Hashing is delegated to a [`PasswordHasher`]
//! trait object so the real `mkpasswd` adapter stays in the
//! infrastructure layer and tests can substitute a recording mock.
//!
//! # Ordering
//!
//! Credentials are resolved strictly sequentially, in row order.  The
//! assembled `local_users`, `admins`, and allow-list orderings all derive
//! from the row order of the submission, so hashing is never done
//! concurrently.  There is no timeout: a hung hasher stalls the
//! submission indefinitely.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use plc_core::{
    assemble_configuration, validate_submission, Configuration, FormSubmission, PasswordChange,
    ResolvedUser, ValidatedUser, ValidationReport,
};

/// Error type for the external password hashing tool.
#[derive(Debug, Error)]
pub enum HasherError {
    /// The hasher process could not be spawned or its I/O failed.
    #[error("hasher process error: {0}")]
    Process(String),

    /// The hasher ran but exited unsuccessfully.
    #[error("hasher rejected the input: {0}")]
    Rejected(String),
}

/// Error produced while turning a submission into a configuration.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more rows failed validation; nothing was hashed or written.
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    /// The password hasher failed; the submission is abandoned.
    #[error("password hashing failed: {0}")]
    Hasher(#[from] HasherError),
}

/// One-way password hashing behind an external tool.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes `plaintext` into the crypt(3) string stored on disk.
    async fn hash(&self, plaintext: &str) -> Result<String, HasherError>;
}

/// The Submit use case.
///
/// Validates a submission against the previous configuration, resolves
/// each row's credential, and assembles the replacement configuration.
pub struct SubmitUseCase {
    hasher: Arc<dyn PasswordHasher>,
}

impl SubmitUseCase {
    /// Creates a new use case with the given password hasher.
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { hasher }
    }

    /// Produces the configuration that should replace `previous`.
    ///
    /// Rows whose password fields were left empty reuse the hash stored
    /// at the same row of `previous` without invoking the hasher at all;
    /// rows beyond the end of the old user list get an empty hash.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Validation`] when any row fails validation
    /// and [`SubmitError::Hasher`] when the external tool fails.  In both
    /// cases `previous` remains the configuration of record.
    pub async fn assemble(
        &self,
        previous: &Configuration,
        submission: &FormSubmission,
    ) -> Result<Configuration, SubmitError> {
        let users = validate_submission(submission)?;

        let mut resolved = Vec::with_capacity(users.len());
        for user in users {
            let ValidatedUser {
                row,
                login,
                name,
                is_admin,
                password,
            } = user;

            let hashed_password = match password {
                PasswordChange::Keep => previous
                    .local_users
                    .get(row)
                    .map(|known| known.hashed_password.clone())
                    .unwrap_or_default(),
                PasswordChange::Set(plaintext) => self.hasher.hash(&plaintext).await?,
            };

            resolved.push(ResolvedUser {
                login,
                name,
                is_admin,
                hashed_password,
            });
        }

        Ok(assemble_configuration(submission, resolved))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
