//! # plc-core
//!
//! Shared library for the Puavo local-login configuration editor containing
//! the persisted configuration entities, the structured form-submission
//! model, field validation, and configuration assembly.
//!
//! This crate is pure: it has zero dependencies on the file system, child
//! processes, or async runtimes, so every rule in it can be unit-tested
//! without touching the machine.
//!
//! # How a submission becomes a configuration (for beginners)
//!
//! The editor manages one JSON file that decides who may log in to a Puavo
//! machine.  The flow through this crate is a straight line:
//!
//! - **`domain`** – The two data shapes.  `Configuration` mirrors the JSON
//!   file on disk; `FormSubmission` mirrors the form an operator fills in
//!   (one row per local user, a login-policy radio selection, checkboxes).
//!
//! - **`form::validate`** – Checks every submitted row against the login and
//!   name patterns and the password confirmation, all rows before any other
//!   work.  One bad row rejects the whole submission with per-row messages.
//!
//! - **`form::assemble`** – Folds the validated rows and the policy
//!   selection into a brand-new `Configuration`.  Nothing is patched in
//!   place; each submission replaces the previous file wholesale.
//!
//! Hashing passwords and writing the file involve the OS and therefore live
//! in the editor binary crate, behind traits, not here.

pub mod domain;
pub mod form;

// Re-export the most-used types at the crate root so callers can write
// `plc_core::Configuration` instead of `plc_core::domain::config::Configuration`.
pub use domain::config::{Configuration, LocalUser, ALL_USERS_WILDCARD, SCHEMA_VERSION};
pub use domain::submission::{DomainLoginPolicy, FormSubmission, LocalUserForm};
pub use form::assemble::{assemble_configuration, ResolvedUser};
pub use form::validate::{
    validate_submission, validate_user_fields, PasswordChange, RowErrors, ValidatedUser,
    ValidationReport, LOGIN_FORMAT_ERROR, NAME_FORMAT_ERROR, PASSWORD_MISMATCH_ERROR,
};
