//! Application layer use cases for the configuration editor.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules, here provided by `plc-core`) and the
//! infrastructure (processes, file system).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "turn a
//!   submitted form into the next persisted configuration").
//! - **Depend on abstractions** (traits) rather than concrete
//!   implementations, so the infrastructure can be swapped without
//!   changing this code.
//! - **Contain no process spawning and no file system access**.
//!
//! # Sub-modules
//!
//! - **`submit`**   – Validates a form submission, resolves each local
//!   user's password hash, and assembles the next configuration.  This is
//!   the core of the editor — everything else exists to feed it or to
//!   persist its result.
//!
//! - **`session`**  – Drives one editing session end to end: load the
//!   previous configuration, run the submission, persist the result, and
//!   invoke the system update tool.
//!
//! - **`licenses`** – Merges the on-disk license catalog with the package
//!   tool's download report and the stored acceptance flags.

pub mod licenses;
pub mod session;
pub mod submit;

use thiserror::Error;

/// Failure of one of the privileged helper commands the editor shells out to.
///
/// Shared by every trait whose real implementation runs an external
/// program (`SystemConfigurator`, `RestrictedPackageTool`).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The helper binary could not be started at all.
    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    /// The helper ran but reported failure through its exit status.
    #[error("`{command}` failed ({status}): {message}")]
    Failed {
        command: String,
        status: String,
        message: String,
    },
}
