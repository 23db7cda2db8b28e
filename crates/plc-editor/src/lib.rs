//! plc-editor library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does plc-editor do? (for beginners)
//!
//! Devices managed through puavo keep a small amount of *host-local*
//! state that is deliberately not stored on the server: local user
//! accounts (with their password hashes), the set of domain users who
//! may log in on this particular machine, whether remote administration
//! is allowed, and which restricted-package licenses the owner has
//! accepted.  All of it lives in one JSON file, replaced as a unit on
//! every edit.
//!
//! The editor runs one submission through a fixed pipeline:
//!
//! 1. Load the current configuration (or built-in defaults on first run).
//! 2. Validate every row of the submitted form; any error blocks the
//!    whole submission and nothing is written.
//! 3. Resolve each local user's credential — hash new passwords with
//!    `mkpasswd`, carry forward the stored hash when the password fields
//!    were left empty.
//! 4. Assemble a brand-new configuration object and write it to disk
//!    atomically (temp file + rename).
//! 5. Run the system update tool so the host picks up the new state.
//!
//! Steps 2–4 are pure and live in the `plc-core` crate; this crate adds
//! the orchestration and the process/file-system adapters around them.

/// Application layer: use cases and the traits they depend on.
pub mod application;

/// Infrastructure layer: file-system storage and external tool adapters.
pub mod infrastructure;
