//! Storage infrastructure: configuration file persistence.
//!
//! This module provides a thin adapter between the application and the
//! file system.  The `config` sub-module handles:
//!
//! - Reading the JSON configuration file from its fixed path.
//! - Replacing it atomically when a submission goes through.
//! - Providing the built-in defaults when the file does not exist yet
//!   (first boot, or after a reinstall that wiped local state).

pub mod config;

pub use config::{ConfigStore, StoreError};
