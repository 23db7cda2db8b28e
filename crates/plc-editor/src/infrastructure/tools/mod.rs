//! Privileged puavo helper tool adapters.
//!
//! The editor itself never runs as root.  State changes that need
//! privileges go through sudo-wrapped helpers:
//!
//! - **`local_config`** – `puavo-local-config`, which reads the written
//!   configuration file and applies it to the system (user accounts,
//!   login permissions, package setup).  The same tool downloads
//!   restricted packages.
//! - **`package_tool`** – `puavo-restricted-package-tool`, which reports
//!   the download state of every restricted package.  Reporting needs no
//!   privileges, so it runs without sudo.
//!
//! `mock` provides recording substitutes for tests.

pub mod local_config;
pub mod mock;
pub mod package_tool;

/// Absolute path of the system update tool, fixed on puavo hosts.
pub(crate) const UPDATE_TOOL_PATH: &str = "/usr/sbin/puavo-local-config";
