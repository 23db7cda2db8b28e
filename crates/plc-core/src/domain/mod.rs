//! Domain entities for the local-login configuration editor.
//!
//! Pure data types with no file-system, process, or async dependencies: the
//! persisted configuration on one side and the operator's form submission on
//! the other.  Everything that touches the OS lives in the editor crate and
//! depends on these types, never the other way around.

/// The persisted configuration file shape.
pub mod config;
/// The structured operator form submission.
pub mod submission;
