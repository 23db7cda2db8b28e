//! License catalog infrastructure.
//!
//! Restricted packages ship one descriptor directory per package on the
//! device image; `catalog` turns that tree into the entries the license
//! overview displays.

pub mod catalog;

pub use catalog::LicenseCatalog;
