//! Password hashing implementations.
//!
//! The real implementation shells out to `mkpasswd`; `mock` provides an
//! in-memory recording hasher for tests.

pub mod mkpasswd;
pub mod mock;
