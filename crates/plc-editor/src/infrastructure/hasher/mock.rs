//! Mock password hasher for unit testing.
//!
//! # Why a mock hasher?
//!
//! The real `MkpasswdHasher` spawns an external process that:
//!
//! - Must be installed on the test machine (`mkpasswd` ships with the
//!   `whois` package, not with coreutils).
//! - Produces a differently salted hash on every call, so its output
//!   cannot be asserted against.
//!
//! The `MockPasswordHasher` replaces the process with in-memory recording
//! and a deterministic derived hash.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return a
//! `HasherError::Process`.  This lets you test error-handling paths in
//! callers without needing a broken tool.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::submit::{HasherError, PasswordHasher};

/// A mock hasher that records every request without spawning a process.
#[derive(Default)]
pub struct MockPasswordHasher {
    /// Records each plaintext passed to `hash`, in call order.
    pub requests: Mutex<Vec<String>>,
    /// When `true`, every call returns a `HasherError::Process`.
    pub should_fail: bool,
}

impl MockPasswordHasher {
    /// Creates a new `MockPasswordHasher` with empty records and `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    /// Records the request and returns `"$6$mock$<plaintext>"`, or an
    /// error if `should_fail` is set.
    async fn hash(&self, plaintext: &str) -> Result<String, HasherError> {
        if self.should_fail {
            return Err(HasherError::Process("mock failure".into()));
        }
        self.requests.lock().unwrap().push(plaintext.to_string());
        Ok(format!("$6$mock${plaintext}"))
    }
}
