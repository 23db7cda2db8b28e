//! Mock helper tools for unit testing.
//!
//! The real adapters in `local_config` and `package_tool` spawn
//! privileged processes that cannot run (or be observed) from test code.
//! These mocks record every call in memory instead.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` before calling a method to simulate a failing
//! helper.  This lets you test error-handling paths in callers without
//! needing a broken system.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::licenses::RestrictedPackageTool;
use crate::application::session::SystemConfigurator;
use crate::application::ToolError;

/// A mock update tool that counts `apply` invocations.
#[derive(Default)]
pub struct MockSystemConfigurator {
    /// Number of times `apply` ran successfully.
    pub apply_calls: Mutex<u32>,
    /// When `true`, every call returns a `ToolError::Failed`.
    pub should_fail: bool,
}

impl MockSystemConfigurator {
    /// Creates a new `MockSystemConfigurator` with `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SystemConfigurator for MockSystemConfigurator {
    /// Counts the invocation, or returns an error if `should_fail` is set.
    async fn apply(&self) -> Result<(), ToolError> {
        if self.should_fail {
            return Err(ToolError::Failed {
                command: "mock apply".into(),
                status: "exit status: 1".into(),
                message: "mock failure".into(),
            });
        }
        *self.apply_calls.lock().unwrap() += 1;
        Ok(())
    }
}

/// A mock package tool with preset download states.
#[derive(Default)]
pub struct MockPackageTool {
    /// The map returned by `download_states`.
    pub states: HashMap<String, bool>,
    /// Records each key passed to `download`, in call order.
    pub downloads: Mutex<Vec<String>>,
    /// When `true`, every call returns a `ToolError::Failed`.
    pub should_fail: bool,
}

impl MockPackageTool {
    /// Creates a new `MockPackageTool` with no known packages.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestrictedPackageTool for MockPackageTool {
    /// Returns the preset states, or an error if `should_fail` is set.
    async fn download_states(&self) -> Result<HashMap<String, bool>, ToolError> {
        if self.should_fail {
            return Err(ToolError::Failed {
                command: "mock list".into(),
                status: "exit status: 1".into(),
                message: "mock failure".into(),
            });
        }
        Ok(self.states.clone())
    }

    /// Records the download, or returns an error if `should_fail` is set.
    async fn download(&self, key: &str) -> Result<(), ToolError> {
        if self.should_fail {
            return Err(ToolError::Failed {
                command: "mock download".into(),
                status: "exit status: 1".into(),
                message: "mock failure".into(),
            });
        }
        self.downloads.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
