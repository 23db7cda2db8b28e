//! `puavo-restricted-package-tool` adapter: download states and downloads.
//!
//! Restricted packages are fetched outside the normal package manager.
//! The reporting side (`list`) runs unprivileged; actually downloading a
//! package goes through the sudo-wrapped update tool.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::application::licenses::RestrictedPackageTool;
use crate::application::ToolError;

use super::UPDATE_TOOL_PATH;

/// Name of the reporting tool, resolved through `PATH`.
const LIST_TOOL: &str = "puavo-restricted-package-tool";

/// Shells out to the restricted-package helpers.
pub struct PackageToolCli;

#[async_trait]
impl RestrictedPackageTool for PackageToolCli {
    async fn download_states(&self) -> Result<HashMap<String, bool>, ToolError> {
        let command = format!("{LIST_TOOL} list");
        let output = Command::new(LIST_TOOL)
            .arg("list")
            .output()
            .await
            .map_err(|e| ToolError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command,
                status: output.status.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_download_states(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn download(&self, key: &str) -> Result<(), ToolError> {
        let command = format!("sudo {UPDATE_TOOL_PATH} --download-pkgs {key}");
        info!("downloading restricted package: {command}");

        let status = Command::new("sudo")
            .arg(UPDATE_TOOL_PATH)
            .args(["--download-pkgs", key])
            .status()
            .await
            .map_err(|e| ToolError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ToolError::Failed {
                command,
                status: status.to_string(),
                message: format!("download failed for package `{key}`"),
            });
        }
        Ok(())
    }
}

/// Parses the tool's `list` output into a key → downloaded map.
///
/// Each line is whitespace-separated; field 0 is the package key and the
/// package counts as downloaded unless field 2 equals `"PURGED"`.  A line
/// without a third field counts as downloaded too.
fn parse_download_states(output: &str) -> HashMap<String, bool> {
    let mut states = HashMap::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let key = match fields.next() {
            Some(key) => key,
            None => continue,
        };
        // field 1 is the package version; only fields 0 and 2 matter here
        let _version = fields.next();
        let downloaded = fields.next().map_or(true, |state| state != "PURGED");
        states.insert(key.to_string(), downloaded);
    }
    states
}

// ── Tests ─────────────────────────────────────────────────────────────────────
