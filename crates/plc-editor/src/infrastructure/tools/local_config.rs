//! `puavo-local-config` adapter: applies the written configuration.
//!
//! The update tool reads the configuration file this editor writes and
//! makes it real: creates the local user accounts, updates login
//! permissions, and sets up the accepted restricted packages.  It must
//! run as root, so it is invoked through sudo; its output goes straight
//! to the operator's terminal.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::application::session::SystemConfigurator;
use crate::application::ToolError;

use super::UPDATE_TOOL_PATH;

/// Runs the system update tool through sudo.
pub struct SudoLocalConfig;

#[async_trait]
impl SystemConfigurator for SudoLocalConfig {
    async fn apply(&self) -> Result<(), ToolError> {
        let command = format!("sudo {UPDATE_TOOL_PATH} --admins --local-users --setup-pkgs all");
        info!("applying configuration: {command}");

        let status = Command::new("sudo")
            .arg(UPDATE_TOOL_PATH)
            .args(["--admins", "--local-users", "--setup-pkgs", "all"])
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
                message: "the update tool did not apply the configuration".into(),
            });
        }
        Ok(())
    }
}
