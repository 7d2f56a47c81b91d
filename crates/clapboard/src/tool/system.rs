//! Subprocess-backed [`MediaTool`].

use super::{MediaTool, ToolCommand, ToolOutput};
use crate::result::{ClapboardError, ClapboardResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;

/// Runs commands as real child processes and waits for them to exit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTool;

impl SystemTool {
    /// Create a new subprocess runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaTool for SystemTool {
    async fn run(&self, command: &ToolCommand) -> ClapboardResult<ToolOutput> {
        tracing::debug!(%command, "Running external tool");
        let start = Instant::now();

        let output = tokio::process::Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ClapboardError::ToolSpawn {
                program: command.program().to_string(),
                message: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ClapboardError::ToolFailed {
                program: command.program().to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }

        tracing::debug!(
            program = command.program(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "External tool finished"
        );

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }
}
