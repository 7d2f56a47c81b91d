//! External media tool seam.
//!
//! Every ffmpeg/ffprobe invocation goes through [`MediaTool`], so the engine
//! can be driven by real subprocesses ([`SystemTool`]) or by a recorder
//! ([`MockTool`]) that lets tests assert on the exact command lines.

pub mod command;
pub mod mock;
pub mod system;

use crate::result::ClapboardResult;
use async_trait::async_trait;

pub use command::ToolCommand;
pub use mock::MockTool;
pub use system::SystemTool;

/// Captured output of a successful tool run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

/// Runs one external command to completion.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Run `command` and wait for it to exit.
    ///
    /// Non-zero exit is an error carrying the tool's stderr unchanged.
    async fn run(&self, command: &ToolCommand) -> ClapboardResult<ToolOutput>;
}
