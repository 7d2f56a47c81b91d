//! In-memory [`MediaTool`] for tests and dry runs.

use super::{MediaTool, ToolCommand, ToolOutput};
use crate::result::{ClapboardError, ClapboardResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mock tool that records every command instead of running it.
///
/// - queued stdout is returned per program, falling back to empty output
/// - ffmpeg-style commands (`-y ... <output>`) get their output file created,
///   or, for `%03d` image patterns, one file per configured frame
/// - `fail_on` makes matching commands fail like a crashed tool
#[derive(Debug, Default)]
pub struct MockTool {
    call_history: Mutex<Vec<ToolCommand>>,
    stdout: Mutex<HashMap<String, VecDeque<String>>>,
    frames: Vec<Vec<u8>>,
    failure: Option<(String, String)>,
    materialize: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTool {
    /// Create a mock that writes output files
    #[must_use]
    pub fn new() -> Self {
        Self {
            materialize: true,
            ..Self::default()
        }
    }

    /// Create a mock that never touches the filesystem
    #[must_use]
    pub fn dry_run() -> Self {
        Self::default()
    }

    /// Queue stdout for the next call to `program`
    #[must_use]
    pub fn with_stdout(self, program: &str, stdout: impl Into<String>) -> Self {
        lock(&self.stdout)
            .entry(program.to_string())
            .or_default()
            .push_back(stdout.into());
        self
    }

    /// Frames written when a frame-extraction command runs
    #[must_use]
    pub fn with_frames(mut self, frames: Vec<Vec<u8>>) -> Self {
        self.frames = frames;
        self
    }

    /// Fail any command whose program or arguments contain `needle`
    #[must_use]
    pub fn fail_on(mut self, needle: &str, stderr: &str) -> Self {
        self.failure = Some((needle.to_string(), stderr.to_string()));
        self
    }

    /// Every command seen so far, in order
    #[must_use]
    pub fn history(&self) -> Vec<ToolCommand> {
        lock(&self.call_history).clone()
    }

    /// Number of commands seen so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.call_history).len()
    }

    /// Commands whose argument list contains `flag`
    #[must_use]
    pub fn calls_with(&self, flag: &str) -> Vec<ToolCommand> {
        lock(&self.call_history)
            .iter()
            .filter(|c| c.has_arg(flag))
            .cloned()
            .collect()
    }

    /// Check if `program` was invoked
    #[must_use]
    pub fn was_called(&self, program: &str) -> bool {
        lock(&self.call_history)
            .iter()
            .any(|c| c.program() == program)
    }

    fn matches_failure(&self, command: &ToolCommand) -> Option<String> {
        let (needle, stderr) = self.failure.as_ref()?;
        let hit = command.program() == needle || command.arguments().iter().any(|a| a == needle);
        hit.then(|| stderr.clone())
    }

    fn outputs_for(&self, command: &ToolCommand) -> Vec<(PathBuf, Vec<u8>)> {
        if !self.materialize || !command.has_arg("-y") {
            return Vec::new();
        }
        let Some(target) = command.last_arg() else {
            return Vec::new();
        };
        if target.contains("%03d") {
            self.frames
                .iter()
                .enumerate()
                .map(|(i, frame)| {
                    let name = target.replace("%03d", &format!("{:03}", i + 1));
                    (PathBuf::from(name), frame.clone())
                })
                .collect()
        } else {
            vec![(PathBuf::from(target), Vec::new())]
        }
    }
}

#[async_trait]
impl MediaTool for MockTool {
    async fn run(&self, command: &ToolCommand) -> ClapboardResult<ToolOutput> {
        lock(&self.call_history).push(command.clone());

        if let Some(stderr) = self.matches_failure(command) {
            return Err(ClapboardError::ToolFailed {
                program: command.program().to_string(),
                status: "exit status: 1".to_string(),
                stderr,
            });
        }

        for (path, bytes) in self.outputs_for(command) {
            tokio::fs::write(&path, bytes).await?;
        }

        let stdout = lock(&self.stdout)
            .get_mut(command.program())
            .and_then(VecDeque::pop_front)
            .unwrap_or_default();

        Ok(ToolOutput {
            stdout,
            stderr: String::new(),
        })
    }
}
