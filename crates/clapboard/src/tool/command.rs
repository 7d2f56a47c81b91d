//! Structured external-tool command lines.
//!
//! Commands are lists of discrete arguments, never an interpolated shell
//! string, so paths with spaces or quotes need no escaping and a built
//! pipeline can be inspected without spawning anything.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A program plus its argument list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Start a command for the given program.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a filesystem path as one argument.
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Whether any argument equals `flag`.
    #[must_use]
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// The argument following the first occurrence of `flag`.
    #[must_use]
    pub fn value_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every argument following an occurrence of `flag`.
    #[must_use]
    pub fn values_after(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    /// Final argument (the output file for ffmpeg commands).
    #[must_use]
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }
}

fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || "'\"\\$`;|&<>()[]*?".contains(c))
}

impl fmt::Display for ToolCommand {
    /// Shell-like rendering for logs and dry runs. Not used for execution.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if needs_quoting(arg) {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> ToolCommand {
        ToolCommand::new("ffmpeg")
            .arg("-y")
            .args(["-i", "in.webm"])
            .args(["-i", "voice.mp3"])
            .path_arg(Path::new("/tmp/out dir/final.mp4"))
    }

    #[test]
    fn test_builder_keeps_order() {
        let cmd = sample();
        assert_eq!(cmd.program(), "ffmpeg");
        assert_eq!(
            cmd.arguments(),
            &["-y", "-i", "in.webm", "-i", "voice.mp3", "/tmp/out dir/final.mp4"]
        );
    }

    #[test]
    fn test_path_with_space_is_single_argument() {
        let cmd = sample();
        assert_eq!(cmd.last_arg(), Some("/tmp/out dir/final.mp4"));
    }

    #[test]
    fn test_value_after() {
        let cmd = sample();
        assert_eq!(cmd.value_after("-i"), Some("in.webm"));
        assert_eq!(cmd.value_after("-ss"), None);
        assert_eq!(cmd.values_after("-i"), vec!["in.webm", "voice.mp3"]);
    }

    #[test]
    fn test_has_arg() {
        let cmd = sample();
        assert!(cmd.has_arg("-y"));
        assert!(!cmd.has_arg("-shortest"));
    }

    #[test]
    fn test_display_quotes_only_when_needed() {
        let cmd = ToolCommand::new("ffmpeg")
            .args(["-map", "[out]", "plain.wav", "it's.wav"]);
        assert_eq!(
            cmd.to_string(),
            r"ffmpeg -map '[out]' plain.wav 'it'\''s.wav'"
        );
    }

    #[test]
    fn test_display_empty_argument() {
        let cmd = ToolCommand::new("ffprobe").arg("");
        assert_eq!(cmd.to_string(), "ffprobe ''");
    }
}
