//! Result and error types for Clapboard.

use thiserror::Error;

/// Result type for Clapboard operations
pub type ClapboardResult<T> = Result<T, ClapboardError>;

/// Errors that can occur in Clapboard
#[derive(Debug, Error)]
pub enum ClapboardError {
    /// Mixdown requested with no audio segments
    #[error("No audio segments provided")]
    EmptyInput,

    /// External tool could not be started
    #[error("Failed to execute {program}: {message}")]
    ToolSpawn {
        /// Program name (e.g. "ffmpeg")
        program: String,
        /// Error message
        message: String,
    },

    /// External tool ran and exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        /// Program name (e.g. "ffmpeg")
        program: String,
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error, verbatim
        stderr: String,
    },

    /// Frame rate probe output could not be turned into a usable rate
    #[error("Unusable frame rate from probe: {raw:?}")]
    FrameRate {
        /// Raw probe output
        raw: String,
    },

    /// Duration probe output could not be parsed
    #[error("Unusable duration from probe: {raw:?}")]
    AudioDuration {
        /// Raw probe output
        raw: String,
    },

    /// Sound category string is not a known category
    #[error("Unknown sound category: {raw}")]
    UnknownCategory {
        /// The rejected category string
        raw: String,
    },

    /// Neither a processed video nor a mixed audio track exists
    #[error("Nothing to finalize: no recording was captured")]
    NothingToFinalize,

    /// No valid pre-generated clip for a sound category
    #[error("No valid sound for {category} at {path}")]
    SoundUnavailable {
        /// Sound category
        category: String,
        /// Path that was checked
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClapboardError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error came from the external media tool
    #[must_use]
    pub const fn is_tool_error(&self) -> bool {
        matches!(self, Self::ToolSpawn { .. } | Self::ToolFailed { .. })
    }
}
