//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Clapboard: line up a narrated screen recording with its audio timeline
#[derive(Parser, Debug)]
#[command(name = "clapboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the sync marker in a recording and report the trim plan
    Detect(DetectArgs),

    /// Mix manifest segments into one audio track
    Compose(ComposeArgs),

    /// Trim, mix and mux a whole session
    Finish(FinishArgs),

    /// Print the mixdown command without running anything
    Plan(PlanArgs),
}

/// Arguments for `detect`
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Raw screen recording
    pub video: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `compose`
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Session manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Mixed audio file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Milliseconds subtracted from every segment start
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset_ms: f64,
}

/// Arguments for `finish`
#[derive(Args, Debug)]
pub struct FinishArgs {
    /// Session manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Final video file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Directory for intermediates (default: `.clapboard-work` next to the output)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Session manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Milliseconds subtracted from every segment start
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset_ms: f64,

    /// Mixed audio path to show in the command
    #[arg(short, long, default_value = "combined-audio.wav")]
    pub output: PathBuf,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Log line format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
