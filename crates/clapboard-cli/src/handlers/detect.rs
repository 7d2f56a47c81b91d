//! `detect` command handler.
//!
//! Probes the recording, scans the leading frames for the sync marker and
//! prints the resulting trim plan without modifying anything.

use crate::commands::{DetectArgs, OutputFormat};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use clapboard::{detect_sync_range, MediaTool, SyncRange, SystemTool, TrimPlan};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What `detect` found in one recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectReport {
    /// Recording that was scanned
    pub video: PathBuf,
    /// Marker run and frame duration
    pub range: SyncRange,
    /// Trim derived from the marker, if any
    pub trim: Option<TrimPlan>,
}

impl DetectReport {
    /// Build a report from a detection result
    #[must_use]
    pub fn new(video: &Path, range: SyncRange) -> Self {
        Self {
            video: video.to_path_buf(),
            trim: range.trim_plan(),
            range,
        }
    }
}

/// Execute the detect command.
pub async fn execute_detect(config: &CliConfig, args: &DetectArgs) -> CliResult<()> {
    let tool = SystemTool::new();
    let report = run_detect(&tool, config, &args.video).await?;
    match args.format {
        OutputFormat::Text => print!("{}", render_detect_report(&report)),
        OutputFormat::Json => println!("{}", super::to_json(&report)?),
    }
    Ok(())
}

async fn run_detect(
    tool: &dyn MediaTool,
    config: &CliConfig,
    video: &Path,
) -> CliResult<DetectReport> {
    if !video.is_file() {
        return Err(CliError::invalid_argument(format!(
            "Video file not found: {}",
            video.display()
        )));
    }
    let range = detect_sync_range(tool, &config.engine, video).await?;
    Ok(DetectReport::new(video, range))
}

/// Render a detect report as text.
#[must_use]
pub fn render_detect_report(report: &DetectReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Recording: {}\n", report.video.display()));
    out.push_str(&format!("Frame duration: {:.3}ms\n", report.range.frame_duration_ms));
    match (report.range.marker, report.trim) {
        (Some(run), Some(plan)) => {
            out.push_str(&format!(
                "Marker: frames {}..={} ({} frames)\n",
                run.first(),
                run.last(),
                run.frame_count()
            ));
            out.push_str(&format!(
                "Trim: {} frames ({:.3}ms), start at {:.3}s\n",
                plan.frames_to_trim,
                plan.trim_duration_ms,
                plan.start_secs()
            ));
            out.push_str(&format!("Audio offset: {:.3}ms\n", plan.audio_offset_ms()));
        }
        _ => out.push_str("Marker: not found (video kept whole, audio offset 0)\n"),
    }
    out
}
