//! Sync marker detection over the leading frames of a recording.
//!
//! The first `scan_frames` frames are extracted as PPM stills into a scratch
//! directory, classified in frame-number order, and reduced to the contiguous
//! marker run that starts at the first marker frame.

use super::classifier::{is_marker_frame, MarkerSpec};
use super::types::{MarkerRun, SyncRange};
use crate::config::EngineConfig;
use crate::probe::probe_frame_rate;
use crate::result::ClapboardResult;
use crate::tool::{MediaTool, ToolCommand};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Filename pattern for extracted frames
pub const FRAME_PATTERN: &str = "frame-%03d.ppm";

/// Build ffmpeg arguments that dump the first `frame_count` frames as PPM.
#[must_use]
pub fn build_extract_args(video_path: &Path, frame_count: u32, pattern: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        video_path.to_string_lossy().to_string(),
        "-vframes".to_string(),
        frame_count.to_string(),
        "-q:v".to_string(),
        "2".to_string(),
        pattern.to_string_lossy().to_string(),
    ]
}

/// Incremental marker-run scanner.
///
/// Feed one classification per frame; the scan breaks at the first
/// non-marker frame after a marker was seen.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerScan {
    index: usize,
    first: Option<usize>,
    last: usize,
}

impl MarkerScan {
    /// Start a new scan
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classification of the next frame.
    pub fn push(&mut self, is_marker: bool) -> ControlFlow<()> {
        let index = self.index;
        self.index += 1;
        match (self.first, is_marker) {
            (None, true) => {
                self.first = Some(index);
                self.last = index;
            }
            (Some(_), true) => self.last = index,
            (Some(_), false) => return ControlFlow::Break(()),
            (None, false) => {}
        }
        ControlFlow::Continue(())
    }

    /// Frames consumed so far
    #[must_use]
    pub const fn frames_seen(&self) -> usize {
        self.index
    }

    /// The detected run, if any
    #[must_use]
    pub fn finish(self) -> Option<MarkerRun> {
        self.first.and_then(|first| MarkerRun::new(first, self.last))
    }
}

/// Frame number encoded in an extracted frame's file name.
///
/// ffmpeg stops zero-padding once a number outgrows the pattern width, so
/// `frame-1000.ppm` must be ordered numerically rather than by name.
fn frame_index(name: &str) -> Option<u32> {
    name.strip_prefix("frame-")?
        .strip_suffix(".ppm")?
        .parse()
        .ok()
}

/// Extracted frame files in temporal order.
async fn list_frames(dir: &Path) -> ClapboardResult<Vec<PathBuf>> {
    let mut frames = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(index) = frame_index(&entry.file_name().to_string_lossy()) {
            frames.push((index, entry.path()));
        }
    }
    frames.sort_unstable_by_key(|(index, _)| *index);
    Ok(frames.into_iter().map(|(_, path)| path).collect())
}

async fn classify_frames(
    frames: &[PathBuf],
    spec: &MarkerSpec,
) -> ClapboardResult<Option<MarkerRun>> {
    let mut scan = MarkerScan::new();
    for path in frames {
        let bytes = tokio::fs::read(path).await?;
        if scan.push(is_marker_frame(&bytes, spec)).is_break() {
            break;
        }
    }
    tracing::debug!(classified = scan.frames_seen(), "Marker scan finished");
    Ok(scan.finish())
}

async fn extract_and_scan(
    tool: &dyn MediaTool,
    config: &EngineConfig,
    video_path: &Path,
    scratch: &Path,
) -> ClapboardResult<Option<MarkerRun>> {
    let pattern = scratch.join(FRAME_PATTERN);
    let command = ToolCommand::new(&config.ffmpeg).args(build_extract_args(
        video_path,
        config.scan_frames,
        &pattern,
    ));
    tool.run(&command).await?;

    let frames = list_frames(scratch).await?;
    tracing::info!(frames = frames.len(), "Extracted leading frames");
    classify_frames(&frames, &config.marker).await
}

/// Remove a scratch directory, logging instead of failing.
pub(crate) fn close_scratch(scratch: TempDir) {
    let path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch directory");
    }
}

/// Close `scratch` and hand back `result` untouched, whatever the removal did.
fn release_scratch<T>(scratch: TempDir, result: ClapboardResult<T>) -> ClapboardResult<T> {
    close_scratch(scratch);
    result
}

/// Detect the sync marker in the first frames of `video_path`.
///
/// # Errors
///
/// Propagates probe and extraction failures. The scratch directory is removed
/// on every path; failure to remove it is only logged.
pub async fn detect_sync_range(
    tool: &dyn MediaTool,
    config: &EngineConfig,
    video_path: &Path,
) -> ClapboardResult<SyncRange> {
    let rate = probe_frame_rate(tool, &config.ffprobe, video_path).await?;
    let frame_duration_ms = rate.frame_duration_ms();
    tracing::info!(fps = rate.fps(), frame_duration_ms, "Detected frame rate");

    let scratch = tempfile::Builder::new()
        .prefix("clapboard-frames-")
        .tempdir()?;
    let result = extract_and_scan(tool, config, video_path, scratch.path()).await;
    let marker = release_scratch(scratch, result)?;

    match marker {
        Some(run) => tracing::info!(first = run.first(), last = run.last(), "Sync marker found"),
        None => tracing::info!("No sync marker in scanned frames"),
    }

    Ok(SyncRange {
        marker,
        frame_duration_ms,
    })
}
