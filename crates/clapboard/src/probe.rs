//! Stream probing via ffprobe.
//!
//! Only two questions are ever asked of a media file: the video frame rate
//! and the container duration. Both answers come back as plain text.

use crate::result::{ClapboardError, ClapboardResult};
use crate::tool::{MediaTool, ToolCommand};
use serde::Serialize;
use std::path::Path;

/// Build ffprobe arguments that print the first video stream's `r_frame_rate`.
#[must_use]
pub fn build_frame_rate_args(video_path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-select_streams".to_string(),
        "v:0".to_string(),
        "-show_entries".to_string(),
        "stream=r_frame_rate".to_string(),
        "-of".to_string(),
        "csv=p=0".to_string(),
        video_path.to_string_lossy().to_string(),
    ]
}

/// Build ffprobe arguments that print the container duration in seconds.
#[must_use]
pub fn build_duration_args(media_path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        media_path.to_string_lossy().to_string(),
    ]
}

/// Frame rate as reported by ffprobe (`N/D`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrameRate {
    /// Numerator
    pub numerator: f64,
    /// Denominator, never zero
    pub denominator: f64,
}

impl FrameRate {
    /// Parse `N/D` or a bare `N`. A zero denominator is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::FrameRate` if the text is not numeric or the
    /// resulting rate is not a positive finite number.
    pub fn parse(raw: &str) -> ClapboardResult<Self> {
        let text = raw.trim();
        let bad = || ClapboardError::FrameRate {
            raw: raw.to_string(),
        };

        let (num, den) = match text.split_once('/') {
            Some((n, d)) => (n.trim(), Some(d.trim())),
            None => (text, None),
        };

        let numerator: f64 = num.parse().map_err(|_| bad())?;
        let denominator = match den {
            Some(d) => d.parse::<f64>().map_err(|_| bad())?,
            None => 1.0,
        };
        let denominator = if denominator == 0.0 { 1.0 } else { denominator };

        let rate = Self {
            numerator,
            denominator,
        };
        let fps = rate.fps();
        if fps.is_finite() && fps > 0.0 {
            Ok(rate)
        } else {
            Err(bad())
        }
    }

    /// Frames per second
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.numerator / self.denominator
    }

    /// Duration of one frame in milliseconds
    #[must_use]
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.fps()
    }
}

/// Probe the frame rate of the first video stream.
///
/// # Errors
///
/// Propagates tool errors; returns `ClapboardError::FrameRate` for unusable output.
pub async fn probe_frame_rate(
    tool: &dyn MediaTool,
    ffprobe: &str,
    video_path: &Path,
) -> ClapboardResult<FrameRate> {
    let command = ToolCommand::new(ffprobe).args(build_frame_rate_args(video_path));
    let output = tool.run(&command).await?;
    // Multi-stream files can print more than one line; the first is v:0.
    let first = output.stdout.lines().next().unwrap_or_default();
    FrameRate::parse(first)
}

/// Parse ffprobe's duration output (seconds) into whole milliseconds.
///
/// # Errors
///
/// Returns `ClapboardError::AudioDuration` if the text is not a non-negative number.
pub fn parse_duration_ms(raw: &str) -> ClapboardResult<u64> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ClapboardError::AudioDuration {
            raw: raw.to_string(),
        })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ClapboardError::AudioDuration {
            raw: raw.to_string(),
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok((seconds * 1000.0).round() as u64)
}

/// Probe the duration of an audio file in milliseconds.
///
/// # Errors
///
/// Propagates tool errors; returns `ClapboardError::AudioDuration` for unusable output.
pub async fn probe_audio_duration_ms(
    tool: &dyn MediaTool,
    ffprobe: &str,
    media_path: &Path,
) -> ClapboardResult<u64> {
    let command = ToolCommand::new(ffprobe).args(build_duration_args(media_path));
    let output = tool.run(&command).await?;
    parse_duration_ms(&output.stdout)
}
