//! Removing the marker frames from the front of a recording.

use crate::config::{EncodeSettings, EngineConfig};
use crate::result::ClapboardResult;
use crate::tool::{MediaTool, ToolCommand};
use std::path::Path;

/// Seek position for `frames_to_trim` frames, in seconds with millisecond precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_seek_secs(frames_to_trim: usize, frame_duration_ms: f64) -> String {
    format!("{:.3}", frames_to_trim as f64 * frame_duration_ms / 1000.0)
}

/// Build ffmpeg arguments that re-encode `input` starting at `start_secs`.
///
/// `-ss` follows `-i` so ffmpeg decodes up to the cut instead of snapping to
/// the nearest keyframe.
#[must_use]
pub fn build_trim_args(
    input: &Path,
    output: &Path,
    start_secs: &str,
    encode: &EncodeSettings,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-ss".to_string(),
        start_secs.to_string(),
    ];
    args.extend(encode.video_args());
    args.push(output.to_string_lossy().to_string());
    args
}

/// Build ffmpeg arguments that re-encode `input` without trimming.
#[must_use]
pub fn build_transcode_args(input: &Path, output: &Path, encode: &EncodeSettings) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
    ];
    args.extend(encode.video_args());
    args.push(output.to_string_lossy().to_string());
    args
}

/// Drop the first `frames_to_trim` frames of `input` and write `output`.
///
/// With nothing to trim the recording is only transcoded.
///
/// # Errors
///
/// Propagates ffmpeg failures.
pub async fn trim_sync_frames(
    tool: &dyn MediaTool,
    config: &EngineConfig,
    input: &Path,
    output: &Path,
    frames_to_trim: usize,
    frame_duration_ms: f64,
) -> ClapboardResult<()> {
    let args = if frames_to_trim == 0 {
        tracing::info!("Nothing to trim, transcoding");
        build_transcode_args(input, output, &config.encode)
    } else {
        let start = format_seek_secs(frames_to_trim, frame_duration_ms);
        tracing::info!(frames_to_trim, start_secs = %start, "Trimming sync frames");
        build_trim_args(input, output, &start, &config.encode)
    };
    tool.run(&ToolCommand::new(&config.ffmpeg).args(args)).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tool::MockTool;

    #[test]
    fn test_format_seek_secs() {
        assert_eq!(format_seek_secs(12, 40.0), "0.480");
        assert_eq!(format_seek_secs(1, 1000.0 / 30.0), "0.033");
        assert_eq!(format_seek_secs(0, 40.0), "0.000");
    }

    #[test]
    fn test_seek_follows_input() {
        let args = build_trim_args(
            Path::new("in.webm"),
            Path::new("out.mp4"),
            "0.480",
            &EncodeSettings::default(),
        );
        let input = args.iter().position(|a| a == "-i").unwrap();
        let seek = args.iter().position(|a| a == "-ss").unwrap();
        assert!(seek > input);
        assert_eq!(
            args,
            vec![
                "-y", "-i", "in.webm", "-ss", "0.480", "-c:v", "libx264", "-preset", "fast",
                "-crf", "23", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_transcode_args() {
        let args = build_transcode_args(
            Path::new("in.webm"),
            Path::new("out.mp4"),
            &EncodeSettings::default(),
        );
        assert!(!args.contains(&"-ss".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[tokio::test]
    async fn test_trim_issues_seek() {
        let tool = MockTool::dry_run();
        trim_sync_frames(
            &tool,
            &EngineConfig::default(),
            Path::new("in.webm"),
            Path::new("out.mp4"),
            12,
            40.0,
        )
        .await
        .unwrap();
        let calls = tool.history();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].value_after("-ss"), Some("0.480"));
    }

    #[tokio::test]
    async fn test_zero_frames_only_transcodes() {
        let tool = MockTool::dry_run();
        trim_sync_frames(
            &tool,
            &EngineConfig::default(),
            Path::new("in.webm"),
            Path::new("out.mp4"),
            0,
            40.0,
        )
        .await
        .unwrap();
        assert!(tool.calls_with("-ss").is_empty());
        assert_eq!(tool.calls_with("-c:v").len(), 1);
    }

    #[tokio::test]
    async fn test_trim_failure_propagates() {
        let tool = MockTool::dry_run().fail_on("ffmpeg", "Conversion failed!");
        let err = trim_sync_frames(
            &tool,
            &EngineConfig::default(),
            Path::new("in.webm"),
            Path::new("out.mp4"),
            3,
            40.0,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().ends_with("Conversion failed!"));
    }
}
