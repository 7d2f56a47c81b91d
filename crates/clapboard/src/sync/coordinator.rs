//! End-of-session orchestration: detect, trim, rebase, mix, mux.
//!
//! Every step is awaited in order. The marker outcome decides both whether
//! the recording is trimmed and how far audio timestamps are shifted.

use super::detection::detect_sync_range;
use super::trim::{build_transcode_args, trim_sync_frames};
use super::types::SyncOutcome;
use crate::config::{EncodeSettings, EngineConfig};
use crate::mixdown::{compose_mixdown, AudioSegment};
use crate::result::{ClapboardError, ClapboardResult};
use crate::tool::{MediaTool, ToolCommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the trimmed recording inside the work directory
pub const TRIMMED_VIDEO: &str = "trimmed.mp4";
/// File name of the mixed audio track inside the work directory
pub const MIXED_AUDIO: &str = "combined-audio.wav";

/// Build ffmpeg arguments that combine a video and an audio track.
#[must_use]
pub fn build_mux_args(
    video: &Path,
    audio: &Path,
    output: &Path,
    encode: &EncodeSettings,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        video.to_string_lossy().to_string(),
        "-i".to_string(),
        audio.to_string_lossy().to_string(),
    ];
    args.extend(encode.video_args());
    args.extend([
        "-c:a".to_string(),
        encode.audio_codec.clone(),
        "-shortest".to_string(),
        output.to_string_lossy().to_string(),
    ]);
    args
}

/// Inputs of one finalize run.
#[derive(Clone, Debug)]
pub struct FinalizeRequest {
    /// Raw screen recording, if one was captured
    pub recording: Option<PathBuf>,
    /// Audio events timed from the sync marker
    pub segments: Vec<AudioSegment>,
    /// Final video path
    pub output: PathBuf,
    /// Directory for intermediates (trimmed video, mixed track)
    pub work_dir: PathBuf,
}

impl FinalizeRequest {
    /// Request with no recording and no audio
    #[must_use]
    pub fn new(output: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            recording: None,
            segments: Vec::new(),
            output: output.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Attach the raw recording
    #[must_use]
    pub fn with_recording(mut self, recording: impl Into<PathBuf>) -> Self {
        self.recording = Some(recording.into());
        self
    }

    /// Attach the audio segments
    #[must_use]
    pub fn with_segments(mut self, segments: Vec<AudioSegment>) -> Self {
        self.segments = segments;
        self
    }
}

/// How the final file was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Video and mixed audio muxed together
    Muxed,
    /// Trimmed video copied as-is
    VideoCopied,
    /// Untrimmed recording transcoded without audio
    VideoTranscoded,
}

/// What a finalize run did.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalizeReport {
    /// Marker outcome, including the trim plan when one was applied
    pub sync: SyncOutcome,
    /// Offset subtracted from every audio timestamp
    pub audio_offset_ms: f64,
    /// Mixed audio track, when there was audio
    pub mixed_audio: Option<PathBuf>,
    /// Number of audio segments mixed
    pub segment_count: usize,
    /// Final output file
    pub output: PathBuf,
    /// Delivery path taken
    pub delivery: Delivery,
}

/// Runs detection, trimming, mixdown and muxing for one session.
pub struct SyncCoordinator<'a> {
    tool: &'a dyn MediaTool,
    config: &'a EngineConfig,
}

impl std::fmt::Debug for SyncCoordinator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCoordinator")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> SyncCoordinator<'a> {
    /// Create a coordinator over a tool runner and configuration
    #[must_use]
    pub fn new(tool: &'a dyn MediaTool, config: &'a EngineConfig) -> Self {
        Self { tool, config }
    }

    /// Detect the marker and trim the recording when one is found.
    ///
    /// Returns the outcome and the video to deliver, `None` without a recording.
    ///
    /// # Errors
    ///
    /// Propagates detection and trim failures.
    pub async fn synchronize(
        &self,
        recording: Option<&Path>,
        work_dir: &Path,
    ) -> ClapboardResult<(SyncOutcome, Option<PathBuf>)> {
        let Some(recording) = recording else {
            tracing::info!("No recording, skipping sync detection");
            return Ok((SyncOutcome::NoVideo, None));
        };

        let range = detect_sync_range(self.tool, self.config, recording).await?;
        let Some(plan) = range.trim_plan() else {
            tracing::warn!(
                recording = %recording.display(),
                "Sync marker not found, delivering untrimmed video with no audio offset"
            );
            return Ok((SyncOutcome::MarkerAbsent, Some(recording.to_path_buf())));
        };

        tracing::info!(
            frames_to_trim = plan.frames_to_trim,
            trim_duration_ms = plan.trim_duration_ms,
            sync_offset_ms = plan.sync_offset_ms,
            audio_offset_ms = plan.audio_offset_ms(),
            "Trim plan"
        );
        let trimmed = work_dir.join(TRIMMED_VIDEO);
        trim_sync_frames(
            self.tool,
            self.config,
            recording,
            &trimmed,
            plan.frames_to_trim,
            plan.frame_duration_ms,
        )
        .await?;
        Ok((SyncOutcome::MarkerFound(plan), Some(trimmed)))
    }

    /// Produce the final video for a session.
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::NothingToFinalize` when no recording was
    /// captured, after any audio has been mixed into the work directory.
    /// Tool and I/O failures propagate unchanged.
    pub async fn finalize(&self, request: &FinalizeRequest) -> ClapboardResult<FinalizeReport> {
        tokio::fs::create_dir_all(&request.work_dir).await?;

        let (sync, video) = self
            .synchronize(request.recording.as_deref(), &request.work_dir)
            .await?;
        let audio_offset_ms = sync.audio_offset_ms();

        let mixed_audio = if request.segments.is_empty() {
            None
        } else {
            let mixed = request.work_dir.join(MIXED_AUDIO);
            Some(
                compose_mixdown(
                    self.tool,
                    self.config,
                    &request.segments,
                    audio_offset_ms,
                    &mixed,
                )
                .await?,
            )
        };

        // A mixed track alone is not a deliverable.
        let Some(video) = video else {
            return Err(ClapboardError::NothingToFinalize);
        };

        if let Some(parent) = request.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let delivery = match (&mixed_audio, &sync) {
            (Some(audio), _) => {
                let args = build_mux_args(&video, audio, &request.output, &self.config.encode);
                self.tool
                    .run(&ToolCommand::new(&self.config.ffmpeg).args(args))
                    .await?;
                Delivery::Muxed
            }
            (None, SyncOutcome::MarkerFound(_)) => {
                tokio::fs::copy(&video, &request.output).await?;
                Delivery::VideoCopied
            }
            (None, SyncOutcome::MarkerAbsent | SyncOutcome::NoVideo) => {
                let args = build_transcode_args(&video, &request.output, &self.config.encode);
                self.tool
                    .run(&ToolCommand::new(&self.config.ffmpeg).args(args))
                    .await?;
                Delivery::VideoTranscoded
            }
        };

        tracing::info!(
            output = %request.output.display(),
            ?delivery,
            audio_offset_ms,
            "Finalized video"
        );

        Ok(FinalizeReport {
            sync,
            audio_offset_ms,
            mixed_audio,
            segment_count: request.segments.len(),
            output: request.output.clone(),
            delivery,
        })
    }
}
