//! Mixdown of independently timed clips into one track.
//!
//! Each input is delayed to its rebased start time and scaled by its
//! category gain, then all inputs are summed with `amix` (no normalization,
//! so a lone narration keeps its level when clicks overlap it).

use super::segment::{AudioSegment, SoundCategory};
use crate::config::EngineConfig;
use crate::result::{ClapboardError, ClapboardResult};
use crate::tool::{MediaTool, ToolCommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Segments logged individually before the summary line
const LOGGED_SEGMENTS: usize = 10;

/// One input of the mixdown after offset and gain are applied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MixTrack {
    /// Clip file
    pub path: PathBuf,
    /// Category of the clip
    pub category: SoundCategory,
    /// Timestamp before rebasing
    pub original_start_ms: i64,
    /// Delay applied in the output, in whole milliseconds
    pub adjusted_start_ms: u64,
    /// Volume multiplier
    pub gain: f64,
}

/// Everything ffmpeg needs to produce the mixed track.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MixdownPlan {
    /// Inputs in start order
    pub tracks: Vec<MixTrack>,
    /// Offset subtracted from every start time
    pub audio_offset_ms: f64,
    /// `-filter_complex` graph
    pub filter_graph: String,
}

/// Rebase a start time: `max(0, start - offset)`, rounded to whole ms.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn adjusted_start_ms(start_time_ms: i64, audio_offset_ms: f64) -> u64 {
    let adjusted = (start_time_ms as f64 - audio_offset_ms).round();
    if adjusted.is_nan() || adjusted <= 0.0 {
        0
    } else {
        adjusted as u64
    }
}

/// Build the `adelay`/`volume`/`amix` filter graph for the given tracks.
#[must_use]
pub fn build_filter_graph(tracks: &[MixTrack]) -> String {
    let mut graph = String::new();
    for (i, track) in tracks.iter().enumerate() {
        let d = track.adjusted_start_ms;
        let _ = write!(graph, "[{i}]adelay={d}|{d},volume={}[a{i}];", track.gain);
    }
    for i in 0..tracks.len() {
        let _ = write!(graph, "[a{i}]");
    }
    let _ = write!(graph, "amix=inputs={}:normalize=0[out]", tracks.len());
    graph
}

/// Order, rebase and weight `segments` without running anything.
///
/// The caller's slice is left untouched; ties keep their original order.
///
/// # Errors
///
/// Returns `ClapboardError::EmptyInput` when `segments` is empty.
pub fn plan_mixdown(
    segments: &[AudioSegment],
    audio_offset_ms: f64,
) -> ClapboardResult<MixdownPlan> {
    if segments.is_empty() {
        return Err(ClapboardError::EmptyInput);
    }

    let mut ordered: Vec<&AudioSegment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.start_time_ms);

    let tracks: Vec<MixTrack> = ordered
        .into_iter()
        .map(|s| MixTrack {
            path: s.path.clone(),
            category: s.category,
            original_start_ms: s.start_time_ms,
            adjusted_start_ms: adjusted_start_ms(s.start_time_ms, audio_offset_ms),
            gain: s.category.gain(),
        })
        .collect();

    let filter_graph = build_filter_graph(&tracks);
    Ok(MixdownPlan {
        tracks,
        audio_offset_ms,
        filter_graph,
    })
}

/// Build ffmpeg arguments for a mixdown plan.
#[must_use]
pub fn build_mixdown_args(plan: &MixdownPlan, output: &Path) -> Vec<String> {
    let mut args = vec!["-y".to_string()];
    for track in &plan.tracks {
        args.push("-i".to_string());
        args.push(track.path.to_string_lossy().to_string());
    }
    args.extend([
        "-filter_complex".to_string(),
        plan.filter_graph.clone(),
        "-map".to_string(),
        "[out]".to_string(),
        output.to_string_lossy().to_string(),
    ]);
    args
}

fn log_plan(plan: &MixdownPlan) {
    tracing::info!(
        segments = plan.tracks.len(),
        audio_offset_ms = plan.audio_offset_ms,
        "Composing audio mixdown"
    );
    for (index, track) in plan.tracks.iter().take(LOGGED_SEGMENTS).enumerate() {
        tracing::debug!(
            index,
            original_ms = track.original_start_ms,
            adjusted_ms = track.adjusted_start_ms,
            category = %track.category,
            file = %track.path.file_name().map_or_else(
                || track.path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            ),
            "Placing segment"
        );
    }
    if plan.tracks.len() > LOGGED_SEGMENTS {
        tracing::debug!(
            "... and {} more segments",
            plan.tracks.len() - LOGGED_SEGMENTS
        );
    }
}

/// Mix `segments` into `output`, rebased by `audio_offset_ms`.
///
/// # Errors
///
/// Returns `ClapboardError::EmptyInput` before touching ffmpeg when there is
/// nothing to mix; otherwise propagates ffmpeg failures.
pub async fn compose_mixdown(
    tool: &dyn MediaTool,
    config: &EngineConfig,
    segments: &[AudioSegment],
    audio_offset_ms: f64,
    output: &Path,
) -> ClapboardResult<PathBuf> {
    let plan = plan_mixdown(segments, audio_offset_ms)?;
    log_plan(&plan);
    let command = ToolCommand::new(&config.ffmpeg).args(build_mixdown_args(&plan, output));
    tool.run(&command).await?;
    Ok(output.to_path_buf())
}
