//! Sync marker detection results and the trim arithmetic derived from them.

use serde::Serialize;

/// Inclusive range of leading frames that carry the sync marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MarkerRun {
    first: usize,
    last: usize,
}

impl MarkerRun {
    /// Create a run; `None` if `last < first`.
    #[must_use]
    pub const fn new(first: usize, last: usize) -> Option<Self> {
        if last < first {
            None
        } else {
            Some(Self { first, last })
        }
    }

    /// Index of the first marker frame
    #[must_use]
    pub const fn first(&self) -> usize {
        self.first
    }

    /// Index of the last marker frame of the contiguous run
    #[must_use]
    pub const fn last(&self) -> usize {
        self.last
    }

    /// Number of frames in the run
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Where the marker sits in a recording, plus the recording's frame duration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SyncRange {
    /// Marker frames, `None` when no leading frame matched
    pub marker: Option<MarkerRun>,
    /// Milliseconds per frame
    pub frame_duration_ms: f64,
}

impl SyncRange {
    /// Trim plan for this range, `None` when there is no marker.
    #[must_use]
    pub fn trim_plan(&self) -> Option<TrimPlan> {
        self.marker
            .map(|run| TrimPlan::from_run(run, self.frame_duration_ms))
    }
}

/// How much of the recording to drop and where the marker started.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrimPlan {
    /// Frames removed from the front (`last + 1`)
    pub frames_to_trim: usize,
    /// Milliseconds per frame
    pub frame_duration_ms: f64,
    /// Length of the removed prefix in milliseconds
    pub trim_duration_ms: f64,
    /// Time of the first marker frame in milliseconds
    pub sync_offset_ms: f64,
}

impl TrimPlan {
    /// Derive the plan from a marker run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_run(run: MarkerRun, frame_duration_ms: f64) -> Self {
        let frames_to_trim = run.last() + 1;
        Self {
            frames_to_trim,
            frame_duration_ms,
            trim_duration_ms: frames_to_trim as f64 * frame_duration_ms,
            sync_offset_ms: run.first() as f64 * frame_duration_ms,
        }
    }

    /// Amount subtracted from every audio timestamp.
    ///
    /// Audio events are timed from the first marker frame; the trimmed video
    /// starts after the last one.
    #[must_use]
    pub fn audio_offset_ms(&self) -> f64 {
        self.trim_duration_ms - self.sync_offset_ms
    }

    /// Seek position in seconds passed to the trimmer
    #[must_use]
    pub fn start_secs(&self) -> f64 {
        self.trim_duration_ms / 1000.0
    }
}

/// What the coordinator learned about the recording.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "plan", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// No recording was supplied
    NoVideo,
    /// Recording present but no marker in the scanned frames
    MarkerAbsent,
    /// Marker found and trimmed
    MarkerFound(TrimPlan),
}

impl SyncOutcome {
    /// Offset to rebase audio onto the delivered video
    #[must_use]
    pub fn audio_offset_ms(&self) -> f64 {
        match self {
            Self::NoVideo | Self::MarkerAbsent => 0.0,
            Self::MarkerFound(plan) => plan.audio_offset_ms(),
        }
    }

    /// Trim plan, if one was applied
    #[must_use]
    pub const fn trim_plan(&self) -> Option<&TrimPlan> {
        match self {
            Self::MarkerFound(plan) => Some(plan),
            Self::NoVideo | Self::MarkerAbsent => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_run_rejects_inverted_range() {
        assert!(MarkerRun::new(5, 4).is_none());
        let run = MarkerRun::new(4, 4).unwrap();
        assert_eq!(run.frame_count(), 1);
    }

    #[test]
    fn test_offset_algebra() {
        let range = SyncRange {
            marker: MarkerRun::new(4, 11),
            frame_duration_ms: 40.0,
        };
        let plan = range.trim_plan().unwrap();
        assert_eq!(plan.frames_to_trim, 12);
        assert!((plan.sync_offset_ms - 160.0).abs() < 1e-9);
        assert!((plan.trim_duration_ms - 480.0).abs() < 1e-9);
        assert!((plan.audio_offset_ms() - 320.0).abs() < 1e-9);
        assert!((plan.start_secs() - 0.48).abs() < 1e-9);
    }

    #[test]
    fn test_marker_at_frame_zero() {
        let plan = TrimPlan::from_run(MarkerRun::new(0, 2).unwrap(), 40.0);
        assert_eq!(plan.frames_to_trim, 3);
        assert!((plan.sync_offset_ms).abs() < 1e-9);
        assert!((plan.audio_offset_ms() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_marker_has_no_plan() {
        let range = SyncRange {
            marker: None,
            frame_duration_ms: 33.3,
        };
        assert!(range.trim_plan().is_none());
    }

    #[test]
    fn test_outcome_offsets() {
        assert!(SyncOutcome::NoVideo.audio_offset_ms().abs() < f64::EPSILON);
        assert!(SyncOutcome::MarkerAbsent.audio_offset_ms().abs() < f64::EPSILON);
        let plan = TrimPlan::from_run(MarkerRun::new(4, 11).unwrap(), 40.0);
        let found = SyncOutcome::MarkerFound(plan);
        assert!((found.audio_offset_ms() - 320.0).abs() < 1e-9);
        assert_eq!(found.trim_plan(), Some(&plan));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SyncOutcome::MarkerAbsent).unwrap();
        assert_eq!(json["outcome"], "marker_absent");

        let plan = TrimPlan::from_run(MarkerRun::new(1, 2).unwrap(), 40.0);
        let json = serde_json::to_value(SyncOutcome::MarkerFound(plan)).unwrap();
        assert_eq!(json["outcome"], "marker_found");
        assert_eq!(json["plan"]["frames_to_trim"], 3);
    }

    #[test]
    fn test_sync_range_json_shape() {
        let range = SyncRange {
            marker: MarkerRun::new(2, 5),
            frame_duration_ms: 40.0,
        };
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["marker"]["first"], 2);
        assert_eq!(json["marker"]["last"], 5);
    }
}
