//! Visual sync-marker detection, trimming and audio re-basing.
//!
//! The recorder flashes a full-frame magenta marker at the moment audio
//! timing starts. Locating that marker in the recording gives a shared time
//! origin for two otherwise unrelated clocks.
//!
//! # Architecture
//!
//! ```text
//! Recording ──→ detection::detect_sync_range ──→ SyncRange
//!                  │ (probe fps, extract PPM,          │
//!                  │  classifier::is_marker_frame)     ▼
//!                  │                              TrimPlan
//!                  │                                   │
//!                  └────── trim::trim_sync_frames ◀────┤
//!                                                      │ audio_offset_ms
//!                     mixdown::compose_mixdown ◀───────┘
//!                                  │
//!                  coordinator::SyncCoordinator (mux) ──→ FinalizeReport
//! ```

pub mod classifier;
pub mod coordinator;
pub mod detection;
pub mod trim;
pub mod types;

pub use classifier::{is_marker_frame, match_ratio, pixel_data, MarkerSpec};
pub use coordinator::{
    build_mux_args, Delivery, FinalizeReport, FinalizeRequest, SyncCoordinator, MIXED_AUDIO,
    TRIMMED_VIDEO,
};
pub use detection::{build_extract_args, detect_sync_range, MarkerScan};
pub use trim::{build_transcode_args, build_trim_args, format_seek_secs, trim_sync_frames};
pub use types::{MarkerRun, SyncOutcome, SyncRange, TrimPlan};
