//! Clapboard: Synchronization & Audio Timeline Engine
//!
//! Turns a raw browser screen capture plus independently timed speech and
//! UI sound clips into one narrated video whose audio lands on the frame
//! where each action happened.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     CLAPBOARD Architecture                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐          │
//! │  │ session      │   │ sync         │   │ mixdown      │          │
//! │  │ AudioTimeline│──►│ detect, trim │──►│ adelay/amix  │──► mux   │
//! │  │ SoundBank    │   │ TrimPlan     │   │ gain tiers   │          │
//! │  └──────────────┘   └──────────────┘   └──────────────┘          │
//! │          │                  │                  │                 │
//! │          └──────── tool::MediaTool (ffmpeg / ffprobe) ───────────┘
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never decodes media itself. Every pixel and sample is handled
//! by ffmpeg; this crate only decides what ffmpeg is told to do.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Engine configuration (binaries, marker color, encoder settings).
pub mod config;

/// Stream probing: frame rate and duration.
#[allow(clippy::missing_errors_doc)]
pub mod probe;

mod result;

/// Session accumulator and sound clip resolution.
pub mod session;

/// Sync-marker detection, trimming and finalize orchestration.
pub mod sync;

/// Timed audio mixdown.
pub mod mixdown;

/// External tool execution seam.
pub mod tool;

pub use config::{EncodeSettings, EngineConfig, DEFAULT_SCAN_FRAMES};
pub use mixdown::{
    compose_mixdown, plan_mixdown, AudioSegment, GainTier, KeystrokeVariant, MixTrack,
    MixdownPlan, SoundCategory,
};
pub use probe::{parse_duration_ms, probe_audio_duration_ms, probe_frame_rate, FrameRate};
pub use result::{ClapboardError, ClapboardResult};
pub use session::{AudioTimeline, KeystrokeSounds, SoundBank, SoundClip, SoundSource};
pub use sync::{
    detect_sync_range, is_marker_frame, trim_sync_frames, Delivery, FinalizeReport,
    FinalizeRequest, MarkerRun, MarkerSpec, SyncCoordinator, SyncOutcome, SyncRange, TrimPlan,
};
pub use tool::{MediaTool, MockTool, SystemTool, ToolCommand, ToolOutput};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::config::{EncodeSettings, EngineConfig};
    pub use super::mixdown::{compose_mixdown, plan_mixdown, AudioSegment, SoundCategory};
    pub use super::result::{ClapboardError, ClapboardResult};
    pub use super::session::{AudioTimeline, KeystrokeSounds, SoundBank, SoundSource};
    pub use super::sync::{
        detect_sync_range, FinalizeReport, FinalizeRequest, SyncCoordinator, SyncOutcome,
        SyncRange, TrimPlan,
    };
    pub use super::tool::{MediaTool, MockTool, SystemTool, ToolCommand};
}
