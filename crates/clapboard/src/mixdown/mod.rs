//! Audio timeline mixdown.

pub mod composer;
pub mod segment;

pub use composer::{
    adjusted_start_ms, build_filter_graph, build_mixdown_args, compose_mixdown, plan_mixdown,
    MixTrack, MixdownPlan,
};
pub use segment::{AudioSegment, GainTier, KeystrokeVariant, SoundCategory, KEYSTROKE_VARIANTS};
