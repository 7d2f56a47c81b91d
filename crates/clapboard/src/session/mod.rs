//! Session-side bookkeeping: what played when, and which clip it used.

pub mod keystrokes;
pub mod sounds;
pub mod timeline;

pub use keystrokes::KeystrokeSounds;
pub use sounds::{SoundBank, SoundClip, SoundSource, MIN_SOUND_BYTES};
pub use timeline::AudioTimeline;
