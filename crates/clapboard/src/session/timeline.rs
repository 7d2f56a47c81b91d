//! Per-session accumulator of audio events.
//!
//! Narration arrives with its clip already rendered; UI sounds arrive as bare
//! timestamps and are resolved to clips only when the session is drained, so
//! each category is looked up once no matter how many times it fired.

use super::keystrokes::KeystrokeSounds;
use super::sounds::{SoundClip, SoundSource};
use crate::mixdown::{AudioSegment, SoundCategory};
use crate::result::ClapboardResult;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
enum TimelineEvent {
    Narration {
        path: PathBuf,
        start_ms: i64,
        duration_ms: u64,
    },
    Sound {
        category: SoundCategory,
        time_ms: i64,
    },
}

/// Audio events recorded during one session, in recording order.
#[derive(Clone, Debug, Default)]
pub struct AudioTimeline {
    events: Vec<TimelineEvent>,
}

impl AudioTimeline {
    /// Empty timeline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered narration clip.
    pub fn record_narration(&mut self, path: impl Into<PathBuf>, start_ms: i64, duration_ms: u64) {
        self.events.push(TimelineEvent::Narration {
            path: path.into(),
            start_ms,
            duration_ms,
        });
    }

    /// Record a UI sound at `time_ms`.
    pub fn record_sound(&mut self, category: SoundCategory, time_ms: i64) {
        self.events.push(TimelineEvent::Sound { category, time_ms });
    }

    /// Record one keypress per character of `text`, `spacing_ms` apart.
    pub fn record_keystrokes(
        &mut self,
        text: &str,
        start_ms: i64,
        spacing_ms: i64,
        sounds: &mut KeystrokeSounds,
    ) {
        let mut time_ms = start_ms;
        for c in text.chars() {
            self.record_sound(sounds.sound_for(c), time_ms);
            time_ms = time_ms.saturating_add(spacing_ms);
        }
    }

    /// Number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the timeline into audio segments.
    ///
    /// Each distinct sound category is resolved once; segments keep
    /// recording order.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub async fn drain(self, source: &dyn SoundSource) -> ClapboardResult<Vec<AudioSegment>> {
        let mut clips: HashMap<SoundCategory, SoundClip> = HashMap::new();
        for event in &self.events {
            if let TimelineEvent::Sound { category, .. } = event {
                if !clips.contains_key(category) {
                    let clip = source.resolve(*category).await?;
                    clips.insert(*category, clip);
                }
            }
        }

        let mut segments = Vec::with_capacity(self.events.len());
        for event in self.events {
            match event {
                TimelineEvent::Narration {
                    path,
                    start_ms,
                    duration_ms,
                } => segments.push(AudioSegment::new(
                    path,
                    start_ms,
                    duration_ms,
                    SoundCategory::Narration,
                )),
                TimelineEvent::Sound { category, time_ms } => {
                    if let Some(clip) = clips.get(&category) {
                        segments.push(AudioSegment::new(
                            clip.path.clone(),
                            time_ms,
                            clip.duration_ms,
                            category,
                        ));
                    }
                }
            }
        }
        tracing::debug!(
            segments = segments.len(),
            resolved = clips.len(),
            "Drained audio timeline"
        );
        Ok(segments)
    }
}
