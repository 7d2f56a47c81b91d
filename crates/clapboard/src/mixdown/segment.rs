//! Typed audio clips and their mixing gain.

use crate::result::ClapboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Number of tonal variants per keypress family
pub const KEYSTROKE_VARIANTS: u8 = 5;

/// One of the tonal variants `1..=5` of a keypress sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeystrokeVariant(u8);

impl KeystrokeVariant {
    /// Variant 1
    pub const FIRST: Self = Self(1);

    /// Create a variant; `None` outside `1..=5`.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= KEYSTROKE_VARIANTS {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Variant number
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Following variant, wrapping from 5 back to 1
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 % KEYSTROKE_VARIANTS + 1)
    }
}

/// Kind of sound an audio segment carries.
///
/// Serialized as kebab-case names: `narration`, `click`, `keypress`,
/// `keypress-return`, `keypress-letter-{1..5}`, `keypress-space-{1..5}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SoundCategory {
    /// Synthesized speech
    Narration,
    /// Mouse click
    Click,
    /// Generic keypress
    Keypress,
    /// Return key
    KeypressReturn,
    /// Letter key, with tonal variant
    KeypressLetter(KeystrokeVariant),
    /// Space bar, with tonal variant
    KeypressSpace(KeystrokeVariant),
}

/// Volume tier applied in the mixdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GainTier {
    /// Speech, full volume
    Voice,
    /// UI effects such as clicks
    Effect,
    /// Typing, kept well under speech
    Keystroke,
}

impl GainTier {
    /// Linear volume multiplier
    #[must_use]
    pub const fn gain(self) -> f64 {
        match self {
            Self::Voice => 1.0,
            Self::Effect => 0.5,
            Self::Keystroke => 0.05,
        }
    }
}

impl SoundCategory {
    /// Every category, in a stable order
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut all = vec![
            Self::Narration,
            Self::Click,
            Self::Keypress,
            Self::KeypressReturn,
        ];
        for n in 1..=KEYSTROKE_VARIANTS {
            if let Some(v) = KeystrokeVariant::new(n) {
                all.push(Self::KeypressLetter(v));
            }
        }
        for n in 1..=KEYSTROKE_VARIANTS {
            if let Some(v) = KeystrokeVariant::new(n) {
                all.push(Self::KeypressSpace(v));
            }
        }
        all
    }

    /// Mixing tier
    #[must_use]
    pub const fn tier(self) -> GainTier {
        match self {
            Self::Narration => GainTier::Voice,
            Self::Click => GainTier::Effect,
            Self::Keypress
            | Self::KeypressReturn
            | Self::KeypressLetter(_)
            | Self::KeypressSpace(_) => GainTier::Keystroke,
        }
    }

    /// Linear volume multiplier
    #[must_use]
    pub const fn gain(self) -> f64 {
        self.tier().gain()
    }

    /// Whether this is one of the keypress sounds
    #[must_use]
    pub const fn is_keystroke(self) -> bool {
        matches!(self.tier(), GainTier::Keystroke)
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narration => f.write_str("narration"),
            Self::Click => f.write_str("click"),
            Self::Keypress => f.write_str("keypress"),
            Self::KeypressReturn => f.write_str("keypress-return"),
            Self::KeypressLetter(v) => write!(f, "keypress-letter-{}", v.get()),
            Self::KeypressSpace(v) => write!(f, "keypress-space-{}", v.get()),
        }
    }
}

fn parse_variant(suffix: &str) -> Option<KeystrokeVariant> {
    suffix.parse::<u8>().ok().and_then(KeystrokeVariant::new)
}

impl FromStr for SoundCategory {
    type Err = ClapboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ClapboardError::UnknownCategory { raw: s.to_string() };
        match s {
            "narration" => Ok(Self::Narration),
            "click" => Ok(Self::Click),
            "keypress" => Ok(Self::Keypress),
            "keypress-return" => Ok(Self::KeypressReturn),
            _ => {
                if let Some(n) = s.strip_prefix("keypress-letter-") {
                    parse_variant(n).map(Self::KeypressLetter).ok_or_else(unknown)
                } else if let Some(n) = s.strip_prefix("keypress-space-") {
                    parse_variant(n).map(Self::KeypressSpace).ok_or_else(unknown)
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl TryFrom<String> for SoundCategory {
    type Error = ClapboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SoundCategory> for String {
    fn from(category: SoundCategory) -> Self {
        category.to_string()
    }
}

/// A clip placed on the session timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSegment {
    /// Clip file
    pub path: PathBuf,
    /// Start time in milliseconds, relative to the sync marker
    pub start_time_ms: i64,
    /// Clip length in milliseconds
    pub duration_ms: u64,
    /// Sound category
    pub category: SoundCategory,
}

impl AudioSegment {
    /// Create a segment
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        start_time_ms: i64,
        duration_ms: u64,
        category: SoundCategory,
    ) -> Self {
        Self {
            path: path.into(),
            start_time_ms,
            duration_ms,
            category,
        }
    }

    /// Start plus duration
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn end_time_ms(&self) -> i64 {
        self.start_time_ms.saturating_add(self.duration_ms as i64)
    }
}
