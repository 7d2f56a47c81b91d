//! Typed characters to keypress sounds.

use crate::mixdown::{KeystrokeVariant, SoundCategory};

/// Picks a keypress sound per character.
///
/// Letters and spaces each cycle through their tonal variants so the same
/// clip never plays twice in a row within a family. The rotation is
/// deterministic, so a replayed session mixes identically.
#[derive(Clone, Debug, Default)]
pub struct KeystrokeSounds {
    last_letter: Option<KeystrokeVariant>,
    last_space: Option<KeystrokeVariant>,
}

fn next_variant(last: Option<KeystrokeVariant>) -> KeystrokeVariant {
    last.map_or(KeystrokeVariant::FIRST, KeystrokeVariant::next)
}

impl KeystrokeSounds {
    /// Start with no history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sound category for one typed character.
    pub fn sound_for(&mut self, c: char) -> SoundCategory {
        match c {
            '\n' | '\r' => SoundCategory::KeypressReturn,
            ' ' => {
                let v = next_variant(self.last_space);
                self.last_space = Some(v);
                SoundCategory::KeypressSpace(v)
            }
            _ => {
                let v = next_variant(self.last_letter);
                self.last_letter = Some(v);
                SoundCategory::KeypressLetter(v)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_families() {
        let mut sounds = KeystrokeSounds::new();
        assert!(matches!(sounds.sound_for('a'), SoundCategory::KeypressLetter(_)));
        assert!(matches!(sounds.sound_for(' '), SoundCategory::KeypressSpace(_)));
        assert_eq!(sounds.sound_for('\n'), SoundCategory::KeypressReturn);
        assert_eq!(sounds.sound_for('\r'), SoundCategory::KeypressReturn);
        assert!(matches!(sounds.sound_for('.'), SoundCategory::KeypressLetter(_)));
    }

    #[test]
    fn test_letters_cycle_through_variants() {
        let mut sounds = KeystrokeSounds::new();
        let names: Vec<String> = "abcdef"
            .chars()
            .map(|c| sounds.sound_for(c).to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "keypress-letter-1",
                "keypress-letter-2",
                "keypress-letter-3",
                "keypress-letter-4",
                "keypress-letter-5",
                "keypress-letter-1"
            ]
        );
    }

    #[test]
    fn test_families_rotate_independently() {
        let mut sounds = KeystrokeSounds::new();
        sounds.sound_for('a');
        sounds.sound_for('b');
        assert_eq!(sounds.sound_for(' ').to_string(), "keypress-space-1");
        assert_eq!(sounds.sound_for('c').to_string(), "keypress-letter-3");
    }

    proptest! {
        #[test]
        fn prop_no_variant_repeats_in_family(text in "[a-z \\n]{0,64}") {
            let mut sounds = KeystrokeSounds::new();
            let mut last_letter = None;
            let mut last_space = None;
            for c in text.chars() {
                match sounds.sound_for(c) {
                    SoundCategory::KeypressLetter(v) => {
                        prop_assert_ne!(Some(v), last_letter);
                        last_letter = Some(v);
                    }
                    SoundCategory::KeypressSpace(v) => {
                        prop_assert_ne!(Some(v), last_space);
                        last_space = Some(v);
                    }
                    other => prop_assert_eq!(other, SoundCategory::KeypressReturn),
                }
            }
        }
    }
}
