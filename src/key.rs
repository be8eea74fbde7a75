//! Keys, major scales, and enharmonic spelling candidates.
//!
//! A [`Key`] names a major key by its tonic spelling. Relative-minor names
//! resolve through a fixed 15-entry table covering all 12 pitch classes plus
//! the three enharmonic duplicates at the flat/sharp boundary.
//!
//! The scale construction follows the standard key-signature rule: scale
//! degree `i` uses the `i`-th letter starting from the tonic letter, cycling
//! through all 7 letters exactly once, with the accidental count chosen so the
//! cumulative semitone distance from the tonic matches the major-scale
//! pattern. No letter is skipped or repeated.

use crate::error::ChordError;
use crate::pitch::{PitchSpelling, LETTERS, LETTER_STEPS};

/// Relative-minor label to relative-major spelling. Reproduced bit-exact.
pub const RELATIVE_MAJOR: [(&str, &str); 15] = [
    ("Am", "C"),
    ("A#m", "C#"),
    ("Bbm", "Db"),
    ("Bm", "D"),
    ("Cm", "Eb"),
    ("C#m", "E"),
    ("Dm", "F"),
    ("D#m", "F#"),
    ("Ebm", "Gb"),
    ("Em", "G"),
    ("Fm", "Ab"),
    ("F#m", "A"),
    ("Gm", "Bb"),
    ("G#m", "B"),
    ("Abm", "Cb"),
];

/// A major key, identified by its tonic spelling.
///
/// # Example
/// ```
/// use chordal::Key;
///
/// let key = Key::from_name("Am")?;
/// assert_eq!(key.tonic().to_string(), "C");
///
/// let spelled: Vec<String> = key.major_scale().iter().map(|p| p.to_string()).collect();
/// assert_eq!(spelled, ["C", "D", "E", "F", "G", "A", "B"]);
/// # Ok::<(), chordal::ChordError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    tonic: PitchSpelling,
}

impl Key {
    /// Resolve a key name: a major tonic spelling, a relative-minor label, or
    /// a combined `"C/Am"` label (the part before the slash wins).
    pub fn from_name(name: &str) -> Result<Key, ChordError> {
        let label = name.split('/').next().unwrap_or(name);
        let major = RELATIVE_MAJOR
            .iter()
            .find(|(minor, _)| *minor == label)
            .map(|(_, major)| *major)
            .unwrap_or(label);
        let tonic = PitchSpelling::from_text(major)
            .map_err(|_| ChordError::UnknownKey(name.to_string()))?;
        Ok(Key { tonic })
    }

    pub fn tonic(&self) -> PitchSpelling {
        self.tonic
    }

    /// The 7 scale tones, one per letter, tonic first.
    pub fn major_scale(&self) -> [PitchSpelling; 7] {
        let start = self.tonic.letter.index();
        let natural_tonic = PitchSpelling::new(self.tonic.letter, 0);
        // Cumulative natural semitones from the tonic, starting at the
        // natural letter's offset so accidentals fall out as the difference.
        let mut natural = natural_tonic.interval_to(&self.tonic);
        let mut target = 0;
        let mut scale = [self.tonic; 7];
        for (i, slot) in scale.iter_mut().enumerate() {
            let letter = LETTERS[(start + i) % 7];
            *slot = PitchSpelling::new(letter, (target - natural) as i8);
            natural += LETTER_STEPS[(start + i) % 7];
            target += LETTER_STEPS[i];
        }
        scale
    }

    /// Candidate spellings for a raw pitch class, relative to this key.
    ///
    /// An exact scale tone wins outright. Otherwise every scale tone exactly
    /// one semitone away contributes its letter with one added sharp (target
    /// above) or flat (target below), in scale order. Spelling never
    /// introduces a letter outside the scale, so the result has 0-2 entries.
    ///
    /// # Example
    /// ```
    /// use chordal::Key;
    ///
    /// let key = Key::from_name("C")?;
    /// let spelled: Vec<String> = key.spellings_for(6).iter().map(|p| p.to_string()).collect();
    /// assert_eq!(spelled, ["F#", "Gb"]);
    /// # Ok::<(), chordal::ChordError>(())
    /// ```
    pub fn spellings_for(&self, pitch_class: usize) -> Vec<PitchSpelling> {
        let mut spellings = Vec::new();
        for tone in self.major_scale() {
            if tone.pitch_class() == pitch_class {
                return vec![tone];
            }
            let interval =
                (pitch_class as i32 - tone.pitch_class() as i32 + 6).rem_euclid(12) - 6;
            if interval == 1 {
                spellings.push(tone.sharpened());
            }
            if interval == -1 {
                spellings.push(tone.flattened());
            }
        }
        spellings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_text(name: &str) -> Vec<String> {
        Key::from_name(name)
            .unwrap()
            .major_scale()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn c_major_scale_is_all_naturals() {
        assert_eq!(scale_text("C"), ["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn sharp_key_scales() {
        assert_eq!(scale_text("D"), ["D", "E", "F#", "G", "A", "B", "C#"]);
        assert_eq!(scale_text("F#"), ["F#", "G#", "A#", "B", "C#", "D#", "E#"]);
    }

    #[test]
    fn flat_key_scales() {
        assert_eq!(scale_text("Eb"), ["Eb", "F", "G", "Ab", "Bb", "C", "D"]);
        assert_eq!(scale_text("Cb"), ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]);
    }

    #[test]
    fn minor_names_resolve_to_relative_major() {
        assert_eq!(scale_text("Am"), scale_text("C"));
        assert_eq!(scale_text("Ebm"), scale_text("Gb"));
        assert_eq!(scale_text("Abm"), scale_text("Cb"));
    }

    #[test]
    fn combined_labels_use_the_major_half() {
        assert_eq!(scale_text("G/Em"), scale_text("G"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            Key::from_name("H"),
            Err(ChordError::UnknownKey(_))
        ));
    }

    #[test]
    fn exact_scale_tone_spells_uniquely() {
        let key = Key::from_name("C").unwrap();
        let spellings = key.spellings_for(7);
        assert_eq!(spellings.len(), 1);
        assert_eq!(spellings[0].to_string(), "G");
    }

    #[test]
    fn off_scale_tone_spells_both_ways() {
        let key = Key::from_name("C").unwrap();
        let spelled: Vec<String> = key
            .spellings_for(8)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(spelled, ["G#", "Ab"]);
    }

    #[test]
    fn spelling_stays_inside_scale_letters() {
        // pc 1 in C major comes from the C and D scale tones only
        let key = Key::from_name("C").unwrap();
        let spelled: Vec<String> = key
            .spellings_for(1)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(spelled, ["C#", "Db"]);
    }
}
