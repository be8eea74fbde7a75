//! Pitch spelling: letters, accidentals, and pitch-class math.
//!
//! A [`PitchSpelling`] is a letter from the fixed 7-letter cycle plus a signed
//! accidental count (positive = sharps, negative = flats). It resolves
//! deterministically to a pitch class in `[0, 11]` via the diatonic interval
//! table `(2, 2, 1, 2, 2, 2, 1)` plus the accidental magnitude, taken mod 12.
//!
//! Two spellings with different letters can name the same pitch class (`F#`
//! and `Gb`); they stay distinct values until rendered.

use std::fmt;

use crate::error::ChordError;
use crate::key::Key;

/// The 7 letters in C-first cycle order.
pub const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

/// Semitone step up from each letter to the next, C-first.
/// The same table read from index 0 is the major-scale interval pattern.
pub(crate) const LETTER_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

const DEGREE_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A note letter, independent of accidentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Position in the C-first letter cycle.
    pub fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Pitch class of the natural (unaltered) letter.
    pub fn natural_pitch_class(self) -> i32 {
        LETTER_STEPS[..self.index()].iter().sum()
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A letter plus a signed accidental count.
///
/// # Example
/// ```
/// use chordal::PitchSpelling;
///
/// let f_sharp = PitchSpelling::from_text("F#")?;
/// assert_eq!(f_sharp.pitch_class(), 6);
/// assert_eq!(f_sharp.to_string(), "F#");
///
/// let g_flat = PitchSpelling::from_text("Gb")?;
/// assert_eq!(g_flat.pitch_class(), 6);
/// assert_ne!(f_sharp, g_flat);
/// # Ok::<(), chordal::ChordError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchSpelling {
    pub letter: Letter,
    /// Positive counts sharps, negative counts flats.
    pub accidental: i8,
}

impl PitchSpelling {
    pub fn new(letter: Letter, accidental: i8) -> Self {
        Self { letter, accidental }
    }

    /// Parse a letter followed by a run of 0-2 identical accidental symbols.
    pub fn from_text(text: &str) -> Result<Self, ChordError> {
        let invalid = || ChordError::InvalidPitchText(text.to_string());
        let mut chars = text.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;
        let accidentals: Vec<char> = chars.collect();
        if accidentals.len() > 2 {
            return Err(invalid());
        }
        let accidental = match accidentals.first() {
            None => 0,
            Some(&first) => {
                if accidentals.iter().any(|&c| c != first) {
                    return Err(invalid());
                }
                match first {
                    '#' => accidentals.len() as i8,
                    'b' => -(accidentals.len() as i8),
                    _ => return Err(invalid()),
                }
            }
        };
        Ok(Self { letter, accidental })
    }

    /// Pitch class in `[0, 11]`.
    pub fn pitch_class(&self) -> usize {
        (self.letter.natural_pitch_class() + self.accidental as i32).rem_euclid(12) as usize
    }

    /// Shortest circular signed distance from `other` to `self`, in `[-6, 5]`.
    pub fn interval_to(&self, other: &PitchSpelling) -> i32 {
        (self.pitch_class() as i32 - other.pitch_class() as i32 + 6).rem_euclid(12) - 6
    }

    /// The same letter raised one semitone.
    pub fn sharpened(&self) -> PitchSpelling {
        Self::new(self.letter, self.accidental + 1)
    }

    /// The same letter lowered one semitone.
    pub fn flattened(&self) -> PitchSpelling {
        Self::new(self.letter, self.accidental - 1)
    }

    /// Render as accidentals plus a roman numeral relative to `key`'s scale.
    ///
    /// The scale tone with the same letter anchors the numeral; the signed
    /// semitone difference to it becomes the accidental prefix.
    ///
    /// # Example
    /// ```
    /// use chordal::{Key, PitchSpelling};
    ///
    /// let key = Key::from_name("C")?;
    /// assert_eq!(PitchSpelling::from_text("F#")?.degree_text(&key), "#IV");
    /// assert_eq!(PitchSpelling::from_text("G")?.degree_text(&key), "V");
    /// # Ok::<(), chordal::ChordError>(())
    /// ```
    pub fn degree_text(&self, key: &Key) -> String {
        let scale = key.major_scale();
        for (degree, tone) in scale.iter().enumerate() {
            if tone.letter == self.letter {
                let diff = self.interval_to(tone);
                let mut text = if diff < 0 {
                    "b".repeat(-diff as usize)
                } else {
                    "#".repeat(diff as usize)
                };
                text.push_str(DEGREE_NUMERALS[degree]);
                return text;
            }
        }
        unreachable!("a major scale uses every letter exactly once")
    }
}

impl fmt::Display for PitchSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        let symbol = if self.accidental < 0 { 'b' } else { '#' };
        for _ in 0..self.accidental.unsigned_abs() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_letters() {
        let pitch = PitchSpelling::from_text("C").unwrap();
        assert_eq!(pitch.letter, Letter::C);
        assert_eq!(pitch.accidental, 0);
        assert_eq!(pitch.pitch_class(), 0);
    }

    #[test]
    fn parses_accidental_runs() {
        assert_eq!(PitchSpelling::from_text("F#").unwrap().pitch_class(), 6);
        assert_eq!(PitchSpelling::from_text("Bb").unwrap().pitch_class(), 10);
        assert_eq!(PitchSpelling::from_text("Cb").unwrap().pitch_class(), 11);
        assert_eq!(PitchSpelling::from_text("B##").unwrap().pitch_class(), 1);
        assert_eq!(PitchSpelling::from_text("Dbb").unwrap().pitch_class(), 0);
    }

    #[test]
    fn rejects_malformed_spellings() {
        assert!(PitchSpelling::from_text("H").is_err());
        assert!(PitchSpelling::from_text("").is_err());
        assert!(PitchSpelling::from_text("C#b").is_err());
        assert!(PitchSpelling::from_text("C###").is_err());
        assert!(PitchSpelling::from_text("c").is_err());
    }

    #[test]
    fn interval_is_shortest_circular_distance() {
        let c = PitchSpelling::from_text("C").unwrap();
        let b = PitchSpelling::from_text("B").unwrap();
        let f_sharp = PitchSpelling::from_text("F#").unwrap();
        assert_eq!(b.interval_to(&c), -1);
        assert_eq!(c.interval_to(&b), 1);
        assert_eq!(f_sharp.interval_to(&c), -6);
    }

    #[test]
    fn sharpen_and_flatten_adjust_by_one() {
        let bb = PitchSpelling::from_text("Bb").unwrap();
        assert_eq!(bb.sharpened().to_string(), "B");
        assert_eq!(bb.flattened().to_string(), "Bbb");
    }

    #[test]
    fn display_round_trips() {
        for text in ["C", "F#", "Gb", "A##", "Ebb"] {
            let pitch = PitchSpelling::from_text(text).unwrap();
            assert_eq!(pitch.to_string(), text);
        }
    }

    #[test]
    fn degree_text_in_g_major() {
        let key = Key::from_name("G").unwrap();
        assert_eq!(
            PitchSpelling::from_text("C").unwrap().degree_text(&key),
            "IV"
        );
        assert_eq!(
            PitchSpelling::from_text("F").unwrap().degree_text(&key),
            "bVII"
        );
    }
}
