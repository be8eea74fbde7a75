//! The 12-slot interval membership set above a chord root.
//!
//! A [`ChordToneSet`] records which of the 12 equal-tempered intervals
//! (0 = unison through 11 = major seventh) sound above a chord's root.
//! Slot 0 is set for every sounding chord; silence is represented one level
//! up, by a non-chord [`crate::Chord`] that carries no tone set at all.

/// Unison / the chord root.
pub const ROOT: usize = 0;
/// Flat ninth tension.
pub const FLAT_NINTH: usize = 1;
/// Major second; doubles as the sus2 tone and the plain ninth tension.
pub const MAJOR_SECOND: usize = 2;
/// Minor third; doubles as the sharp-ninth tension.
pub const MINOR_THIRD: usize = 3;
/// Major third.
pub const MAJOR_THIRD: usize = 4;
/// Perfect fourth; doubles as the sus4 tone and the eleventh tension.
pub const PERFECT_FOURTH: usize = 5;
/// Flatted fifth; doubles as the sharp-eleventh tension.
pub const FLAT_FIFTH: usize = 6;
/// Perfect fifth.
pub const PERFECT_FIFTH: usize = 7;
/// Sharped fifth; doubles as the flat-thirteenth tension.
pub const SHARP_FIFTH: usize = 8;
/// Major sixth; doubles as the thirteenth tension and the diminished seventh.
pub const MAJOR_SIXTH: usize = 9;
/// Minor seventh.
pub const MINOR_SEVENTH: usize = 10;
/// Major seventh.
pub const MAJOR_SEVENTH: usize = 11;

/// Membership set over the 12 intervals above a chord root.
///
/// # Example
/// ```
/// use chordal::ChordToneSet;
///
/// let minor_seventh_chord = ChordToneSet::from_intervals(&[0, 3, 7, 10]);
/// assert!(minor_seventh_chord.contains(3));
/// assert!(!minor_seventh_chord.contains(4));
/// assert_eq!(minor_seventh_chord.intervals(), vec![0, 3, 7, 10]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChordToneSet {
    slots: [bool; 12],
}

impl ChordToneSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of intervals. Intervals are taken mod 12.
    pub fn from_intervals(intervals: &[usize]) -> Self {
        let mut tones = Self::new();
        for &interval in intervals {
            tones.slots[interval % 12] = true;
        }
        tones
    }

    /// Rotate a raw pitch-class set so that `root` lands on interval 0.
    ///
    /// Slot `i` of the result is `pitch_classes[(root + i) % 12]`.
    pub fn from_pitch_classes(pitch_classes: &[bool; 12], root: usize) -> Self {
        let mut tones = Self::new();
        for i in 0..12 {
            tones.slots[i] = pitch_classes[(root + i) % 12];
        }
        tones
    }

    pub fn contains(&self, interval: usize) -> bool {
        self.slots[interval % 12]
    }

    pub fn set(&mut self, interval: usize) {
        self.slots[interval % 12] = true;
    }

    pub fn clear(&mut self, interval: usize) {
        self.slots[interval % 12] = false;
    }

    /// The set intervals in ascending order.
    pub fn intervals(&self) -> Vec<usize> {
        (0..12).filter(|&i| self.slots[i]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|&slot| !slot)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&slot| slot).count()
    }
}
