//! Encode direction of the chord-tone codec.
//!
//! Encoding runs in three unit-testable stages:
//!
//! 1. [`classify`] consumes the tone set through a fixed precedence of
//!    interval groups and records one categorical choice per group in a
//!    [`ChordClass`].
//! 2. [`ChordClass::text`] assembles the chord-symbol text from those
//!    choices.
//! 3. [`ChordClass::tone_set`] re-derives the tone set implied by the chosen
//!    tokens; [`render_tones`] compares it bit-for-bit against the input and
//!    fails with `InternalConsistency` on any mismatch. This self-check is a
//!    mandatory post-condition, not an optional assertion.
//!
//! An omitted third or fifth is classified but intentionally produces no
//! emitted annotation; tone sets that survive the self-check with a missing
//! degree simply render without it.

use crate::error::ChordError;
use crate::tones::{
    ChordToneSet, FLAT_FIFTH, FLAT_NINTH, MAJOR_SECOND, MAJOR_SEVENTH, MAJOR_SIXTH, MAJOR_THIRD,
    MINOR_SEVENTH, MINOR_THIRD, PERFECT_FIFTH, PERFECT_FOURTH, ROOT, SHARP_FIFTH,
};

/// Third quality, or a sus tone standing in for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Third {
    Major,
    Minor,
    Sus4,
    Sus2,
}

/// Fifth quality. `Diminished`/`Augmented` fold the third into a triad
/// quality token; `Flat`/`Sharp` keep the third and emit a `-5`/`+5` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fifth {
    Perfect,
    Diminished,
    Augmented,
    Flat,
    Sharp,
}

/// Seventh degree. `Diminished` is the double-flatted seventh of a dim7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seventh {
    Minor,
    Major,
    Diminished,
}

/// Upper-structure tensions, declared in canonical emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tension {
    FlatNine,
    Nine,
    SharpNine,
    Eleven,
    SharpEleven,
    FlatThirteen,
    Thirteen,
}

impl Tension {
    /// The interval this tension occupies in the tone set.
    pub fn interval(self) -> usize {
        match self {
            Tension::FlatNine => FLAT_NINTH,
            Tension::Nine => MAJOR_SECOND,
            Tension::SharpNine => MINOR_THIRD,
            Tension::Eleven => PERFECT_FOURTH,
            Tension::SharpEleven => FLAT_FIFTH,
            Tension::FlatThirteen => SHARP_FIFTH,
            Tension::Thirteen => MAJOR_SIXTH,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Tension::FlatNine => "b9",
            Tension::Nine => "9",
            Tension::SharpNine => "#9",
            Tension::Eleven => "11",
            Tension::SharpEleven => "#11",
            Tension::FlatThirteen => "b13",
            Tension::Thirteen => "13",
        }
    }
}

/// Categorical decomposition of a tone set, keyed by
/// (third, fifth, sixth, seventh) plus the tension residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordClass {
    pub third: Option<Third>,
    pub fifth: Option<Fifth>,
    pub sixth: bool,
    pub seventh: Option<Seventh>,
    /// Sorted into canonical order by [`classify`].
    pub tensions: Vec<Tension>,
    pub third_omitted: bool,
    pub fifth_omitted: bool,
}

/// Decompose a tone set through the fixed precedence of interval groups.
///
/// Each group consumes its matched bits from a working copy:
///
/// 1. The low-tension bit (b9).
/// 2. Third quality, Major > minor > sus4 > sus2; later matches in the group
///    become tensions (#9, 11, 9).
/// 3. Fifth quality, with the joint rule: flat-adjacent and sharp-adjacent
///    bits together reinterpret as Augmented (Major third) or Diminished
///    (minor third), turning the other bit into a tension; a lone altered bit
///    folds into dim/aug when the matching third allows, else stays a plain
///    altered fifth.
/// 4. Sixth/seventh: both sevenths together is a fault; a sixth next to any
///    seventh becomes the 13 tension; a sixth over a folded diminished fifth
///    with no seventh becomes the diminished seventh; a minor seventh over a
///    folded diminished fifth unfolds it back to minor third plus flat five.
pub fn classify(tones: &ChordToneSet) -> Result<ChordClass, ChordError> {
    let mut rest = *tones;
    rest.clear(ROOT);

    let mut third = None;
    let mut fifth = None;
    let mut sixth = false;
    let mut seventh = None;
    let mut tensions = Vec::new();

    if rest.contains(FLAT_NINTH) {
        rest.clear(FLAT_NINTH);
        tensions.push(Tension::FlatNine);
    }

    if rest.contains(MAJOR_THIRD) {
        rest.clear(MAJOR_THIRD);
        third = Some(Third::Major);
    }
    if rest.contains(MINOR_THIRD) {
        rest.clear(MINOR_THIRD);
        match third {
            None => third = Some(Third::Minor),
            Some(_) => tensions.push(Tension::SharpNine),
        }
    }
    if rest.contains(PERFECT_FOURTH) {
        rest.clear(PERFECT_FOURTH);
        match third {
            None => third = Some(Third::Sus4),
            Some(_) => tensions.push(Tension::Eleven),
        }
    }
    if rest.contains(MAJOR_SECOND) {
        rest.clear(MAJOR_SECOND);
        match third {
            None => third = Some(Third::Sus2),
            Some(_) => tensions.push(Tension::Nine),
        }
    }
    let third_omitted = third.is_none();

    if rest.contains(PERFECT_FIFTH) {
        rest.clear(PERFECT_FIFTH);
        fifth = Some(Fifth::Perfect);
    }

    if rest.contains(FLAT_FIFTH) && rest.contains(SHARP_FIFTH) {
        rest.clear(FLAT_FIFTH);
        rest.clear(SHARP_FIFTH);
        match fifth {
            None => match third {
                Some(Third::Major) => {
                    third = None;
                    fifth = Some(Fifth::Augmented);
                    tensions.push(Tension::SharpEleven);
                }
                Some(Third::Minor) => {
                    third = None;
                    fifth = Some(Fifth::Diminished);
                    tensions.push(Tension::FlatThirteen);
                }
                // No quality to fold into: the bits are dropped and the
                // self-check in render_tones rejects the set.
                _ => {}
            },
            Some(_) => {
                tensions.push(Tension::SharpEleven);
                tensions.push(Tension::FlatThirteen);
            }
        }
    }

    if rest.contains(FLAT_FIFTH) {
        rest.clear(FLAT_FIFTH);
        match fifth {
            None if third == Some(Third::Minor) => {
                third = None;
                fifth = Some(Fifth::Diminished);
            }
            None => fifth = Some(Fifth::Flat),
            Some(_) => tensions.push(Tension::SharpEleven),
        }
    }
    if rest.contains(SHARP_FIFTH) {
        rest.clear(SHARP_FIFTH);
        match fifth {
            None if third == Some(Third::Major) => {
                third = None;
                fifth = Some(Fifth::Augmented);
            }
            None => fifth = Some(Fifth::Sharp),
            Some(_) => tensions.push(Tension::FlatThirteen),
        }
    }
    let fifth_omitted = fifth.is_none();

    if rest.contains(MAJOR_SEVENTH) {
        rest.clear(MAJOR_SEVENTH);
        seventh = Some(Seventh::Major);
    }
    if rest.contains(MINOR_SEVENTH) {
        rest.clear(MINOR_SEVENTH);
        if seventh.is_some() {
            return Err(ChordError::ConflictingSeventh);
        }
        if fifth == Some(Fifth::Diminished) {
            // A minor seventh over a folded dim triad reads half-diminished.
            third = Some(Third::Minor);
            fifth = Some(Fifth::Flat);
        }
        seventh = Some(Seventh::Minor);
    }
    if rest.contains(MAJOR_SIXTH) {
        rest.clear(MAJOR_SIXTH);
        match seventh {
            None if fifth == Some(Fifth::Diminished) => seventh = Some(Seventh::Diminished),
            None => sixth = true,
            Some(_) => tensions.push(Tension::Thirteen),
        }
    }

    tensions.sort();

    Ok(ChordClass {
        third,
        fifth,
        sixth,
        seventh,
        tensions,
        third_omitted,
        fifth_omitted,
    })
}

impl ChordClass {
    /// Assemble the chord-symbol text from the recorded choices.
    pub fn text(&self) -> String {
        let mut text = String::new();
        if self.third == Some(Third::Minor) {
            text.push('m');
        }
        match self.fifth {
            Some(Fifth::Diminished) => text.push_str("dim"),
            Some(Fifth::Augmented) => text.push_str("aug"),
            _ => {}
        }
        if self.sixth {
            text.push('6');
        }
        match self.seventh {
            Some(Seventh::Diminished) | Some(Seventh::Minor) => text.push('7'),
            Some(Seventh::Major) => text.push_str("M7"),
            None => {}
        }
        match self.fifth {
            Some(Fifth::Flat) => text.push_str("-5"),
            Some(Fifth::Sharp) => text.push_str("+5"),
            _ => {}
        }
        match self.third {
            Some(Third::Sus4) => text.push_str("sus4"),
            Some(Third::Sus2) => text.push_str("sus2"),
            _ => {}
        }

        if !self.tensions.is_empty() {
            let mut pending: Vec<&str> = self.tensions.iter().map(|t| t.symbol()).collect();
            if self.takes_add_token() {
                text.push_str("add");
                text.push_str(pending.remove(0));
            }
            if !pending.is_empty() {
                text.push('(');
                text.push_str(&pending.join(","));
                text.push(')');
            }
        }

        // An omitted third or fifth emits no annotation.
        text
    }

    /// A lone extra tension on a bare triad/sus renders as `add<tension>`
    /// rather than a parenthesized list.
    fn takes_add_token(&self) -> bool {
        let plain_third =
            matches!(self.third, Some(Third::Major) | Some(Third::Minor)) || self.third_omitted;
        let plain_fifth = self.fifth == Some(Fifth::Perfect) || self.fifth_omitted;
        plain_third && plain_fifth && !self.sixth && self.seventh.is_none()
    }

    /// Re-derive the tone set implied by the recorded choices.
    pub fn tone_set(&self) -> ChordToneSet {
        let mut tones = ChordToneSet::new();
        tones.set(ROOT);
        match self.third {
            Some(Third::Major) => tones.set(MAJOR_THIRD),
            Some(Third::Minor) => tones.set(MINOR_THIRD),
            Some(Third::Sus4) => tones.set(PERFECT_FOURTH),
            Some(Third::Sus2) => tones.set(MAJOR_SECOND),
            None => {}
        }
        match self.fifth {
            Some(Fifth::Perfect) => tones.set(PERFECT_FIFTH),
            Some(Fifth::Diminished) => {
                tones.set(MINOR_THIRD);
                tones.set(FLAT_FIFTH);
            }
            Some(Fifth::Augmented) => {
                tones.set(MAJOR_THIRD);
                tones.set(SHARP_FIFTH);
            }
            Some(Fifth::Flat) => tones.set(FLAT_FIFTH),
            Some(Fifth::Sharp) => tones.set(SHARP_FIFTH),
            None => {}
        }
        if self.sixth {
            tones.set(MAJOR_SIXTH);
        }
        match self.seventh {
            Some(Seventh::Diminished) => tones.set(MAJOR_SIXTH),
            Some(Seventh::Major) => tones.set(MAJOR_SEVENTH),
            Some(Seventh::Minor) => tones.set(MINOR_SEVENTH),
            None => {}
        }
        for tension in &self.tensions {
            tones.set(tension.interval());
        }
        tones
    }
}

/// Render a tone set to canonical chord-symbol text.
///
/// The re-derived tone set of the chosen tokens must equal the input exactly;
/// a mismatch is an `InternalConsistency` fault.
///
/// # Example
/// ```
/// use chordal::{render_tones, ChordToneSet};
///
/// let tones = ChordToneSet::from_intervals(&[0, 3, 7, 10]);
/// assert_eq!(render_tones(&tones)?, "m7");
/// # Ok::<(), chordal::ChordError>(())
/// ```
pub fn render_tones(tones: &ChordToneSet) -> Result<String, ChordError> {
    let class = classify(tones)?;
    let text = class.text();
    if class.tone_set() != *tones {
        return Err(ChordError::InternalConsistency { text });
    }
    Ok(text)
}
