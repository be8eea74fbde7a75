//! Chord-name ranking for a raw pitch-class set.
//!
//! Every sounding pitch class is tried as a root; every key-relative spelling
//! of the root and the bass produces a candidate [`Chord`]. Candidates
//! deduplicate by key-relative degree text (so the same harmonic reading in
//! two keys collapses to one entry) and rank by a caller-supplied preference
//! order of degree names, preferred readings first.

use std::path::Path;

use crate::chord::Chord;
use crate::error::ChordError;
use crate::key::Key;
use crate::tones::ChordToneSet;

/// An ordered list of preferred key-relative chord names.
///
/// Lines earlier in the list rank higher. Names that never appear in the
/// list keep their enumeration order after all listed ones.
#[derive(Debug, Clone, Default)]
pub struct PreferenceOrder {
    lines: Vec<String>,
}

impl PreferenceOrder {
    /// No preferences: candidates keep their enumeration order.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Load one name per line. A missing or unreadable file is not an error,
    /// just an empty order.
    pub fn from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_lines(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            ),
            Err(e) => {
                log::debug!("no preference order at {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Rank of `name`, lower is more preferred. `None` when unlisted.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line == name)
    }
}

/// Enumerate plausible chord names for a pitch-class set over a given bass.
///
/// `pitches` marks which of the 12 pitch classes sound; `bass_pc` is the
/// pitch class of the lowest sounding note. Candidates whose tone set has no
/// canonical chord text drop out silently. The result orders
/// preference-listed readings first (in list order), then the rest in root
/// then spelling enumeration order.
///
/// # Example
/// ```
/// use chordal::{suggest_chords, Key, PreferenceOrder};
///
/// let mut pitches = [false; 12];
/// for pc in [0, 4, 7] {
///     pitches[pc] = true;
/// }
/// let key = Key::from_name("C")?;
/// let names: Vec<String> = suggest_chords(&pitches, 0, &key, &PreferenceOrder::empty())
///     .iter()
///     .map(|c| c.to_text(None).unwrap())
///     .collect();
/// assert_eq!(names, ["C", "Em+5/C", "G6sus4/C"]);
/// # Ok::<(), chordal::ChordError>(())
/// ```
pub fn suggest_chords(
    pitches: &[bool; 12],
    bass_pc: usize,
    key: &Key,
    prefs: &PreferenceOrder,
) -> Vec<Chord> {
    let bass_spellings = key.spellings_for(bass_pc % 12);
    let mut named: Vec<(String, Chord)> = Vec::new();

    for root_pc in 0..12 {
        if !pitches[root_pc] {
            continue;
        }
        let tones = ChordToneSet::from_pitch_classes(pitches, root_pc);
        for root in key.spellings_for(root_pc) {
            for &bass in &bass_spellings {
                // one spelling of a pitch class never takes another as bass
                if bass.pitch_class() == root.pitch_class() && bass != root {
                    continue;
                }
                let chord = Chord::new(root, tones, Some(bass));
                let name = match chord.to_text(Some(key)) {
                    Ok(name) => strip_omit_qualifier(&name),
                    Err(e) => {
                        log::debug!("skipping unnameable candidate: {}", e);
                        continue;
                    }
                };
                if named.iter().any(|(existing, _)| *existing == name) {
                    continue;
                }
                named.push((name, chord));
            }
        }
    }

    let (mut listed, rest): (Vec<_>, Vec<_>) = named
        .into_iter()
        .partition(|(name, _)| prefs.position(name).is_some());
    listed.sort_by_key(|(name, _)| prefs.position(name));
    listed
        .into_iter()
        .chain(rest)
        .map(|(_, chord)| chord)
        .collect()
}

/// Drop a trailing `(omit...)` qualifier from a chord name.
fn strip_omit_qualifier(name: &str) -> String {
    match (name.find("(omit"), name.rfind(')')) {
        (Some(start), Some(end)) if end > start => {
            format!("{}{}", &name[..start], &name[end + 1..])
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch_set(pcs: &[usize]) -> [bool; 12] {
        let mut pitches = [false; 12];
        for &pc in pcs {
            pitches[pc] = true;
        }
        pitches
    }

    fn names(chords: &[Chord], key: Option<&Key>) -> Vec<String> {
        chords.iter().map(|c| c.to_text(key).unwrap()).collect()
    }

    #[test]
    fn major_triad_enumerates_each_root() {
        let key = Key::from_name("C").unwrap();
        let chords = suggest_chords(&pitch_set(&[0, 4, 7]), 0, &key, &PreferenceOrder::empty());
        assert_eq!(names(&chords, None), ["C", "Em+5/C", "G6sus4/C"]);
        assert_eq!(
            names(&chords, Some(&key)),
            ["I", "IIIm+5/I", "V6sus4/I"]
        );
    }

    #[test]
    fn preference_order_promotes_listed_degree_names() {
        let key = Key::from_name("C").unwrap();
        let prefs = PreferenceOrder::from_lines(["V6sus4/I", "IIIm+5/I"]);
        let chords = suggest_chords(&pitch_set(&[0, 4, 7]), 0, &key, &prefs);
        assert_eq!(names(&chords, None), ["G6sus4/C", "Em+5/C", "C"]);
    }

    #[test]
    fn off_scale_roots_try_both_spellings() {
        let key = Key::from_name("C").unwrap();
        let chords = suggest_chords(&pitch_set(&[6, 10, 1]), 6, &key, &PreferenceOrder::empty());
        let all = names(&chords, None);
        // pc 6 spells F# and Gb; distinct spellings stay distinct entries
        // because their degree names (#IV vs bV) differ
        assert!(all.contains(&"F#".to_string()), "got {all:?}");
        assert!(all.contains(&"Gb".to_string()), "got {all:?}");
    }

    #[test]
    fn candidates_with_the_same_degree_name_collapse_to_the_first() {
        let key = Key::from_name("C").unwrap();
        let chords = suggest_chords(&pitch_set(&[0, 4, 7]), 0, &key, &PreferenceOrder::empty());
        let degree_names = names(&chords, Some(&key));
        let mut unique = degree_names.clone();
        unique.dedup();
        assert_eq!(degree_names, unique);
    }

    #[test]
    fn unnameable_rotations_drop_out() {
        let key = Key::from_name("C").unwrap();
        // both sevenths over C; the C rotation cannot be named
        let chords = suggest_chords(
            &pitch_set(&[0, 4, 7, 10, 11]),
            0,
            &key,
            &PreferenceOrder::empty(),
        );
        for name in names(&chords, None) {
            assert!(!name.starts_with("C7"), "got {name}");
        }
        assert!(!chords.is_empty());
    }

    #[test]
    fn empty_pitch_set_suggests_nothing() {
        let key = Key::from_name("C").unwrap();
        assert!(suggest_chords(&pitch_set(&[]), 0, &key, &PreferenceOrder::empty()).is_empty());
    }

    #[test]
    fn missing_preference_file_reads_as_empty() {
        let prefs = PreferenceOrder::from_path(Path::new("/nonexistent/appearance.txt"));
        assert_eq!(prefs.position("I"), None);
    }

    #[test]
    fn strips_omit_qualifiers() {
        assert_eq!(strip_omit_qualifier("C(omit5)"), "C");
        assert_eq!(strip_omit_qualifier("C(omit3,5)/G"), "C/G");
        assert_eq!(strip_omit_qualifier("Cm7"), "Cm7");
    }
}
