//! A chord value: root spelling, tone set, and bass spelling.
//!
//! A [`Chord`] pairs the letter-level spellings (root and bass, which stay
//! enharmonically distinct) with the spelling-free [`ChordToneSet`]. The
//! non-chord value stands for silence and renders as [`NON_CHORD_TEXT`].

use crate::error::ChordError;
use crate::key::Key;
use crate::parse::parse_tones;
use crate::pitch::PitchSpelling;
use crate::render::render_tones;
use crate::tones::ChordToneSet;

/// Text form of the non-chord (silence) value.
pub const NON_CHORD_TEXT: &str = "N.C.";

/// A chord: root spelling, interval set above the root, and bass spelling.
///
/// # Example
/// ```
/// use chordal::{Chord, Key};
///
/// let chord = Chord::from_text("F#m7/A")?;
/// assert_eq!(chord.to_text(None)?, "F#m7/A");
///
/// let key = Key::from_name("C")?;
/// assert_eq!(chord.to_text(Some(&key))?, "#IVm7/VI");
/// # Ok::<(), chordal::ChordError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Chord {
    root: Option<PitchSpelling>,
    tones: ChordToneSet,
    bass: Option<PitchSpelling>,
}

impl Chord {
    /// The non-chord value: no root, no tones, no bass.
    pub fn non_chord() -> Chord {
        Chord {
            root: None,
            tones: ChordToneSet::new(),
            bass: None,
        }
    }

    /// A chord over `root`. The bass defaults to the root when `None`.
    pub fn new(root: PitchSpelling, tones: ChordToneSet, bass: Option<PitchSpelling>) -> Chord {
        Chord {
            root: Some(root),
            tones,
            bass: Some(bass.unwrap_or(root)),
        }
    }

    /// Parse full chord text: root spelling, chord symbol, and an optional
    /// `/bass` spelling. [`NON_CHORD_TEXT`] parses to the non-chord value.
    pub fn from_text(text: &str) -> Result<Chord, ChordError> {
        if text == NON_CHORD_TEXT {
            return Ok(Chord::non_chord());
        }
        let (body, bass) = match text.split_once('/') {
            Some((body, bass_text)) => (body, Some(PitchSpelling::from_text(bass_text)?)),
            None => (text, None),
        };
        let root_len = root_text_len(body)
            .ok_or_else(|| ChordError::InvalidChordText(text.to_string()))?;
        let root = PitchSpelling::from_text(&body[..root_len])?;
        let tones = parse_tones(&body[root_len..])
            .map_err(|e| match e {
                ChordError::InvalidChordText(_) => {
                    ChordError::InvalidChordText(text.to_string())
                }
                other => other,
            })?;
        Ok(Chord::new(root, tones, bass))
    }

    pub fn is_non_chord(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<PitchSpelling> {
        self.root
    }

    pub fn bass(&self) -> Option<PitchSpelling> {
        self.bass
    }

    pub fn tones(&self) -> &ChordToneSet {
        &self.tones
    }

    /// Render to chord text. With a key, the root and bass render as
    /// key-relative degree names instead of pitch names. The bass suffix
    /// appears only when the bass spelling differs from the root spelling.
    pub fn to_text(&self, key: Option<&Key>) -> Result<String, ChordError> {
        let (root, bass) = match (self.root, self.bass) {
            (Some(root), Some(bass)) => (root, bass),
            _ => return Ok(NON_CHORD_TEXT.to_string()),
        };
        let spell = |pitch: &PitchSpelling| match key {
            Some(key) => pitch.degree_text(key),
            None => pitch.to_string(),
        };
        let mut text = spell(&root);
        text.push_str(&render_tones(&self.tones)?);
        if bass != root {
            text.push('/');
            text.push_str(&spell(&bass));
        }
        Ok(text)
    }
}

/// Chords compare by canonical text, so enharmonically distinct roots stay
/// distinct while token-level synonyms (`"-9"` vs `"b9"`) collapse. A chord
/// whose tone set has no canonical text compares unequal to everything.
impl PartialEq for Chord {
    fn eq(&self, other: &Chord) -> bool {
        match (self.to_text(None), other.to_text(None)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Length of the leading root spelling: one letter plus a greedy run of up
/// to two identical accidental symbols.
fn root_text_len(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !('A'..='G').contains(&first) {
        return None;
    }
    let rest = &text[1..];
    let accidental = match rest.chars().next() {
        Some(c @ ('#' | 'b')) => c,
        _ => return Some(1),
    };
    let run = rest.chars().take_while(|&c| c == accidental).count().min(2);
    Some(1 + run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_root_and_symbol() {
        let chord = Chord::from_text("Cm7").unwrap();
        assert_eq!(chord.root().unwrap().to_string(), "C");
        assert_eq!(chord.tones().intervals(), vec![0, 3, 7, 10]);
        assert_eq!(chord.bass().unwrap().to_string(), "C");
    }

    #[test]
    fn greedy_root_takes_the_accidental_run() {
        let chord = Chord::from_text("Cb13").unwrap();
        assert_eq!(chord.root().unwrap().to_string(), "Cb");
        assert_eq!(chord.tones().intervals(), vec![0, 2, 4, 5, 7, 9, 10]);

        let chord = Chord::from_text("Gbb5").unwrap();
        assert_eq!(chord.root().unwrap().to_string(), "Gbb");
        assert_eq!(chord.tones().intervals(), vec![0, 7]);
    }

    #[test]
    fn slash_sets_the_bass() {
        let chord = Chord::from_text("C/E").unwrap();
        assert_eq!(chord.bass().unwrap().to_string(), "E");
        assert_eq!(chord.to_text(None).unwrap(), "C/E");
    }

    #[test]
    fn bass_equal_to_root_renders_without_slash() {
        let chord = Chord::from_text("Dm7/D").unwrap();
        assert_eq!(chord.to_text(None).unwrap(), "Dm7");
    }

    #[test]
    fn non_chord_round_trips() {
        let chord = Chord::from_text(NON_CHORD_TEXT).unwrap();
        assert!(chord.is_non_chord());
        assert_eq!(chord.to_text(None).unwrap(), NON_CHORD_TEXT);
    }

    #[test]
    fn degree_rendering_uses_the_key() {
        let key = Key::from_name("C").unwrap();
        let chord = Chord::from_text("G6sus4/C").unwrap();
        assert_eq!(chord.to_text(Some(&key)).unwrap(), "V6sus4/I");
    }

    #[test]
    fn rejects_text_without_a_root() {
        assert!(matches!(
            Chord::from_text("m7"),
            Err(ChordError::InvalidChordText(_))
        ));
        assert!(matches!(
            Chord::from_text("Hm"),
            Err(ChordError::InvalidChordText(_))
        ));
    }

    #[test]
    fn invalid_symbols_report_the_full_text() {
        match Chord::from_text("Cdaug7") {
            Err(ChordError::InvalidChordText(text)) => assert_eq!(text, "Cdaug7"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn equality_is_canonical_text() {
        let a = Chord::from_text("C7-5").unwrap();
        let b = Chord::from_text("C7b5").unwrap();
        assert_eq!(a, b);
        let gb = Chord::from_text("Gb").unwrap();
        let fs = Chord::from_text("F#").unwrap();
        assert_ne!(gb, fs);
    }
}
