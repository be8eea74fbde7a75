//! # chordal
//!
//! A bidirectional codec between chord-symbol text and 12-slot interval
//! sets, an enharmonic pitch-spelling engine, and a chord-name ranker.
//!
//! The three layers build on each other:
//!
//! - [`tones`], [`render`], and [`parse`] handle the spelling-free codec
//!   between chord symbols (`"m7(9)"`) and interval membership sets.
//! - [`pitch`] and [`key`] spell pitch classes as letters-plus-accidentals
//!   relative to a major key, including key-relative degree names.
//! - [`chord`], [`suggest`], and [`timeline`] combine both: full chord
//!   values with root and bass spellings, ranked name suggestions for a
//!   pitch-class set, and a persistable annotation timeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use chordal::{parse_chord, Key};
//!
//! let chord = parse_chord("F#m7b5/A")?;
//! assert_eq!(chord.tones().intervals(), vec![0, 3, 6, 10]);
//! assert_eq!(chord.to_text(None)?, "F#m7-5/A");
//!
//! let key = Key::from_name("C")?;
//! assert_eq!(chord.to_text(Some(&key))?, "#IVm7-5/VI");
//! # Ok::<(), chordal::ChordError>(())
//! ```

pub mod chord;
pub mod error;
pub mod key;
pub mod parse;
pub mod pitch;
pub mod render;
pub mod suggest;
pub mod timeline;
pub mod tones;

pub use chord::{Chord, NON_CHORD_TEXT};
pub use error::ChordError;
pub use key::{Key, RELATIVE_MAJOR};
pub use parse::parse_tones;
pub use pitch::{Letter, PitchSpelling};
pub use render::{classify, render_tones, ChordClass, Fifth, Seventh, Tension, Third};
pub use suggest::{suggest_chords, PreferenceOrder};
pub use timeline::{
    highlight_from_hex, highlight_to_hex, AnnotationEntry, AnnotationFile, AnnotationMetadata,
    Timeline, TimelineEntry, DEFAULT_KEY_NAME, KEY_NAME_CHOICES,
};
pub use tones::ChordToneSet;

/// Parse full chord text (root, symbol, optional `/bass`) to a [`Chord`].
///
/// # Example
/// ```
/// use chordal::parse_chord;
///
/// let chord = parse_chord("Cm7(9)")?;
/// assert_eq!(chord.tones().intervals(), vec![0, 2, 3, 7, 10]);
/// assert!(parse_chord("daug7").is_err());
/// # Ok::<(), chordal::ChordError>(())
/// ```
pub fn parse_chord(text: &str) -> Result<Chord, ChordError> {
    Chord::from_text(text)
}
