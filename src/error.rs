//! # Error Types
//!
//! This module defines all error types for the chordal library.
//!
//! ## Error Types
//! - `InvalidChordText` / `InvalidPitchText` - grammar mismatches while parsing
//! - `UnknownKey` - a key name that resolves to no tonic spelling
//! - `DuplicateInterval` - a chord token requested an interval already present
//! - `ConflictingSeventh` - both the minor and major seventh were requested
//! - `OmitUnavailable` - an omit token named a degree the chord does not contain
//! - `InternalConsistency` - the encoder's rendered tokens failed to reproduce
//!   the input tone set (a programming-error signal, not a user-facing one)
//! - `InvalidAnnotation` - a persisted annotation document is malformed
//!
//! ## Usage
//! ```rust
//! use chordal::{parse_chord, ChordError};
//!
//! match parse_chord("daug7") {
//!     Ok(chord) => println!("parsed: {:?}", chord),
//!     Err(ChordError::InvalidChordText(text)) => {
//!         eprintln!("not a chord name: {}", text);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// The text does not match the chord-name grammar.
    ///
    /// # Example
    /// ```
    /// # use chordal::ChordError;
    /// let err = ChordError::InvalidChordText("daug7".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord text: 'daug7'");
    /// ```
    #[error("Invalid chord text: '{0}'")]
    InvalidChordText(String),

    /// The text is not a letter-plus-accidentals pitch spelling.
    #[error("Invalid pitch text: '{0}'")]
    InvalidPitchText(String),

    /// The key name maps to no known tonic spelling.
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    /// A token asked to add an interval that is already in the tone set.
    #[error("Chord already contains the interval at {interval} semitones")]
    DuplicateInterval { interval: usize },

    /// The minor and major seventh are mutually exclusive.
    #[error("Chord must not contain both m7 and M7")]
    ConflictingSeventh,

    /// An omit token named a third or fifth the chord does not have.
    #[error("Cannot omit the {degree} because it is not present")]
    OmitUnavailable { degree: &'static str },

    /// The encoder's post-condition failed: re-deriving the tone set from the
    /// chosen tokens did not reproduce the input bit-for-bit.
    #[error("Rendered chord text '{text}' does not reproduce its tone set")]
    InternalConsistency { text: String },

    /// A persisted annotation document carried out-of-range data.
    #[error("Invalid annotation data: {0}")]
    InvalidAnnotation(String),

    /// An annotation file could not be read or written.
    #[error("Annotation I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An annotation document could not be serialized or deserialized.
    #[error("Annotation format error: {0}")]
    Json(#[from] serde_json::Error),
}
