//! The annotation timeline: key/chord selections over normalized time.
//!
//! A [`Timeline`] is a sorted arena of [`TimelineEntry`] values indexed by
//! position in `[0, 1)`. Each entry covers the span from its position to the
//! next entry's position (or 1.0) and carries ranked name suggestions, with
//! the chosen name always at the front of its list.
//!
//! Timelines persist as a JSON document with a metadata block (the audio
//! duration in seconds) and one record per entry; positions are stored as
//! absolute timestamps and the pitch-class highlight as a 12-bit hex string.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chord::NON_CHORD_TEXT;
use crate::error::ChordError;
use crate::key::Key;
use crate::suggest::{suggest_chords, PreferenceOrder};

/// Every selectable key, as combined major/relative-minor labels.
pub const KEY_NAME_CHOICES: [&str; 15] = [
    "C/Am",
    "C#/A#m",
    "Db/Bbm",
    "D/Bm",
    "Eb/Cm",
    "E/C#m",
    "F/Dm",
    "F#/D#m",
    "Gb/Ebm",
    "G/Em",
    "Ab/Fm",
    "A/F#m",
    "Bb/Gm",
    "B/G#m",
    "Cb/Abm",
];

pub const DEFAULT_KEY_NAME: &str = "C/Am";

/// One annotated span: position, ranked key and chord names, and the
/// pitch-class highlight the chord names were derived from.
///
/// The name lists are never empty; index 0 is the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pos: f64,
    key_names: Vec<String>,
    chord_names: Vec<String>,
    highlight: [bool; 12],
}

impl TimelineEntry {
    fn new(pos: f64) -> TimelineEntry {
        TimelineEntry {
            pos,
            key_names: KEY_NAME_CHOICES.iter().map(|&name| name.to_string()).collect(),
            chord_names: vec![NON_CHORD_TEXT.to_string()],
            highlight: [false; 12],
        }
    }

    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// The selected key name.
    pub fn key_name(&self) -> &str {
        &self.key_names[0]
    }

    /// The selected chord name.
    pub fn chord_name(&self) -> &str {
        &self.chord_names[0]
    }

    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    pub fn chord_names(&self) -> &[String] {
        &self.chord_names
    }

    pub fn highlight(&self) -> &[bool; 12] {
        &self.highlight
    }

    pub fn set_highlight(&mut self, highlight: [bool; 12]) {
        self.highlight = highlight;
    }

    /// Select a key name, moving it to the front of the list.
    pub fn choose_key_name(&mut self, name: &str) {
        promote(&mut self.key_names, name);
    }

    /// Select a chord name, moving it to the front of the list.
    pub fn choose_chord_name(&mut self, name: &str) {
        promote(&mut self.chord_names, name);
    }

    /// Rebuild the key list: the current selection first, every other label
    /// in table order after it.
    pub fn refresh_key_suggestions(&mut self) {
        let current = self.key_names[0].clone();
        self.key_names = KEY_NAME_CHOICES.iter().map(|&name| name.to_string()).collect();
        promote(&mut self.key_names, &current);
    }

    /// Re-rank the chord names from the highlight against the selected key.
    ///
    /// An empty highlight yields the lone non-chord name. A still-valid
    /// current selection stays at the front; otherwise the top-ranked
    /// suggestion takes over.
    pub fn refresh_chord_suggestions(
        &mut self,
        bass_pc: usize,
        prefs: &PreferenceOrder,
    ) -> Result<(), ChordError> {
        if self.highlight.iter().all(|&on| !on) {
            self.chord_names = vec![NON_CHORD_TEXT.to_string()];
            return Ok(());
        }
        let key = Key::from_name(self.key_name())?;
        let mut names = Vec::new();
        for chord in suggest_chords(&self.highlight, bass_pc, &key, prefs) {
            names.push(chord.to_text(None)?);
        }
        if names.is_empty() {
            names.push(NON_CHORD_TEXT.to_string());
        }
        let current = self.chord_names[0].clone();
        if names.iter().any(|name| *name == current) {
            promote(&mut names, &current);
        }
        self.chord_names = names;
        Ok(())
    }
}

fn promote(names: &mut Vec<String>, name: &str) {
    if let Some(index) = names.iter().position(|n| n == name) {
        let chosen = names.remove(index);
        names.insert(0, chosen);
    } else {
        names.insert(0, name.to_string());
    }
}

/// A sorted arena of timeline entries. Always holds an entry at position 0.
///
/// # Example
/// ```
/// use chordal::Timeline;
///
/// let mut timeline = Timeline::new();
/// let index = timeline.insert(0.5)?;
/// assert_eq!(index, 1);
/// assert_eq!(timeline.index_at(0.25), 0);
/// assert_eq!(timeline.index_at(0.75), 1);
/// # Ok::<(), chordal::ChordError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline {
            entries: vec![TimelineEntry::new(0.0)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> &TimelineEntry {
        &self.entries[index]
    }

    pub fn entry_mut(&mut self, index: usize) -> &mut TimelineEntry {
        &mut self.entries[index]
    }

    /// Insert a new entry at `pos`, inheriting the covering entry's key
    /// selection. Positions outside `[0, 1)` or already occupied are faults.
    /// Returns the new entry's index.
    pub fn insert(&mut self, pos: f64) -> Result<usize, ChordError> {
        if !(0.0..1.0).contains(&pos) {
            return Err(ChordError::InvalidAnnotation(format!(
                "position {} outside [0, 1)",
                pos
            )));
        }
        if self.entries.iter().any(|entry| entry.pos == pos) {
            return Err(ChordError::InvalidAnnotation(format!(
                "position {} already has an entry",
                pos
            )));
        }
        let index = self.entries.partition_point(|entry| entry.pos < pos);
        let mut entry = TimelineEntry::new(pos);
        entry.key_names = self.entries[index - 1].key_names.clone();
        self.entries.insert(index, entry);
        Ok(index)
    }

    /// Remove the entry at `index`. The origin entry at position 0 stays.
    pub fn remove(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Index of the entry covering `pos` (the last entry at or before it).
    pub fn index_at(&self, pos: f64) -> usize {
        self.entries
            .partition_point(|entry| entry.pos <= pos)
            .saturating_sub(1)
    }

    pub fn entry_at(&self, pos: f64) -> &TimelineEntry {
        &self.entries[self.index_at(pos)]
    }

    /// Where the entry's span ends: the next entry's position, or 1.0.
    pub fn end_pos(&self, index: usize) -> f64 {
        self.entries
            .get(index + 1)
            .map(|entry| entry.pos)
            .unwrap_or(1.0)
    }

    /// Serialize to the persisted document, scaling positions to absolute
    /// timestamps against `duration` seconds.
    pub fn to_annotations(&self, duration: f64) -> AnnotationFile {
        AnnotationFile {
            metadata: AnnotationMetadata { duration },
            content: self
                .entries
                .iter()
                .map(|entry| AnnotationEntry {
                    time_stamp: entry.pos * duration,
                    key_name: entry.key_name().to_string(),
                    chord_name: entry.chord_name().to_string(),
                    pitch_row_hex: highlight_to_hex(&entry.highlight),
                })
                .collect(),
        }
    }

    /// Write the annotation document to `path` as pretty-printed JSON.
    pub fn save_annotations(&self, path: &Path, duration: f64) -> Result<(), ChordError> {
        let json = serde_json::to_string_pretty(&self.to_annotations(duration))?;
        std::fs::write(path, json)?;
        log::debug!("saved {} annotation(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read an annotation document from `path` and rebuild the timeline.
    pub fn load_annotations(path: &Path) -> Result<Timeline, ChordError> {
        let json = std::fs::read_to_string(path)?;
        let file: AnnotationFile = serde_json::from_str(&json)?;
        Timeline::from_annotations(&file)
    }

    /// Rebuild a timeline from a persisted document.
    pub fn from_annotations(file: &AnnotationFile) -> Result<Timeline, ChordError> {
        let duration = file.metadata.duration;
        if !(duration > 0.0) {
            return Err(ChordError::InvalidAnnotation(format!(
                "duration must be positive, got {}",
                duration
            )));
        }
        let mut timeline = Timeline::new();
        for record in &file.content {
            let pos = record.time_stamp / duration;
            let index = if pos == 0.0 { 0 } else { timeline.insert(pos)? };
            let entry = timeline.entry_mut(index);
            entry.choose_key_name(&record.key_name);
            entry.choose_chord_name(&record.chord_name);
            entry.highlight = highlight_from_hex(&record.pitch_row_hex)?;
        }
        Ok(timeline)
    }
}

/// Persisted annotation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationFile {
    pub metadata: AnnotationMetadata,
    pub content: Vec<AnnotationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationMetadata {
    /// Audio duration in seconds; timestamps normalize against it.
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub time_stamp: f64,
    pub key_name: String,
    pub chord_name: String,
    pub pitch_row_hex: String,
}

/// Encode a 12-slot highlight as hex; slot 0 is the most significant bit.
pub fn highlight_to_hex(highlight: &[bool; 12]) -> String {
    let mut value: u16 = 0;
    for (i, &on) in highlight.iter().enumerate() {
        if on {
            value |= 1 << (11 - i);
        }
    }
    format!("{:x}", value)
}

/// Decode a 12-bit hex highlight; an optional `0x` prefix is accepted.
pub fn highlight_from_hex(text: &str) -> Result<[bool; 12], ChordError> {
    let invalid = || ChordError::InvalidAnnotation(format!("bad pitch row: '{}'", text));
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let value = u16::from_str_radix(digits, 16).map_err(|_| invalid())?;
    if value > 0xfff {
        return Err(invalid());
    }
    let mut highlight = [false; 12];
    for (i, slot) in highlight.iter_mut().enumerate() {
        *slot = value & (1 << (11 - i)) != 0;
    }
    Ok(highlight)
}
