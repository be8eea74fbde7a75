//! Decode direction of the chord-tone codec.
//!
//! The grammar, in token order:
//!
//! ```text
//! chord := (power | quality? alteration? sixth? seventh? abbrevSeventh?
//!           accFifth? sus?) add? tensions? omits?
//! power := "5"            quality := "m"        alteration := "dim" | "aug"
//! sixth := "6"            seventh := "7" | "M7"
//! abbrevSeventh := "M"? ("9" | "11" | "13")
//! accFifth := [#+b-] "5"  sus := "sus2" | "sus4"
//! add := "add" tension
//! tensions := (accFifth | tension)? ("(" (accFifth | tension)
//!              ("," (accFifth | tension))* ")")?
//! omits := ("omit" [35])? ("(omit" [35] ("," [35])* ")")?
//! tension := [#+b-]? "9" | [#+]? "11" | [b-]? "13"
//! ```
//!
//! Mutual exclusions: `power` suppresses everything through `sus`; `m`
//! suppresses `dim`/`aug` and `sus`; `dim`/`aug` suppress the sixth and
//! `sus`; a sixth suppresses both seventh forms; an explicit seventh
//! suppresses the abbreviated one.
//!
//! Token combination mirrors the encoder's precedence run in reverse, with
//! two context-sensitive rules: an altered-fifth marker removes the perfect
//! fifth when it is still present (otherwise the bit it sets reads as the
//! upper tension sharing that interval), and omit processing removes
//! whichever third/fifth variant is actually present, faulting when none is.

use crate::error::ChordError;
use crate::tones::{
    ChordToneSet, FLAT_FIFTH, FLAT_NINTH, MAJOR_SECOND, MAJOR_SEVENTH, MAJOR_SIXTH, MAJOR_THIRD,
    MINOR_SEVENTH, MINOR_THIRD, PERFECT_FIFTH, PERFECT_FOURTH, ROOT, SHARP_FIFTH,
};

/// Parse chord-symbol text (without root/bass letters) to a tone set.
///
/// Defaults when no marker is present: major third and perfect fifth. The
/// power-chord marker `5` suppresses the default third entirely.
///
/// # Example
/// ```
/// use chordal::parse_tones;
///
/// assert_eq!(parse_tones("m7")?.intervals(), vec![0, 3, 7, 10]);
/// assert_eq!(parse_tones("sus4")?.intervals(), vec![0, 5, 7]);
/// assert_eq!(parse_tones("dim7")?.intervals(), vec![0, 3, 6, 9]);
/// assert!(parse_tones("daug7").is_err());
/// # Ok::<(), chordal::ChordError>(())
/// ```
pub fn parse_tones(text: &str) -> Result<ChordToneSet, ChordError> {
    let symbols = scan(text)?;
    build(&symbols)
}

/// Recognized tokens of one chord symbol.
#[derive(Debug, Default)]
struct Symbols<'a> {
    power: bool,
    minor: bool,
    alteration: Option<&'a str>,
    sixth: bool,
    seventh: Option<&'a str>,
    abbrev: Option<&'a str>,
    acc_fifth: Option<&'a str>,
    sus: Option<&'a str>,
    add: Option<&'a str>,
    tensions: Vec<&'a str>,
    omits: Vec<char>,
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos == self.text.len()
    }

    /// Consume `literal` if the remaining text starts with it.
    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume the first matching candidate. Candidates must be ordered so
    /// that no earlier entry is a proper prefix of a later one.
    fn eat_any(&mut self, candidates: &[&'a str]) -> Option<&'a str> {
        for &candidate in candidates {
            if self.eat(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

const TENSIONS: [&str; 11] = [
    "b9", "-9", "#9", "+9", "9", "#11", "+11", "11", "b13", "-13", "13",
];
const ACC_FIFTHS: [&str; 4] = ["#5", "+5", "b5", "-5"];

fn scan_tension<'a>(scanner: &mut Scanner<'a>) -> Option<&'a str> {
    scanner.eat_any(&TENSIONS)
}

fn scan_tension_or_acc_fifth<'a>(scanner: &mut Scanner<'a>) -> Option<&'a str> {
    scanner.eat_any(&ACC_FIFTHS).or_else(|| scan_tension(scanner))
}

fn scan_abbrev<'a>(scanner: &mut Scanner<'a>) -> Option<&'a str> {
    let start = scanner.pos;
    scanner.eat("M");
    match scanner.eat_any(&["9", "11", "13"]) {
        Some(_) => Some(&scanner.text[start..scanner.pos]),
        None => {
            // a bare "M" belongs to nothing; back off
            scanner.pos = start;
            None
        }
    }
}

fn scan(text: &str) -> Result<Symbols<'_>, ChordError> {
    let invalid = || ChordError::InvalidChordText(text.to_string());
    let mut scanner = Scanner::new(text);
    let mut symbols = Symbols::default();

    symbols.power = scanner.eat("5");
    if !symbols.power {
        symbols.minor = scanner.eat("m");
        if !symbols.minor {
            symbols.alteration = scanner.eat_any(&["dim", "aug"]);
        }
        if symbols.alteration.is_none() {
            symbols.sixth = scanner.eat("6");
        }
        if !symbols.sixth {
            symbols.seventh = scanner.eat_any(&["M7", "7"]);
            if symbols.seventh.is_none() {
                symbols.abbrev = scan_abbrev(&mut scanner);
            }
        }
        symbols.acc_fifth = scanner.eat_any(&ACC_FIFTHS);
        if !symbols.minor && symbols.alteration.is_none() {
            symbols.sus = scanner.eat_any(&["sus4", "sus2"]);
        }
    }

    if scanner.eat("add") {
        symbols.add = Some(scan_tension(&mut scanner).ok_or_else(invalid)?);
    }

    if let Some(tension) = scan_tension_or_acc_fifth(&mut scanner) {
        symbols.tensions.push(tension);
    }
    if !scanner.rest().starts_with("(omit") && scanner.eat("(") {
        loop {
            let tension = scan_tension_or_acc_fifth(&mut scanner).ok_or_else(invalid)?;
            symbols.tensions.push(tension);
            if !scanner.eat(",") {
                break;
            }
        }
        if !scanner.eat(")") {
            return Err(invalid());
        }
    }

    if scanner.eat("omit") {
        symbols.omits.push(scan_omit_degree(&mut scanner).ok_or_else(invalid)?);
    }
    if scanner.eat("(omit") {
        symbols.omits.push(scan_omit_degree(&mut scanner).ok_or_else(invalid)?);
        while scanner.eat(",") {
            symbols.omits.push(scan_omit_degree(&mut scanner).ok_or_else(invalid)?);
        }
        if !scanner.eat(")") {
            return Err(invalid());
        }
    }

    if !scanner.at_end() {
        return Err(invalid());
    }
    Ok(symbols)
}

fn scan_omit_degree(scanner: &mut Scanner<'_>) -> Option<char> {
    if scanner.eat("3") {
        Some('3')
    } else if scanner.eat("5") {
        Some('5')
    } else {
        None
    }
}

/// Tone-set accumulator with duplicate detection.
struct Builder {
    tones: ChordToneSet,
}

impl Builder {
    fn new() -> Self {
        Self {
            tones: ChordToneSet::new(),
        }
    }

    fn add(&mut self, interval: usize) -> Result<(), ChordError> {
        if self.tones.contains(interval) {
            return Err(ChordError::DuplicateInterval { interval });
        }
        self.tones.set(interval);
        Ok(())
    }

    /// Alter the fifth: drop a still-present perfect fifth, then set the
    /// altered bit. When the perfect fifth is already gone the same bit
    /// reads as the upper tension sharing its interval (#11 or b13).
    fn alter_fifth(&mut self, interval: usize) -> Result<(), ChordError> {
        if self.tones.contains(PERFECT_FIFTH) {
            self.tones.clear(PERFECT_FIFTH);
        }
        self.add(interval)
    }

    fn omit(
        &mut self,
        variants: &[usize],
        degree: &'static str,
    ) -> Result<(), ChordError> {
        for &interval in variants {
            if self.tones.contains(interval) {
                self.tones.clear(interval);
                return Ok(());
            }
        }
        Err(ChordError::OmitUnavailable { degree })
    }
}

/// Canonical form of a tension/altered-fifth symbol: `-` reads as flat,
/// `+` as sharp.
fn canonical_symbol(symbol: &str) -> String {
    symbol.replace('-', "b").replace('+', "#")
}

fn build(symbols: &Symbols<'_>) -> Result<ChordToneSet, ChordError> {
    let mut builder = Builder::new();
    builder.add(ROOT)?;

    if symbols.power {
        builder.add(PERFECT_FIFTH)?;
    } else if let Some(sus) = symbols.sus {
        builder.add(if sus == "sus2" {
            MAJOR_SECOND
        } else {
            PERFECT_FOURTH
        })?;
    } else if symbols.minor || symbols.alteration == Some("dim") {
        builder.add(MINOR_THIRD)?;
    } else {
        builder.add(MAJOR_THIRD)?;
    }

    match symbols.alteration {
        Some("dim") => builder.add(FLAT_FIFTH)?,
        Some("aug") => builder.add(SHARP_FIFTH)?,
        _ => {
            if !symbols.power {
                builder.add(PERFECT_FIFTH)?;
            }
        }
    }

    if symbols.sixth {
        builder.add(MAJOR_SIXTH)?;
    }

    match symbols.seventh {
        Some("M7") => builder.add(MAJOR_SEVENTH)?,
        Some(_) => {
            if symbols.alteration == Some("dim") {
                // "dim7" stacks the double-flatted seventh
                builder.add(MAJOR_SIXTH)?;
            } else {
                builder.add(MINOR_SEVENTH)?;
            }
        }
        None => {}
    }

    // Each distinct tension symbol applies once, canonical order, aliases
    // merged; the abbreviated seventh contributes its implied stack.
    let mut pending: Vec<String> = symbols
        .tensions
        .iter()
        .map(|t| canonical_symbol(t))
        .collect();
    if let Some(abbrev) = symbols.abbrev {
        let (seventh, degree) = match abbrev.strip_prefix('M') {
            Some(rest) => (MAJOR_SEVENTH, rest),
            None => (MINOR_SEVENTH, abbrev),
        };
        builder.add(seventh)?;
        match degree {
            "9" => pending.push("9".to_string()),
            "11" => pending.extend(["9".to_string(), "11".to_string()]),
            _ => pending.extend(["9".to_string(), "11".to_string(), "13".to_string()]),
        }
    }

    if let Some(marker) = symbols.acc_fifth {
        let interval = if canonical_symbol(marker).starts_with('b') {
            FLAT_FIFTH
        } else {
            SHARP_FIFTH
        };
        builder.alter_fifth(interval)?;
    }

    if let Some(added) = symbols.add {
        let symbol = canonical_symbol(added);
        builder.add(tension_interval(&symbol))?;
    }

    let has = |symbol: &str| pending.iter().any(|t| t == symbol);
    if has("b5") {
        builder.alter_fifth(FLAT_FIFTH)?;
    }
    if has("#5") {
        builder.alter_fifth(SHARP_FIFTH)?;
    }
    for symbol in ["b9", "9", "#9", "11", "#11", "b13", "13"] {
        if has(symbol) {
            builder.add(tension_interval(symbol))?;
        }
    }

    if symbols.omits.contains(&'3') {
        builder.omit(&[MINOR_THIRD, MAJOR_THIRD], "third")?;
    }
    if symbols.omits.contains(&'5') {
        builder.omit(&[FLAT_FIFTH, PERFECT_FIFTH, SHARP_FIFTH], "fifth")?;
    }

    Ok(builder.tones)
}

fn tension_interval(symbol: &str) -> usize {
    match symbol {
        "b9" => FLAT_NINTH,
        "9" => MAJOR_SECOND,
        "#9" => MINOR_THIRD,
        "11" => PERFECT_FOURTH,
        "#11" => FLAT_FIFTH,
        "b13" => SHARP_FIFTH,
        _ => MAJOR_SIXTH, // "13"
    }
}
