//! Integration tests for the chordal library
//!
//! Tests the full pipeline: chord text to tone sets and back, key-relative
//! degree names, suggestion ranking, and annotation persistence.

use chordal::{
    parse_chord, suggest_chords, Key, PreferenceOrder, Timeline, AnnotationFile,
};

fn pitch_set(pcs: &[usize]) -> [bool; 12] {
    let mut pitches = [false; 12];
    for &pc in pcs {
        pitches[pc] = true;
    }
    pitches
}

#[test]
fn test_canonical_texts_round_trip() {
    // every canonical form must survive parse-then-render unchanged
    for text in [
        "C",
        "Cm",
        "Cdim",
        "Caug",
        "Csus4",
        "Csus2",
        "C6",
        "Cm6",
        "C7",
        "CM7",
        "Cm7",
        "CmM7",
        "Cdim7",
        "Caug7",
        "CaugM7",
        "C7-5",
        "Cm+5",
        "Cm7-5",
        "Cadd9",
        "Cmadd9",
        "Caddb9",
        "Cadd#11(b13)",
        "Caug(#11)",
        "Cdim(b13)",
        "C6(9)",
        "C7(13)",
        "C7(b9,9,#9)",
        "Cm7(9,11,13)",
        "C7sus4",
        "F#m7/A",
        "Bb7(9)/D",
        "Ebm6/Gb",
        "N.C.",
    ] {
        let chord = parse_chord(text).unwrap_or_else(|e| panic!("{}: {}", text, e));
        let rendered = chord
            .to_text(None)
            .unwrap_or_else(|e| panic!("{}: {}", text, e));
        assert_eq!(rendered, text, "round trip changed '{}'", text);
    }
}

#[test]
fn test_synonyms_normalize_to_one_canonical_form() {
    for (input, canonical) in [
        ("Cm7b5", "Cm7-5"),
        ("C7b5", "C7-5"),
        ("C7+5", "Caug7"),
        ("C7#5", "Caug7"),
        ("Cadd-9", "Caddb9"),
        ("Cadd+9", "Cadd#9"),
        ("C9", "C7(9)"),
        ("CM9", "CM7(9)"),
        ("C11", "C7(9,11)"),
        ("C13", "C7(9,11,13)"),
        ("Cm9", "Cm7(9)"),
        ("C7(13,9)", "C7(9,13)"),
        ("C9(9)", "C7(9)"),
        ("C69", "C6(9)"),
        ("Cm7/C", "Cm7"),
    ] {
        let chord = parse_chord(input).unwrap_or_else(|e| panic!("{}: {}", input, e));
        assert_eq!(
            chord.to_text(None).unwrap(),
            canonical,
            "normalizing '{}'",
            input
        );
    }
}

#[test]
fn test_power_chords_and_omits_parse_but_render_bare() {
    // the omitted-degree annotation is computed but never emitted
    for (input, canonical) in [("C5", "C"), ("Comit3", "C"), ("Comit5", "C"), ("Cmomit5", "Cm")] {
        let chord = parse_chord(input).unwrap();
        assert_eq!(chord.to_text(None).unwrap(), canonical);
    }
}

#[test]
fn test_malformed_texts_are_rejected() {
    for text in ["", "daug7", "Hm", "C5m", "Cdim6", "C7(", "Cmadd#9", "C5omit3"] {
        assert!(parse_chord(text).is_err(), "expected rejection: '{}'", text);
    }
}

#[test]
fn test_degree_names_follow_the_key() {
    let key = Key::from_name("G/Em").unwrap();
    let chord = parse_chord("Am7/D").unwrap();
    assert_eq!(chord.to_text(Some(&key)).unwrap(), "IIm7/V");

    let key = Key::from_name("Ebm").unwrap();
    let tonic_chord = parse_chord("Gb").unwrap();
    assert_eq!(tonic_chord.to_text(Some(&key)).unwrap(), "I");
}

#[test]
fn test_suggestions_rank_by_preference_order() {
    let key = Key::from_name("C").unwrap();
    let pitches = pitch_set(&[0, 4, 7]);

    let unranked = suggest_chords(&pitches, 0, &key, &PreferenceOrder::empty());
    let names: Vec<String> = unranked.iter().map(|c| c.to_text(None).unwrap()).collect();
    assert_eq!(names, ["C", "Em+5/C", "G6sus4/C"]);

    // preferences match on key-relative degree names
    let prefs = PreferenceOrder::from_lines(["V6sus4/I"]);
    let ranked = suggest_chords(&pitches, 0, &key, &prefs);
    let names: Vec<String> = ranked.iter().map(|c| c.to_text(None).unwrap()).collect();
    assert_eq!(names, ["G6sus4/C", "C", "Em+5/C"]);
}

#[test]
fn test_suggestions_spell_against_the_selected_key() {
    // the same pitch classes spell differently in a flat key
    let key = Key::from_name("Eb").unwrap();
    let chords = suggest_chords(&pitch_set(&[3, 7, 10]), 3, &key, &PreferenceOrder::empty());
    let names: Vec<String> = chords.iter().map(|c| c.to_text(None).unwrap()).collect();
    assert!(names.contains(&"Eb".to_string()), "got {names:?}");
}

#[test]
fn test_annotation_document_round_trips_through_json() {
    let mut timeline = Timeline::new();
    timeline.entry_mut(0).choose_key_name("F/Dm");
    timeline.entry_mut(0).set_highlight(pitch_set(&[5, 9, 0]));
    timeline
        .entry_mut(0)
        .refresh_chord_suggestions(5, &PreferenceOrder::empty())
        .unwrap();
    let index = timeline.insert(0.25).unwrap();
    timeline.entry_mut(index).choose_chord_name("Bb");

    let json = serde_json::to_string(&timeline.to_annotations(200.0)).unwrap();
    let file: AnnotationFile = serde_json::from_str(&json).unwrap();
    let restored = Timeline::from_annotations(&file).unwrap();

    assert_eq!(restored.len(), 2);
    assert_eq!(restored.entry(0).key_name(), "F/Dm");
    assert_eq!(restored.entry(0).chord_name(), timeline.entry(0).chord_name());
    assert_eq!(restored.entry(1).pos(), 0.25);
    assert_eq!(restored.entry(1).chord_name(), "Bb");
    assert_eq!(restored.entry(0).highlight(), &pitch_set(&[5, 9, 0]));
}

#[test]
fn test_annotation_document_field_names() {
    let timeline = Timeline::new();
    let json = serde_json::to_string(&timeline.to_annotations(10.0)).unwrap();
    for field in ["metadata", "duration", "content", "time_stamp", "key_name", "chord_name", "pitch_row_hex"] {
        assert!(json.contains(field), "missing field '{}' in {}", field, json);
    }
}
