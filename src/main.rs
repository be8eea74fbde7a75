use std::env;
use std::process;

use chordal::{parse_chord, suggest_chords, Key, PreferenceOrder};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chordal <chord-text> [key]");
        eprintln!("       chordal --suggest <pc,pc,...> <bass-pc> [key]");
        process::exit(1);
    }

    if args[1] == "--suggest" {
        if args.len() < 4 {
            eprintln!("Usage: chordal --suggest <pc,pc,...> <bass-pc> [key]");
            process::exit(1);
        }
        run_suggest(&args[2], &args[3], args.get(4).map(String::as_str));
    } else {
        run_inspect(&args[1], args.get(2).map(String::as_str));
    }
}

fn resolve_key(name: Option<&str>) -> Key {
    let name = name.unwrap_or("C");
    match Key::from_name(name) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

// Print the canonical form, the interval set, and the degree name.
fn run_inspect(text: &str, key_name: Option<&str>) {
    let key = resolve_key(key_name);

    let chord = match parse_chord(text) {
        Ok(chord) => chord,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let canonical = match chord.to_text(None) {
        Ok(canonical) => canonical,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    println!("canonical: {}", canonical);

    let intervals: Vec<String> = chord
        .tones()
        .intervals()
        .iter()
        .map(|i| i.to_string())
        .collect();
    println!("intervals: [{}]", intervals.join(", "));

    match chord.to_text(Some(&key)) {
        Ok(degree) => println!("degree:    {}", degree),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

// Rank chord names for a comma-separated pitch-class list over a bass.
fn run_suggest(pcs_text: &str, bass_text: &str, key_name: Option<&str>) {
    let key = resolve_key(key_name);

    let mut pitches = [false; 12];
    for part in pcs_text.split(',') {
        match part.trim().parse::<usize>() {
            Ok(pc) if pc < 12 => pitches[pc] = true,
            _ => {
                eprintln!("Error: '{}' is not a pitch class in 0..12", part);
                process::exit(1);
            }
        }
    }

    let bass_pc = match bass_text.parse::<usize>() {
        Ok(pc) if pc < 12 => pc,
        _ => {
            eprintln!("Error: '{}' is not a pitch class in 0..12", bass_text);
            process::exit(1);
        }
    };

    for chord in suggest_chords(&pitches, bass_pc, &key, &PreferenceOrder::empty()) {
        match (chord.to_text(None), chord.to_text(Some(&key))) {
            (Ok(name), Ok(degree)) => println!("{}\t{}", name, degree),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}
