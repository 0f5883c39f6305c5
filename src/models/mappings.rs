//! Fixed lookup tables for chord display
//!
//! The variation table covers the tetrads vocabulary of the MIREX audio chord
//! estimation task plus the `N` (no chord) and `X` (unknown) labels. Each
//! entry carries the short text form, the glyph string for the chord symbol
//! font and a human readable description.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variation {
    pub shorthand: &'static str,
    pub simplified: &'static str,
    pub encoded: &'static str,
    pub description: &'static str,
}

pub const VARIATIONS: [Variation; 16] = [
    Variation { shorthand: "maj", simplified: "maj", encoded: "(M)", description: "major" },
    Variation { shorthand: "min", simplified: "m", encoded: "m", description: "minor" },
    Variation { shorthand: "maj7", simplified: "maj7", encoded: "^7", description: "major seventh" },
    Variation { shorthand: "min7", simplified: "m7", encoded: "m7", description: "minor seventh" },
    Variation { shorthand: "minmaj7", simplified: "m(maj7)", encoded: "m^7", description: "minor major seventh" },
    Variation { shorthand: "7", simplified: "7", encoded: "7", description: "dominant seventh" },
    Variation { shorthand: "sus2", simplified: "sus2", encoded: "s2", description: "suspended second" },
    Variation { shorthand: "sus4", simplified: "sus4", encoded: "s4", description: "suspended fourth" },
    Variation { shorthand: "min6", simplified: "m6", encoded: "m6", description: "minor sixth" },
    Variation { shorthand: "maj6", simplified: "6", encoded: "6", description: "major sixth" },
    Variation { shorthand: "dim", simplified: "dim", encoded: "o", description: "diminished" },
    Variation { shorthand: "aug", simplified: "aug", encoded: "+", description: "augmented" },
    Variation { shorthand: "dim7", simplified: "dim7", encoded: "o7", description: "diminished seventh" },
    Variation { shorthand: "hdim7", simplified: "m7b5", encoded: "\u{f8}7", description: "half-diminished seventh" },
    Variation { shorthand: "N", simplified: "N.C.", encoded: "N.C.", description: "no chord" },
    Variation { shorthand: "X", simplified: "??", encoded: "??", description: "unknown chord" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccidentalGlyph {
    pub simplified: &'static str,
    pub encoded: &'static str,
}

pub const ACCIDENTALS: [AccidentalGlyph; 3] = [
    AccidentalGlyph { simplified: "", encoded: "" },
    AccidentalGlyph { simplified: "#", encoded: "\u{266f}" },
    AccidentalGlyph { simplified: "b", encoded: "\u{266d}" },
];

/// Region colour used when a label's root matches no palette entry
pub const UNMATCHED_COLOR: &str = "rgba(255, 0, 0, 0.9)";

/// Root (with accidental) → region colour. Enharmonic spellings share a colour.
const CHORD_COLORS: [(&str, &str); 19] = [
    ("C", "rgba(184, 201, 255, 0.5)"),
    ("C#", "rgba(192, 174, 255, 0.5)"),
    ("Db", "rgba(192, 174, 255, 0.5)"),
    ("D", "rgba(220, 172, 255, 0.5)"),
    ("D#", "rgba(255, 168, 232, 0.5)"),
    ("Eb", "rgba(255, 168, 232, 0.5)"),
    ("E", "rgba(255, 170, 180, 0.5)"),
    ("F", "rgba(255, 196, 160, 0.5)"),
    ("F#", "rgba(255, 221, 150, 0.5)"),
    ("Gb", "rgba(255, 221, 150, 0.5)"),
    ("G", "rgba(240, 240, 150, 0.5)"),
    ("G#", "rgba(200, 240, 150, 0.5)"),
    ("Ab", "rgba(200, 240, 150, 0.5)"),
    ("A", "rgba(160, 235, 170, 0.5)"),
    ("A#", "rgba(150, 230, 215, 0.5)"),
    ("Bb", "rgba(150, 230, 215, 0.5)"),
    ("B", "rgba(160, 215, 250, 0.5)"),
    ("N", "rgba(128, 128, 128, 0.15)"),
    ("X", "rgba(80, 80, 80, 0.35)"),
];

static VARIATION_BY_SHORTHAND: Lazy<HashMap<&'static str, &'static Variation>> =
    Lazy::new(|| VARIATIONS.iter().map(|v| (v.shorthand, v)).collect());

static COLOR_BY_ROOT: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CHORD_COLORS.iter().copied().collect());

pub fn variation_for(shorthand: &str) -> Option<&'static Variation> {
    VARIATION_BY_SHORTHAND.get(shorthand).copied()
}

/// Reverse lookup used by the chord picker, which works on glyph strings
pub fn variation_for_encoded(encoded: &str) -> Option<&'static Variation> {
    VARIATIONS.iter().find(|v| v.encoded == encoded)
}

pub fn accidental_glyph(accidental: &str) -> Option<&'static AccidentalGlyph> {
    ACCIDENTALS.iter().find(|a| a.simplified == accidental)
}

pub fn accidental_for_encoded(encoded: &str) -> Option<&'static AccidentalGlyph> {
    ACCIDENTALS.iter().find(|a| a.encoded == encoded)
}

pub fn color_for_root(root_with_accidental: &str) -> Option<&'static str> {
    COLOR_BY_ROOT.get(root_with_accidental).copied()
}

pub fn is_known_shorthand(shorthand: &str) -> bool {
    VARIATION_BY_SHORTHAND.contains_key(shorthand)
}
