//! Display forms of chord labels
//!
//! Two renderings exist: plain text (`C#m7/3`) and markup for the chord
//! symbol font, where accidentals and variations are replaced by glyph
//! strings and the bass note is wrapped so it opts out of the symbol font.

use serde::{Deserialize, Serialize};

use crate::models::chord::ChordLabel;
use crate::models::mappings::{accidental_glyph, variation_for};
use crate::parse::chord_label;

/// Resolved glyph parts of a chord symbol.
///
/// The picker uses these to highlight the current selection, so `variation`
/// keeps the encoded glyph even for major chords where the markup omits it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolParts {
    pub root: String,
    pub accidental: String,
    pub variation: String,
    pub inversion: String,
}

fn separator(root: &str, label: &ChordLabel, body: &str) -> &'static str {
    // Bare majors read as just the root; rootless labels need no gap either
    if label.is_major() || root.is_empty() || body.is_empty() {
        ""
    } else {
        " "
    }
}

fn bass_suffix(label: &ChordLabel) -> String {
    if label.bass_note.is_empty() {
        String::new()
    } else {
        format!("/{}", label.bass_note)
    }
}

/// Human readable short form, e.g. `C# maj7/3`, `A m`, `G`
pub fn to_display_text(label: &ChordLabel) -> String {
    let simplified = if label.is_major() {
        ""
    } else {
        variation_for(&label.shorthand).map(|v| v.simplified).unwrap_or("")
    };
    let root = label.root_with_accidental();

    format!(
        "{}{}{}{}",
        root,
        separator(&root, label, simplified),
        simplified,
        bass_suffix(label)
    )
}

/// Markup for the chord symbol font plus the individual resolved parts
pub fn to_symbol_markup(label: &ChordLabel) -> (String, SymbolParts) {
    let accidental = accidental_glyph(&label.accidental)
        .map(|a| a.encoded)
        .unwrap_or("");
    let encoded_variation = variation_for(&label.shorthand)
        .map(|v| v.encoded)
        .unwrap_or("");
    let shown_variation = if label.is_major() { "" } else { encoded_variation };
    let inversion = format!(
        "<text id=\"disable-font-label\">{}</text>",
        escape_html(&bass_suffix(label))
    );

    let root = escape_html(&label.root_note);
    let html = format!(
        "{}{}{}{}{}",
        root,
        accidental,
        separator(&label.root_note, label, shown_variation),
        shown_variation,
        inversion
    );

    let parts = SymbolParts {
        root,
        accidental: accidental.to_string(),
        variation: encoded_variation.to_string(),
        inversion,
    };
    (html, parts)
}

/// Hover text for a region: chord description, start time and duration
pub fn tooltip_text(label: &ChordLabel, time: f64, duration: f64) -> String {
    let description = variation_for(&label.shorthand)
        .map(|v| v.description)
        .unwrap_or("");
    let root = label.root_with_accidental();
    let chord = format!(
        "{}{}{}{}",
        root,
        if root.is_empty() || description.is_empty() { "" } else { " " },
        description,
        bass_suffix(label)
    );
    format!("{}\nTime: {}s\nDuration: {}s", chord, time, duration)
}

/// Display text straight from a raw label; malformed labels show verbatim
pub fn display_text_for(raw_label: &str) -> String {
    match chord_label::parse(raw_label) {
        Ok(parts) => to_display_text(&parts),
        Err(_) => raw_label.to_string(),
    }
}

/// Symbol markup from a raw label; malformed labels render as escaped text
pub fn symbol_markup_for(raw_label: &str) -> (String, SymbolParts) {
    match chord_label::parse(raw_label) {
        Ok(parts) => to_symbol_markup(&parts),
        Err(_) => (escape_html(raw_label), SymbolParts::default()),
    }
}

pub fn tooltip_for(raw_label: &str, time: f64, duration: f64) -> String {
    match chord_label::parse(raw_label) {
        Ok(parts) => tooltip_text(&parts, time, duration),
        Err(_) => format!("{}\nTime: {}s\nDuration: {}s", raw_label, time, duration),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
