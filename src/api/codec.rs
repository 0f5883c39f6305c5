//! Stateless chord label helpers for the UI

use wasm_bindgen::prelude::*;

use crate::parse::chord_label;
use crate::renderers::{chord_symbol, colors};

use super::helpers::{annotator_error, serialize};

/// Parse a MIREX label into `{ root_note, accidental, shorthand, bass_note }`
#[wasm_bindgen(js_name = parseChordLabel)]
pub fn parse_chord_label(label: &str) -> Result<JsValue, JsValue> {
    let parts = chord_label::parse(label).map_err(|e| annotator_error(e, "parseChordLabel"))?;
    serialize(&parts, "parseChordLabel")
}

#[wasm_bindgen(js_name = chordDisplayText)]
pub fn chord_display_text(label: &str) -> String {
    chord_symbol::display_text_for(label)
}

#[wasm_bindgen(js_name = chordColor)]
pub fn chord_color(label: &str) -> String {
    colors::color_for(label).to_string()
}

#[wasm_bindgen(js_name = normalizeChordLabel)]
pub fn normalize_chord_label(label: &str) -> String {
    chord_label::normalize(label)
}
