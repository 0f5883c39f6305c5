//! WASM build test
//!
//! Tests that the WASM module can be built and the JS-facing API works.

use chord_annotator_wasm::api::{chord_color, chord_display_text, normalize_chord_label};
use chord_annotator_wasm::models::mappings::UNMATCHED_COLOR;
use chord_annotator_wasm::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = include_str!("fixtures/let_it_be.jams");

#[wasm_bindgen_test]
fn test_annotator_creation() {
    let annotator = ChordAnnotator::new(JsValue::UNDEFINED);
    assert!(annotator.is_ok());
}

#[wasm_bindgen_test]
fn test_import_and_render() {
    let mut annotator = ChordAnnotator::new(JsValue::UNDEFINED).unwrap();
    assert!(annotator.import_document(FIXTURE.as_bytes()).is_ok());
    assert_eq!(annotator.session().timeline().len(), 7);
    assert!(annotator.render().is_ok());
    assert!(!annotator.has_unsaved_changes());
}

#[wasm_bindgen_test]
fn test_malformed_import_throws() {
    let mut annotator = ChordAnnotator::new(JsValue::UNDEFINED).unwrap();
    assert!(annotator.import_document(b"not json").is_err());
}

#[wasm_bindgen_test]
fn test_anchor_query() {
    let mut annotator = ChordAnnotator::new(JsValue::UNDEFINED).unwrap();
    annotator.import_document(FIXTURE.as_bytes()).unwrap();
    let anchor = annotator.session().timeline().anchor().unwrap().id;
    assert!(annotator.is_anchor(anchor.0));
    assert!(!annotator.can_replace(0));
    assert!(annotator.can_replace(1));
}

#[wasm_bindgen_test]
fn test_export_round_trip() {
    let mut annotator = ChordAnnotator::new(JsValue::UNDEFINED).unwrap();
    annotator.import_document(FIXTURE.as_bytes()).unwrap();
    let exported = annotator.export_document().unwrap().to_vec();
    let mut other = ChordAnnotator::new(JsValue::UNDEFINED).unwrap();
    assert!(other.import_document(&exported).is_ok());
    assert_eq!(other.session().document(), annotator.session().document());
}

#[wasm_bindgen_test]
fn test_codec_helpers() {
    assert_eq!(chord_display_text("C#:maj7/3"), "C# maj7/3");
    assert_eq!(normalize_chord_label("A:min"), "A:min");
    assert_eq!(chord_color("Q:maj"), UNMATCHED_COLOR);
}
