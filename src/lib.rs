//! Chord Annotator WASM Module
//!
//! Core of the chord annotation editor: MIREX chord label codec, the marker
//! timeline of the displayed annotation, region colours and the edit session
//! that guards every change. The waveform player stays on the JavaScript
//! side and is driven from the render plan.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parse;
pub mod renderers;
pub mod session;
pub mod timeline;

// Re-export commonly used types
pub use api::ChordAnnotator;
pub use config::EditorConfig;
pub use error::{AnnotatorError, EditResult, GuardViolation};
pub use models::chord::{ChordComponent, ChordLabel, ChordSelection};
pub use models::document::{AnnotationDocument, AnnotationSet, Observation};
pub use models::marker::{Marker, MarkerId, MarkerKind, Region};
pub use session::{EditSession, PlaybackHost};
pub use timeline::AnnotationTimeline;

#[cfg(feature = "console_log")]
use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[cfg(feature = "console_log")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Chord annotator WASM module initialized");
}
