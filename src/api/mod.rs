//! Chord Annotator WASM API
//!
//! This module provides the JavaScript-facing API for the chord annotator.
//!
//! # Module Structure
//!
//! - `helpers`: Logging macros, serde conversion and result mapping
//! - `types`: Result shapes returned to JavaScript
//! - `host`: Binding to the waveform player object
//! - `editor`: `ChordAnnotator`, the edit session wrapper
//! - `codec`: Stateless label helpers (parse, display text, colour)

pub mod helpers;
pub mod types;
pub mod host;
pub mod editor;
pub mod codec;

pub use editor::ChordAnnotator;
pub use host::WaveformHost;
pub use codec::{parse_chord_label, chord_display_text, chord_color, normalize_chord_label};
