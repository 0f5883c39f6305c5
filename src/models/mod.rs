//! Data models for chord annotations
//!
//! Chord label values, the marker/region pair shown on the waveform, the
//! JAMS document and the lookup tables behind display glyphs and colours.

pub mod chord;
pub mod document;
pub mod mappings;
pub mod marker;

// Re-export commonly used types
pub use chord::{ChordComponent, ChordLabel, ChordSelection, NO_CHORD, UNKNOWN_CHORD};
pub use document::{AnnotationDocument, AnnotationForm, AnnotationMetadata, AnnotationSet, DataSource, Observation};
pub use marker::{Marker, MarkerId, MarkerKind, Region};
