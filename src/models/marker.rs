//! Timeline markers and the regions derived from them

use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

/// Stable identity of a marker inside one timeline
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a marker came to be, which decides its line style
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum MarkerKind {
    /// Loaded from an annotation or added at the playhead
    New = 0,

    /// Moved by dragging
    Edited = 1,

    /// Relabelled through the chord picker
    Replaced = 2,
}

impl Default for MarkerKind {
    fn default() -> Self {
        MarkerKind::New
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,

    /// Seconds from the start of the track
    pub time: f64,

    /// MIREX notation, kept verbatim even when it does not parse
    pub raw_label: String,

    pub draggable: bool,
    pub kind: MarkerKind,

    /// Seconds until the next marker (or the track end); derived
    pub duration: f64,
}

impl Marker {
    pub fn is_anchor(&self) -> bool {
        self.time == 0.0
    }

    pub fn end(&self) -> f64 {
        self.time + self.duration
    }
}

/// Span between two consecutive markers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub chord_label: String,
    pub display_color: String,
}

impl Region {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
