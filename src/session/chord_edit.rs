//! In-progress relabelling of one marker through the chord picker

use serde::{Deserialize, Serialize};

use crate::models::chord::{ChordComponent, ChordSelection};
use crate::models::marker::{Marker, MarkerId, MarkerKind};
use crate::parse::chord_label;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChordEdit {
    pub marker: MarkerId,

    /// Selection the marker had when the picker opened
    pub current: ChordSelection,

    /// Selection being built in the picker
    pub new: ChordSelection,

    original_label: String,
    original_kind: MarkerKind,
}

impl ChordEdit {
    pub fn begin(marker: &Marker) -> Self {
        let current = chord_label::parse(&marker.raw_label)
            .map(|parts| parts.selection())
            .unwrap_or_default();
        Self {
            marker: marker.id,
            new: current.clone(),
            current,
            original_label: marker.raw_label.clone(),
            original_kind: marker.kind,
        }
    }

    pub fn pick(&mut self, component: ChordComponent, value: &str) {
        self.new.pick(component, value);
    }

    /// Apply is offered only when the picked chord differs from the original
    pub fn can_apply(&self) -> bool {
        self.new != self.current
    }

    /// MIREX label for the picked chord. The picker has no bass column, so
    /// the result is always in root position.
    pub fn new_label(&self) -> String {
        chord_label::to_mirex_notation(&self.new.to_label())
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn original_kind(&self) -> MarkerKind {
        self.original_kind
    }
}
