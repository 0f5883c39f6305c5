//! Marker label visibility rules
//!
//! Outside edit mode a label that repeats the previous marker's chord is
//! hidden, and `N` labels are hidden altogether. Edit mode shows everything
//! so that every marker can be picked. The flag icon is hidden on the anchor
//! and on repeated chords in both modes.

use serde::{Deserialize, Serialize};

use crate::models::chord::NO_CHORD;
use crate::models::marker::{Marker, MarkerId};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerVisibility {
    pub id: MarkerId,
    pub show_label: bool,
    pub show_handle: bool,
    pub draggable: bool,
}

pub(super) fn plan(markers: &[Marker], edit_mode: bool) -> Vec<MarkerVisibility> {
    let mut previous: Option<&str> = None;

    markers
        .iter()
        .map(|marker| {
            let label = marker.raw_label.as_str();
            let repeated = previous == Some(label);
            previous = Some(label);

            let show_label = if label == NO_CHORD || repeated {
                edit_mode
            } else {
                true
            };

            MarkerVisibility {
                id: marker.id,
                show_label,
                show_handle: !repeated && !marker.is_anchor(),
                draggable: edit_mode && marker.draggable && !marker.is_anchor(),
            }
        })
        .collect()
}
