//! View model handed to the waveform layer after every change

use serde::{Deserialize, Serialize};

use crate::models::marker::{MarkerId, MarkerKind};
use crate::renderers::chord_symbol::{self, SymbolParts};
use crate::timeline::AnnotationTimeline;

use super::SessionState;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkerView {
    pub id: MarkerId,
    pub time: f64,
    pub duration: f64,
    pub raw_label: String,
    pub label_text: String,
    pub symbol_html: String,
    pub symbol_parts: SymbolParts,
    pub show_label: bool,
    pub show_handle: bool,
    pub draggable: bool,
    pub kind: MarkerKind,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RegionView {
    pub start: f64,
    pub end: f64,
    pub color: String,
    pub chord_label: String,
    pub display_text: String,
    pub tooltip: String,
}

/// One entry of the annotation drop-down
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationOption {
    pub index: usize,
    pub label: String,
    pub selected: bool,
    pub deletable: bool,
    pub replaceable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub state: SessionState,
    pub edit_mode: bool,
    pub has_unsaved_changes: bool,
    pub selected_annotation: Option<usize>,
    pub markers: Vec<MarkerView>,
    pub regions: Vec<RegionView>,
}

pub(super) fn marker_views(
    timeline: &AnnotationTimeline,
    edit_mode: bool,
    selected: Option<MarkerId>,
) -> Vec<MarkerView> {
    timeline
        .markers()
        .iter()
        .zip(timeline.visibility_plan(edit_mode))
        .map(|(marker, visibility)| {
            let (symbol_html, symbol_parts) = chord_symbol::symbol_markup_for(&marker.raw_label);
            MarkerView {
                id: marker.id,
                time: marker.time,
                duration: marker.duration,
                raw_label: marker.raw_label.clone(),
                label_text: chord_symbol::display_text_for(&marker.raw_label),
                symbol_html,
                symbol_parts,
                show_label: visibility.show_label,
                show_handle: visibility.show_handle,
                draggable: visibility.draggable,
                kind: marker.kind,
                selected: selected == Some(marker.id),
            }
        })
        .collect()
}

pub(super) fn region_views(timeline: &AnnotationTimeline) -> Vec<RegionView> {
    timeline
        .regions()
        .iter()
        .map(|region| RegionView {
            start: region.start,
            end: region.end,
            color: region.display_color.clone(),
            chord_label: region.chord_label.clone(),
            display_text: chord_symbol::display_text_for(&region.chord_label),
            tooltip: chord_symbol::tooltip_for(&region.chord_label, region.start, region.duration()),
        })
        .collect()
}
