//! Marker timeline for the displayed annotation
//!
//! Markers are kept sorted by time. Every structural change re-sorts the
//! list and regenerates all durations and regions from scratch, so readers
//! never observe a partially updated timeline.

mod visibility;

pub use visibility::MarkerVisibility;

use crate::error::{EditResult, GuardViolation};
use crate::models::chord::NO_CHORD;
use crate::models::document::Observation;
use crate::models::marker::{Marker, MarkerId, MarkerKind, Region};
use crate::parse::chord_label;
use crate::renderers::colors;

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationTimeline {
    markers: Vec<Marker>,
    regions: Vec<Region>,
    track_duration: f64,
    duration_precision: u32,
    next_id: u32,
}

impl AnnotationTimeline {
    /// Create a timeline holding only an `N` anchor at 0s
    pub fn new(track_duration: f64, duration_precision: u32) -> Self {
        let mut timeline = Self {
            markers: Vec::new(),
            regions: Vec::new(),
            track_duration: sanitize_duration(track_duration),
            duration_precision,
            next_id: 0,
        };
        timeline.push_marker(0.0, NO_CHORD, MarkerKind::New, false);
        timeline.recompute_durations_and_regions();
        timeline
    }

    /// Build a timeline from stored observations.
    ///
    /// When the first observation starts after 0s, an `N` anchor fills the
    /// gap. Observations sharing a time with an earlier one are skipped.
    pub fn from_observations(
        observations: &[Observation],
        track_duration: f64,
        duration_precision: u32,
    ) -> Self {
        let mut timeline = Self {
            markers: Vec::with_capacity(observations.len() + 1),
            regions: Vec::new(),
            track_duration: sanitize_duration(track_duration),
            duration_precision,
            next_id: 0,
        };

        let mut sorted: Vec<&Observation> = observations.iter().collect();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

        match sorted.first() {
            Some(first) if first.time == 0.0 => {}
            _ => {
                timeline.push_marker(0.0, NO_CHORD, MarkerKind::New, false);
            }
        }

        for obs in sorted {
            if timeline.marker_at_time(obs.time).is_some() {
                log::warn!("Skipping duplicate observation at {}s ({})", obs.time, obs.value);
                continue;
            }
            let draggable = obs.time != 0.0;
            timeline.push_marker(obs.time, &obs.value, MarkerKind::New, draggable);
        }

        timeline.recompute_durations_and_regions();
        log::debug!("Built timeline with {} markers", timeline.markers.len());
        timeline
    }

    fn push_marker(&mut self, time: f64, raw_label: &str, kind: MarkerKind, draggable: bool) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker {
            id,
            time,
            raw_label: raw_label.to_string(),
            draggable: draggable && time != 0.0,
            kind,
            duration: 0.0,
        });
        id
    }

    fn check_time(&self, time: f64) -> EditResult<()> {
        if !time.is_finite() || time < 0.0 {
            return Err(GuardViolation::OutOfRange { time });
        }
        if self.track_duration > 0.0 && time >= self.track_duration {
            return Err(GuardViolation::OutOfRange { time });
        }
        Ok(())
    }

    fn index_of(&self, id: MarkerId) -> EditResult<usize> {
        self.markers
            .iter()
            .position(|m| m.id == id)
            .ok_or(GuardViolation::UnknownMarker(id))
    }

    /// Add a marker; times already taken by another marker are rejected
    pub fn insert(
        &mut self,
        time: f64,
        raw_label: &str,
        kind: MarkerKind,
        draggable: bool,
    ) -> EditResult<&Marker> {
        self.check_time(time)?;
        if self.marker_at_time(time).is_some() {
            return Err(GuardViolation::OccupiedTime { time });
        }

        let id = self.push_marker(time, raw_label, kind, draggable);
        self.recompute_durations_and_regions();
        self.get(id).ok_or(GuardViolation::UnknownMarker(id))
    }

    /// Remove a marker by identity; the anchor stays
    pub fn remove(&mut self, id: MarkerId) -> EditResult<Marker> {
        let index = self.index_of(id)?;
        if self.markers[index].is_anchor() {
            return Err(GuardViolation::AnchorMarker);
        }
        let removed = self.markers.remove(index);
        self.recompute_durations_and_regions();
        Ok(removed)
    }

    /// Move a marker to a new time, marking it as edited
    pub fn move_to(&mut self, id: MarkerId, new_time: f64) -> EditResult<&Marker> {
        let index = self.index_of(id)?;
        if self.markers[index].is_anchor() {
            return Err(GuardViolation::AnchorMarker);
        }
        self.check_time(new_time)?;
        if let Some(other) = self.marker_at_time(new_time) {
            if other.id != id {
                return Err(GuardViolation::OccupiedTime { time: new_time });
            }
        }

        let marker = &mut self.markers[index];
        marker.time = new_time;
        marker.kind = MarkerKind::Edited;
        self.recompute_durations_and_regions();
        self.get(id).ok_or(GuardViolation::UnknownMarker(id))
    }

    /// Replace a marker's label in place, keeping its time and draggability
    pub fn relabel(&mut self, id: MarkerId, raw_label: &str, kind: MarkerKind) -> EditResult<&Marker> {
        let index = self.index_of(id)?;
        let marker = &mut self.markers[index];
        marker.raw_label = raw_label.to_string();
        marker.kind = kind;
        self.recompute_durations_and_regions();
        self.get(id).ok_or(GuardViolation::UnknownMarker(id))
    }

    /// Sort markers and regenerate every duration and region
    pub fn recompute_durations_and_regions(&mut self) {
        self.markers.sort_by(|a, b| a.time.total_cmp(&b.time));

        let count = self.markers.len();
        for i in 0..count {
            let next_time = if i + 1 < count {
                self.markers[i + 1].time
            } else {
                self.track_duration
            };
            let duration = (next_time - self.markers[i].time).max(0.0);
            self.markers[i].duration = self.round(duration);
        }

        self.regions = self
            .markers
            .iter()
            .map(|m| Region {
                start: m.time,
                end: m.end(),
                chord_label: m.raw_label.clone(),
                display_color: colors::color_for(&m.raw_label).to_string(),
            })
            .collect();
    }

    fn round(&self, seconds: f64) -> f64 {
        let scale = 10f64.powi(self.duration_precision as i32);
        (seconds * scale).round() / scale
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn anchor(&self) -> Option<&Marker> {
        self.markers.first().filter(|m| m.is_anchor())
    }

    pub fn is_anchor(&self, id: MarkerId) -> bool {
        self.get(id).map_or(false, Marker::is_anchor)
    }

    pub fn marker_at_time(&self, time: f64) -> Option<&Marker> {
        self.markers.iter().find(|m| m.time == time)
    }

    /// Region under a playhead position (the last region also covers the track end)
    pub fn region_at(&self, time: f64) -> Option<&Region> {
        let index = self.markers.partition_point(|m| m.time <= time);
        index.checked_sub(1).and_then(|i| self.regions.get(i))
    }

    pub fn track_duration(&self) -> f64 {
        self.track_duration
    }

    pub fn set_track_duration(&mut self, track_duration: f64) {
        self.track_duration = sanitize_duration(track_duration);
        self.recompute_durations_and_regions();
    }

    /// Snapshot the markers as annotation observations
    pub fn observations(&self) -> Vec<Observation> {
        self.markers
            .iter()
            .map(|m| Observation::new(m.time, m.duration, &chord_label::normalize(&m.raw_label)))
            .collect()
    }

    /// Per-marker label/handle/drag flags for the current mode
    pub fn visibility_plan(&self, edit_mode: bool) -> Vec<MarkerVisibility> {
        visibility::plan(&self.markers, edit_mode)
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Beats per minute for one beat length, floored and clamped
pub fn estimate_tempo(beat_duration: f64, min_tempo: u32, max_tempo: u32) -> u32 {
    if !(beat_duration.is_finite() && beat_duration > 0.0) {
        return min_tempo;
    }
    let tempo = (60.0 / beat_duration).floor();
    tempo.clamp(min_tempo as f64, max_tempo as f64) as u32
}
