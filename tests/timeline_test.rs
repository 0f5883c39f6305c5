// Test marker timeline invariants through the public API

use chord_annotator_wasm::models::document::Observation;
use chord_annotator_wasm::{AnnotationTimeline, GuardViolation, MarkerKind};

fn observations(times: &[f64]) -> Vec<Observation> {
    times
        .iter()
        .map(|&time| Observation::new(time, 0.0, "C:maj"))
        .collect()
}

fn assert_sorted_and_consistent(timeline: &AnnotationTimeline) {
    let markers = timeline.markers();
    assert_eq!(markers[0].time, 0.0, "anchor must stay at 0s");
    for pair in markers.windows(2) {
        assert!(pair[0].time < pair[1].time, "markers out of order");
    }

    let covered: f64 = markers.iter().map(|m| m.duration).sum();
    assert!((covered - timeline.track_duration()).abs() < 1e-6);
    assert_eq!(timeline.regions().len(), markers.len());
}

#[test]
fn test_durations_for_example_track() {
    let timeline = AnnotationTimeline::from_observations(&observations(&[0.0, 2.0, 5.5]), 10.0, 3);
    let durations: Vec<f64> = timeline.markers().iter().map(|m| m.duration).collect();
    assert_eq!(durations, vec![2.0, 3.5, 4.5]);
}

#[test]
fn test_mixed_edits_keep_invariants() {
    let mut timeline = AnnotationTimeline::from_observations(&observations(&[0.0, 2.0, 5.5]), 10.0, 3);

    let added = timeline.insert(1.0, "G:maj", MarkerKind::New, true).unwrap().id;
    assert_sorted_and_consistent(&timeline);

    timeline.move_to(added, 7.25).unwrap();
    assert_sorted_and_consistent(&timeline);
    assert_eq!(timeline.markers()[3].id, added);

    let middle = timeline.marker_at_time(2.0).unwrap().id;
    timeline.remove(middle).unwrap();
    assert_sorted_and_consistent(&timeline);

    timeline.relabel(added, "A:min", MarkerKind::Replaced).unwrap();
    assert_sorted_and_consistent(&timeline);
    assert_eq!(timeline.get(added).unwrap().raw_label, "A:min");
    assert_eq!(timeline.get(added).unwrap().time, 7.25);
}

#[test]
fn test_rejected_edits_leave_timeline_untouched() {
    let mut timeline = AnnotationTimeline::from_observations(&observations(&[0.0, 2.0, 5.5]), 10.0, 3);
    let before = timeline.clone();
    let anchor = timeline.anchor().unwrap().id;
    let second = timeline.marker_at_time(2.0).unwrap().id;

    assert!(matches!(timeline.move_to(anchor, 1.0), Err(GuardViolation::AnchorMarker)));
    assert!(matches!(timeline.remove(anchor), Err(GuardViolation::AnchorMarker)));
    assert!(matches!(
        timeline.move_to(second, 5.5),
        Err(GuardViolation::OccupiedTime { .. })
    ));
    assert!(matches!(
        timeline.insert(12.0, "C:maj", MarkerKind::New, true),
        Err(GuardViolation::OutOfRange { .. })
    ));

    assert_eq!(timeline, before);
}

#[test]
fn test_observations_snapshot_matches_markers() {
    let source = vec![
        Observation::new(0.75, 1.0, "E:min"),
        Observation::new(3.0, 1.0, "B:7"),
    ];
    let timeline = AnnotationTimeline::from_observations(&source, 5.0, 3);
    let snapshot = timeline.observations();

    assert_eq!(
        snapshot,
        vec![
            Observation::new(0.0, 0.75, "N"),
            Observation::new(0.75, 2.25, "E:min"),
            Observation::new(3.0, 2.0, "B:7"),
        ]
    );
}
