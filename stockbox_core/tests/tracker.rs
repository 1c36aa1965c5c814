use rstest::rstest;
use stockbox_core::{Presence, TrackerCfg, TrackerEvent, WeightStabilityTracker};

fn reports(t: &mut WeightStabilityTracker, weights: &[f32]) -> Vec<f32> {
    weights
        .iter()
        .filter_map(|&w| match t.observe(w) {
            Some(TrackerEvent::ReportReady { weight }) => Some(weight),
            _ => None,
        })
        .collect()
}

fn tracker(min_stable_ticks: u32) -> WeightStabilityTracker {
    WeightStabilityTracker::new(TrackerCfg {
        min_stable_ticks,
        ..TrackerCfg::default()
    })
}

#[rstest]
#[case::first_settled_tick(1, 16.0)]
#[case::two_settled_ticks(2, 51.0)]
fn placement_with_a_jump_reports_once(#[case] min_stable_ticks: u32, #[case] expected: f32) {
    let mut t = tracker(min_stable_ticks);
    let got = reports(&mut t, &[0.0, 0.0, 15.0, 16.0, 50.0, 52.0, 51.0]);
    assert_eq!(got, vec![expected]);
    assert!(matches!(t.presence(), Presence::Reported { .. }));
}

#[test]
fn readings_below_threshold_never_report() {
    let mut t = WeightStabilityTracker::default();
    let got = reports(&mut t, &[0.0, 3.0, 9.9, 9.0, 0.5, 9.99]);
    assert!(got.is_empty());
    assert_eq!(t.presence(), Presence::Idle);
}

#[test]
fn threshold_is_inclusive() {
    let mut t = WeightStabilityTracker::default();
    assert_eq!(t.observe(10.0), Some(TrackerEvent::Placed { weight: 10.0 }));
}

#[test]
fn noisy_object_reports_once_it_settles() {
    let mut t = WeightStabilityTracker::default();
    // 100 -> 130 and 130 -> 170 are jumps; 172 settles against 170.
    let got = reports(&mut t, &[100.0, 130.0, 170.0, 172.0, 171.0, 173.0]);
    assert_eq!(got, vec![172.0]);
}

#[test]
fn drift_after_report_is_silent() {
    let mut t = WeightStabilityTracker::default();
    let got = reports(&mut t, &[200.0, 201.0, 260.0, 320.0, 321.0, 322.0]);
    assert_eq!(got, vec![201.0]);
}

#[test]
fn removal_then_new_object_reports_again() {
    let mut t = WeightStabilityTracker::default();
    assert_eq!(reports(&mut t, &[50.0, 51.0]), vec![51.0]);
    assert_eq!(t.observe(2.0), Some(TrackerEvent::Removed));
    assert_eq!(t.presence(), Presence::Idle);
    assert_eq!(t.observe(0.0), None);
    assert_eq!(reports(&mut t, &[80.0, 80.0]), vec![80.0]);
}

#[test]
fn removal_before_settling_produces_no_report() {
    let mut t = WeightStabilityTracker::default();
    assert!(reports(&mut t, &[50.0, 90.0, 140.0, 0.0]).is_empty());
    assert_eq!(t.presence(), Presence::Idle);
}

#[test]
fn rearm_allows_a_second_report_for_the_same_object() {
    let mut t = WeightStabilityTracker::default();
    assert_eq!(reports(&mut t, &[300.0, 301.0, 302.0]), vec![301.0]);
    t.rearm();
    assert_eq!(reports(&mut t, &[302.0]), vec![302.0]);
    assert!(reports(&mut t, &[302.0, 301.0]).is_empty());
}

#[test]
fn rearm_keeps_the_anchor() {
    let mut t = WeightStabilityTracker::default();
    reports(&mut t, &[300.0, 301.0]);
    t.rearm();
    assert_eq!(
        t.presence(),
        Presence::Settling {
            reference: 300.0,
            settled: 0
        }
    );
    // far from the anchor: re-anchors rather than reporting
    assert!(reports(&mut t, &[400.0]).is_empty());
    assert_eq!(reports(&mut t, &[401.0]), vec![401.0]);
}

#[rstest]
#[case(5.0, false)]
#[case(4.99, true)]
fn margin_is_exclusive(#[case] delta: f32, #[case] reports_now: bool) {
    let mut t = WeightStabilityTracker::default();
    t.observe(100.0);
    let ev = t.observe(100.0 + delta);
    assert_eq!(matches!(ev, Some(TrackerEvent::ReportReady { .. })), reports_now);
}

#[test]
fn drop_to_zero_then_sixty_reports_a_second_time() {
    let mut t = WeightStabilityTracker::default();
    assert_eq!(reports(&mut t, &[0.0, 30.0, 31.0, 31.0]), vec![31.0]);
    assert_eq!(reports(&mut t, &[0.0, 0.0, 58.0, 60.0, 61.0, 60.0]), vec![60.0]);
}
