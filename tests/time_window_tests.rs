use graphdash_rs::core::window::{MIN_ZOOM_SPAN_SECS, TimeWindow, ZoomAction, ZoomPreset};

#[test]
fn preset_durations_match_the_button_row() {
    assert_eq!(ZoomPreset::Hour.duration_secs(), 3_600);
    assert_eq!(ZoomPreset::Day.duration_secs(), 86_400);
    assert_eq!(ZoomPreset::Week.duration_secs(), 7 * 86_400);
    assert_eq!(ZoomPreset::Month.duration_secs(), 31 * 86_400);
    assert_eq!(ZoomPreset::Year.duration_secs(), 366 * 86_400);
}

#[test]
fn preset_windows_end_at_the_reference_clock() {
    let now = 1_700_000_000;
    let window = TimeWindow::preset_at(now, ZoomPreset::Week);
    assert_eq!(window.end, now);
    assert_eq!(window.begin, now - 7 * 86_400);
    assert_eq!(window.width_secs(), 7 * 86_400);
}

#[test]
fn reversed_endpoints_are_swapped() {
    let window = TimeWindow::new(2_000, 1_000).expect("window");
    assert_eq!(window.begin, 1_000);
    assert_eq!(window.end, 2_000);
}

#[test]
fn empty_windows_are_rejected() {
    assert!(TimeWindow::new(1_000, 1_000).is_err());
    assert!(TimeWindow::ending_at(1_000, 0).is_err());
    assert!(TimeWindow::ending_at(1_000, -60).is_err());
}

#[test]
fn ending_at_builds_the_expected_range() {
    let window = TimeWindow::ending_at(1_700_000_000, 3_600).expect("window");
    assert_eq!(window.begin, 1_699_996_400);
    assert_eq!(window.end, 1_700_000_000);
}

#[test]
fn navigation_factors_match_the_button_row() {
    assert_eq!(ZoomAction::Earlier.factors(), (-0.2, -0.2));
    assert_eq!(ZoomAction::Later.factors(), (0.2, 0.2));
    assert_eq!(ZoomAction::In.factors(), (0.2, -0.2));
    assert_eq!(ZoomAction::Out.factors(), (-1.0 / 3.0, 1.0 / 3.0));
}

#[test]
fn earlier_and_later_shift_by_a_fifth_of_the_width() {
    let mut window = TimeWindow::new(1_000, 2_000).expect("window");
    assert!(window.apply(ZoomAction::Earlier));
    assert_eq!((window.begin, window.end), (800, 1_800));

    assert!(window.apply(ZoomAction::Later));
    assert_eq!((window.begin, window.end), (1_000, 2_000));
}

#[test]
fn zoom_in_narrows_from_both_sides() {
    let mut window = TimeWindow::new(0, 1_000).expect("window");
    assert!(window.apply(ZoomAction::In));
    assert_eq!((window.begin, window.end), (200, 800));
}

#[test]
fn zoom_out_widens_by_a_third_with_rounding() {
    let mut window = TimeWindow::new(0, 1_000).expect("window");
    assert!(window.apply(ZoomAction::Out));
    assert_eq!((window.begin, window.end), (-333, 1_333));
}

#[test]
fn zoom_in_at_the_floor_is_a_no_op() {
    let mut window = TimeWindow::new(0, MIN_ZOOM_SPAN_SECS).expect("window");
    let before = window;
    assert!(!window.apply(ZoomAction::In));
    assert_eq!(window, before);
}

#[test]
fn other_actions_still_work_at_the_floor() {
    let mut window = TimeWindow::new(0, MIN_ZOOM_SPAN_SECS).expect("window");
    assert!(window.apply(ZoomAction::Out));
    assert_eq!((window.begin, window.end), (-100, 400));

    let mut window = TimeWindow::new(0, MIN_ZOOM_SPAN_SECS).expect("window");
    assert!(window.apply(ZoomAction::Earlier));
    assert_eq!((window.begin, window.end), (-60, 240));
}

#[test]
fn zoom_in_can_dip_below_the_floor_once() {
    // The floor halts further zooming, it does not clamp the result.
    let mut window = TimeWindow::new(0, 400).expect("window");
    assert!(window.apply(ZoomAction::In));
    assert_eq!(window.width_secs(), 240);
    assert!(!window.apply(ZoomAction::In));
}
