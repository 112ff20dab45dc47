use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use usage_charts::coordinate_space::AxisSnapshot;
use usage_charts::view_controller::{ViewController, WindowBounds};

const T0: f64 = 1_700_000_000.0;

#[test]
fn test_pan_shifts_window_by_pixel_delta() {
    let snapshot = AxisSnapshot {
        start: T0,
        end: T0 + 120.0,
        ratio: 2.0,
    };
    // Dragging left by 50px moves the window 100s later.
    let (start, end) = ViewController::pan(&snapshot, 100.0, 50.0);
    assert_eq!(start, T0 + 100.0);
    assert_eq!(end, T0 + 220.0);

    let (start, end) = ViewController::pan(&snapshot, 100.0, 150.0);
    assert_eq!(start, T0 - 100.0);
    assert_eq!(end, T0 + 20.0);
}

#[test]
fn test_pan_then_clamp_keeps_span() {
    let bounds = WindowBounds::new(T0, T0 + 180.0, 60.0);
    let (start, end) = ViewController::correct_range(T0 + 100.0, T0 + 220.0, &bounds);
    assert_eq!(start, T0 + 60.0);
    assert_eq!(end, T0 + 180.0);
}

#[test]
fn test_correct_range_enforces_min_span() {
    let bounds = WindowBounds::new(T0, T0 + 3600.0, 60.0);
    let (start, end) = ViewController::correct_range(T0 + 100.0, T0 + 110.0, &bounds);
    assert_eq!(start, T0 + 100.0);
    assert_eq!(end, T0 + 160.0);

    // Too narrow and pressed against "now".
    let (start, end) = ViewController::correct_range(T0 + 3595.0, T0 + 3600.0, &bounds);
    assert_eq!(start, T0 + 3540.0);
    assert_eq!(end, T0 + 3600.0);
}

#[test]
fn test_correct_range_both_sides_out_of_bounds() {
    let bounds = WindowBounds::new(T0, T0 + 600.0, 60.0);
    let (start, end) = ViewController::correct_range(T0 - 1000.0, T0 + 5000.0, &bounds);
    assert_eq!(start, T0);
    assert_eq!(end, T0 + 600.0);
}

#[test]
fn test_correct_range_inverted_input() {
    let bounds = WindowBounds::new(T0, T0 + 600.0, 60.0);
    let (start, end) = ViewController::correct_range(T0 + 300.0, T0 + 100.0, &bounds);
    assert_eq!(start, T0 + 100.0);
    assert_eq!(end, T0 + 300.0);
}

#[test]
fn test_correct_range_lifetime_shorter_than_min_span() {
    let bounds = WindowBounds::new(T0, T0 + 30.0, 60.0);
    let (start, end) = ViewController::correct_range(T0 + 10.0, T0 + 20.0, &bounds);
    assert_eq!(start, T0);
    assert_eq!(end, T0 + 30.0);
}

#[test]
fn test_correct_date_is_idempotent() {
    let bounds = WindowBounds::new(T0, T0 + 86_400.0, 60.0);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let value = rng.random_range(T0 - 100_000.0..T0 + 200_000.0);
        let once = ViewController::correct_date_to_fix_range(value, &bounds);
        let twice = ViewController::correct_date_to_fix_range(once, &bounds);
        assert_eq!(once, twice);
        assert!(once >= bounds.instance_from && once <= bounds.instance_to);
    }
}

#[test]
fn test_committed_window_invariant() {
    let bounds = WindowBounds::new(T0, T0 + 86_400.0, 60.0);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let a = rng.random_range(T0 - 50_000.0..T0 + 150_000.0);
        let b = a + rng.random_range(-5_000.0..100_000.0);
        let (start, end) = ViewController::correct_range(a, b, &bounds);
        assert!(start >= bounds.instance_from, "start {start} before bounds");
        assert!(end <= bounds.instance_to, "end {end} after bounds");
        assert!(end - start >= 60.0 - 1e-3, "span {} too small", end - start);
    }
}

#[test]
fn test_zoom_selection_orders_endpoints() {
    assert_eq!(ViewController::zoom_selection(20.0, 10.0), (10.0, 20.0));
    assert_eq!(ViewController::zoom_selection(10.0, 20.0), (10.0, 20.0));
}

#[test]
fn test_default_window_ends_now() {
    let bounds = WindowBounds::new(T0, T0 + 7200.0, 60.0);
    assert_eq!(
        ViewController::default_window(&bounds, 3600.0),
        (T0 + 3600.0, T0 + 7200.0)
    );

    let young = WindowBounds::new(T0, T0 + 600.0, 60.0);
    assert_eq!(ViewController::default_window(&young, 3600.0), (T0, T0 + 600.0));
}

#[test]
fn test_follow_now_slides_pinned_window() {
    let bounds = WindowBounds::new(T0, T0 + 4000.0, 60.0);
    let (start, end) = ViewController::follow_now(T0 + 3000.0, T0 + 3600.0, true, &bounds);
    assert_eq!((start, end), (T0 + 3400.0, T0 + 4000.0));

    // Looking at the past: untouched.
    let (start, end) = ViewController::follow_now(T0 + 1000.0, T0 + 1600.0, false, &bounds);
    assert_eq!((start, end), (T0 + 1000.0, T0 + 1600.0));
}
