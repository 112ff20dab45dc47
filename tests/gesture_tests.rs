use usage_charts::chart_view::{
    ChartView, GestureController, GestureEffect, GestureState, Key, PointerEvent,
};
use usage_charts::config::ChartConfig;
use usage_charts::coordinate_space::CoordinateSpace;
use usage_charts::data_types::{AxisDataType, AxisPosition, ChartDataset, SeriesPoint};
use usage_charts::plot_context::PlotContext;
use usage_charts::theme::ChartTheme;

/// Plot area is 540x300 at (60, 0); one pixel per second over [0, 540].
fn context() -> PlotContext {
    let config = ChartConfig::default();
    let mut ctx = PlotContext::new(&config);
    ctx.register_axis(
        CoordinateSpace::time("time", AxisPosition::Bottom, &config).with_range(0.0, 540.0),
    );
    ctx.register_axis(
        CoordinateSpace::new("value", AxisPosition::Left, AxisDataType::Numeric)
            .with_size(60.0)
            .with_range(0.0, 100.0),
    );
    ctx.set_size(600.0, 330.0);
    ctx.set_data(ChartDataset::new(vec![
        SeriesPoint::new(0.0, Some(1.0)),
        SeriesPoint::new(100.0, Some(2.0)),
        SeriesPoint::new(200.0, Some(3.0)),
    ]));
    ctx
}

fn down(x: f32, shift: bool) -> PointerEvent {
    PointerEvent::Down { x, y: 150.0, shift }
}

fn mv(x: f32) -> PointerEvent {
    PointerEvent::Move { x, y: 150.0 }
}

fn up(x: f32) -> PointerEvent {
    PointerEvent::Up { x, y: 150.0 }
}

#[test]
fn test_drag_previews_then_commits() {
    let ctx = context();
    let mut gestures = GestureController::new();

    gestures.handle(down(160.0, false), &ctx);
    assert!(matches!(gestures.state(), GestureState::Moving(_)));

    let effects = gestures.handle(mv(110.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::PreviewRange {
            start: 50.0,
            end: 590.0
        }]
    );

    let effects = gestures.handle(up(110.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::CommitRange {
            start: 50.0,
            end: 590.0
        }]
    );
    assert!(gestures.state().is_idle());
}

#[test]
fn test_click_without_move_commits_unchanged_window() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, false), &ctx);
    let effects = gestures.handle(up(160.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::CommitRange {
            start: 0.0,
            end: 540.0
        }]
    );
}

#[test]
fn test_shift_drag_zooms_to_selection() {
    let ctx = context();
    let mut gestures = GestureController::new();

    gestures.handle(down(160.0, true), &ctx);
    match gestures.state() {
        GestureState::Zooming(zoom) => assert_eq!(zoom.start, 100.0),
        other => panic!("expected zooming, got {other:?}"),
    }

    let effects = gestures.handle(mv(260.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::RubberBand {
            from_px: 160.0,
            to_px: 260.0
        }]
    );

    let effects = gestures.handle(up(260.0), &ctx);
    assert_eq!(
        effects,
        vec![
            GestureEffect::ClearRubberBand,
            GestureEffect::CommitRange {
                start: 100.0,
                end: 200.0
            }
        ]
    );
    assert!(gestures.state().is_idle());
}

#[test]
fn test_reverse_selection_is_ordered() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, true), &ctx);
    let effects = gestures.handle(mv(110.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::RubberBand {
            from_px: 110.0,
            to_px: 160.0
        }]
    );
    let effects = gestures.handle(up(110.0), &ctx);
    assert_eq!(
        effects[1],
        GestureEffect::CommitRange {
            start: 50.0,
            end: 100.0
        }
    );
}

#[test]
fn test_rubber_band_is_clamped_to_plot_area() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, true), &ctx);
    let effects = gestures.handle(mv(10.0), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::RubberBand {
            from_px: 60.0,
            to_px: 160.0
        }]
    );
}

#[test]
fn test_escape_cancels_zoom() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, true), &ctx);
    gestures.handle(mv(260.0), &ctx);
    let effects = gestures.handle(PointerEvent::KeyDown(Key::Escape), &ctx);
    assert_eq!(effects, vec![GestureEffect::ClearRubberBand]);
    assert!(gestures.state().is_idle());
    // The release after cancelling commits nothing.
    assert!(gestures.handle(up(260.0), &ctx).is_empty());
}

#[test]
fn test_escape_restores_window_while_moving() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, false), &ctx);
    gestures.handle(mv(110.0), &ctx);
    let effects = gestures.handle(PointerEvent::KeyDown(Key::Escape), &ctx);
    assert_eq!(
        effects,
        vec![GestureEffect::PreviewRange {
            start: 0.0,
            end: 540.0
        }]
    );
    assert!(gestures.state().is_idle());
}

#[test]
fn test_escape_when_idle_does_nothing() {
    let ctx = context();
    let mut gestures = GestureController::new();
    assert!(gestures
        .handle(PointerEvent::KeyDown(Key::Escape), &ctx)
        .is_empty());
    assert!(gestures
        .handle(PointerEvent::KeyDown(Key::Other), &ctx)
        .is_empty());
}

#[test]
fn test_press_outside_plot_area_is_ignored() {
    let ctx = context();
    let mut gestures = GestureController::new();
    assert!(gestures.handle(down(30.0, false), &ctx).is_empty());
    assert!(gestures.state().is_idle());
}

#[test]
fn test_second_press_during_gesture_is_ignored() {
    let ctx = context();
    let mut gestures = GestureController::new();
    gestures.handle(down(160.0, false), &ctx);
    let before = *gestures.state();
    assert!(gestures.handle(down(200.0, true), &ctx).is_empty());
    assert_eq!(*gestures.state(), before);
}

#[test]
fn test_idle_move_hovers_nearest_point() {
    let ctx = context();
    let mut gestures = GestureController::new();
    let effects = gestures.handle(mv(60.0 + 90.0), &ctx);
    match &effects[..] {
        [GestureEffect::Hover(Some(hover))] => {
            assert_eq!(hover.point.x, 100.0);
            assert_eq!(hover.anchor_x, 160.0);
            assert_eq!(hover.pointer, (150.0, 150.0));
        }
        other => panic!("unexpected effects {other:?}"),
    }

    let effects = gestures.handle(mv(20.0), &ctx);
    assert_eq!(effects, vec![GestureEffect::Hover(None)]);

    let effects = gestures.handle(PointerEvent::Leave, &ctx);
    assert_eq!(effects, vec![GestureEffect::Hover(None)]);
}

#[test]
fn test_transition_is_pure() {
    let ctx = context();
    let state = GestureState::Idle;
    let (a, ea) = state.transition(down(160.0, true), &ctx);
    let (b, eb) = state.transition(down(160.0, true), &ctx);
    assert_eq!(a, b);
    assert_eq!(ea, eb);
    assert!(state.is_idle());
}

#[test]
fn test_chart_view_applies_local_effects() {
    let config = ChartConfig::default();
    let mut view = ChartView::time_series("CPU", &config, ChartTheme::default());
    view.set_size(540.0, 330.0);
    view.set_window(0.0, 540.0);

    view.handle_event(down(100.0, true));
    view.handle_event(mv(200.0));
    assert_eq!(view.rubber_band(), Some((100.0, 200.0)));
    view.handle_event(up(200.0));
    assert_eq!(view.rubber_band(), None);

    view.handle_event(down(100.0, false));
    view.handle_event(mv(50.0));
    let axis = view.context().x_axis().unwrap();
    assert_eq!((axis.start(), axis.end()), (50.0, 590.0));
}
