use usage_charts::coordinate_space::CoordinateSpace;
use usage_charts::data_types::{AxisDataType, AxisPosition, ValueFormat};
use usage_charts::gutter_manager::GutterManager;
use usage_charts::scales::{tick_step, ChartScale};

#[test]
fn test_horizontal_axis_mapping() {
    let mut axis = CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time).with_range(1000.0, 1600.0);
    axis.set_pixel_size(300.0);
    assert_eq!(axis.canvas_to_plot_ratio(), 2.0);
    assert_eq!(axis.plot_to_canvas_ratio(), 0.5);
    assert_eq!(axis.get_canvas_coordinate(1300.0), 150.0);
    assert_eq!(axis.get_plot_coordinate(150.0), 1300.0);
}

#[test]
fn test_vertical_axis_grows_upwards() {
    let mut axis = CoordinateSpace::new("value", AxisPosition::Left, AxisDataType::Numeric).with_range(0.0, 100.0);
    axis.set_pixel_size(200.0);
    assert_eq!(axis.get_canvas_coordinate(0.0), 200.0);
    assert_eq!(axis.get_canvas_coordinate(100.0), 0.0);
    assert_eq!(axis.get_canvas_coordinate(25.0), 150.0);
    assert_eq!(axis.get_plot_coordinate(150.0), 25.0);
}

#[test]
fn test_time_axis_degenerate_span_is_widened() {
    let mut axis = CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time);
    axis.set_range(100.0, 100.0);
    assert_eq!((axis.start(), axis.end()), (100.0, 160.0));

    axis.set_range(200.0, 100.0);
    assert_eq!((axis.start(), axis.end()), (200.0, 260.0));

    axis.set_range(0.0, 30.0);
    assert_eq!(axis.span(), 60.0);
}

#[test]
fn test_numeric_axis_zero_span_is_centered() {
    let mut axis = CoordinateSpace::new("value", AxisPosition::Left, AxisDataType::Numeric);
    axis.set_range(5.0, 5.0);
    assert_eq!((axis.start(), axis.end()), (4.5, 5.5));
}

#[test]
fn test_non_finite_range_is_ignored() {
    let mut axis = CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time).with_range(0.0, 600.0);
    axis.set_range(f64::NAN, 10.0);
    assert_eq!((axis.start(), axis.end()), (0.0, 600.0));
}

#[test]
fn test_zero_pixel_size_has_zero_ratio() {
    let axis = CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time).with_range(0.0, 600.0);
    assert_eq!(axis.canvas_to_plot_ratio(), 0.0);
    assert_eq!(axis.snapshot().ratio, 0.0);
}

#[test]
fn test_snapshot_freezes_range() {
    let mut axis = CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time).with_range(0.0, 600.0);
    axis.set_pixel_size(600.0);
    let snapshot = axis.snapshot();
    axis.set_range(100.0, 200.0);
    assert_eq!(snapshot.start, 0.0);
    assert_eq!(snapshot.end, 600.0);
    assert_eq!(snapshot.ratio, 1.0);
}

#[test]
fn test_gutters_sum_axis_sizes() {
    let axes = vec![
        CoordinateSpace::new("time", AxisPosition::Bottom, AxisDataType::Time).with_size(30.0),
        CoordinateSpace::new("a", AxisPosition::Left, AxisDataType::Numeric).with_size(60.0),
        CoordinateSpace::new("b", AxisPosition::Left, AxisDataType::Numeric).with_size(40.0),
        CoordinateSpace::new("c", AxisPosition::Right, AxisDataType::Numeric).with_size(50.0),
    ];
    let g = GutterManager::calculate(&axes);
    assert_eq!(g.left, 100.0);
    assert_eq!(g.right, 50.0);
    assert_eq!(g.top, 0.0);
    assert_eq!(g.bottom, 30.0);
}

#[test]
fn test_scale_map_invert() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.invert(250.0), 50.0);
}

#[test]
fn test_scale_zero_domain_is_widened() {
    let scale = ChartScale::new_linear((3.0, 3.0), (0.0, 100.0));
    assert_eq!(scale.domain(), (2.5, 3.5));
    assert_eq!(scale.map(3.0), 50.0);
}

#[test]
fn test_scale_nice_and_ticks() {
    let scale = ChartScale::new_linear((0.0, 97.0), (0.0, 100.0));
    assert_eq!(tick_step(0.0, 97.0, 5), 20.0);
    assert_eq!(scale.nice(5), (0.0, 100.0));

    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 100.0));
    assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
}

#[test]
fn test_scale_tick_labels_follow_format() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 100.0));
    assert_eq!(scale.format_tick(50.0, ValueFormat::Percent), "50.0%");
    assert_eq!(scale.format_tick(2048.0, ValueFormat::Bytes), "2.0 KiB");
    assert_eq!(scale.format_tick(1.5, ValueFormat::Load), "1.50");
}
