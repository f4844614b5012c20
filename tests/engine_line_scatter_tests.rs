use approx::assert_abs_diff_eq;
use chart_error_bars::api::{ChartConfig, ChartEngine, ChartEngineConfig, DatasetConfig};
use chart_error_bars::core::{Axis, DataValue, ErrorBarDatum, RangeValue, Viewport};
use chart_error_bars::elements::{ErrorBarElement, PointWithErrorBar};
use chart_error_bars::render::NullRenderer;

fn engine(chart: ChartConfig) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(400, 300), chart);
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn points(engine: &ChartEngine<NullRenderer>, dataset: usize) -> Vec<PointWithErrorBar> {
    engine
        .elements(dataset)
        .expect("dataset")
        .iter()
        .map(|element| match element {
            ErrorBarElement::Point(point) => point.clone(),
            other => panic!("unexpected element {other:?}"),
        })
        .collect()
}

fn line_chart() -> ChartConfig {
    ChartConfig::new("lineWithErrorBars")
        .with_labels(["A", "B", "C"])
        .with_dataset(DatasetConfig::new([
            DataValue::from(ErrorBarDatum::y(4.0, 1.0, 6.0)),
            DataValue::from(2.0),
            DataValue::from(ErrorBarDatum::y(3.0, 2.5, 3.5)),
        ]))
}

#[test]
fn line_points_sit_on_category_positions() {
    let engine = engine(line_chart());
    assert_eq!(engine.scale_domain(Axis::Y), Some((1.0, 6.0)));

    let points = points(&engine, 0);
    assert_eq!(points[0].props.x, 0.0);
    assert_eq!(points[1].props.x, 200.0);
    assert_eq!(points[2].props.x, 400.0);
    // y scale 1..6 onto 300..0
    assert_abs_diff_eq!(points[0].props.y, 120.0, epsilon = 1e-9);
    assert_eq!(points[0].props.y_min, Some(RangeValue::Single(300.0)));
    assert_eq!(points[0].props.width, None);
    assert_eq!(points[0].radius, 3.0);
}

#[test]
fn line_frame_draws_connection_then_points() {
    let engine = engine(line_chart());
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.arcs.len(), 3);
    // two connecting segments, then three lines per ranged point
    assert_eq!(frame.lines.len(), 2 + 3 + 3);
    assert_eq!(frame.lines[0].stroke_width, 3.0);
    assert_abs_diff_eq!(frame.lines[0].x1, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(frame.lines[1].x2, 400.0, epsilon = 1e-9);

    // point caps use the absolute whisker size: 20 / 2
    let cap = frame.lines[3];
    assert_abs_diff_eq!(cap.x1, -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cap.x2, 10.0, epsilon = 1e-9);
}

#[test]
fn gaps_break_the_connecting_line() {
    let mut dataset = DatasetConfig::new([4.0, 3.0, 5.0]);
    dataset.data.insert(1, None);
    let chart = ChartConfig::new("lineWithErrorBars")
        .with_labels(["A", "B", "C", "D"])
        .with_dataset(dataset);
    let engine = engine(chart);
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.arcs.len(), 3);
    assert_eq!(frame.lines.len(), 1);
}

#[test]
fn show_line_false_draws_points_only() {
    let mut chart = line_chart();
    chart.data.datasets[0].show_line = Some(false);
    let engine = engine(chart);
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.lines.len(), 6);
}

fn scatter_chart() -> ChartConfig {
    ChartConfig::new("scatterWithErrorBars").with_dataset(DatasetConfig::new([
        ErrorBarDatum::y(2.0, 1.0, 3.0).with_x(1.0, 0.5, 1.5),
        ErrorBarDatum::y(4.0, 3.5, 6.0).with_x(3.0, 2.0, 5.0),
    ]))
}

#[test]
fn scatter_scales_cover_both_axes() {
    let engine = engine(scatter_chart());
    assert_eq!(engine.scale_domain(Axis::X), Some((0.5, 5.0)));
    assert_eq!(engine.scale_domain(Axis::Y), Some((1.0, 6.0)));

    let points = points(&engine, 0);
    assert_eq!(points[0].props.x_min, Some(RangeValue::Single(0.0)));
    assert_eq!(points[1].props.x_max, Some(RangeValue::Single(400.0)));
    assert_eq!(points[1].props.y_max, Some(RangeValue::Single(0.0)));
}

#[test]
fn scatter_draws_both_bars_without_a_connecting_line() {
    let mut engine = engine(scatter_chart());
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.arcs.len(), 2);
    assert_eq!(frame.lines.len(), 12);

    // horizontal bar of the first point runs along its y
    let horizontal = frame.lines[0];
    assert_eq!(horizontal.y1, horizontal.y2);
    // the vertical bar of the same point follows at its x
    let vertical = frame.lines[3];
    assert_eq!(vertical.x1, vertical.x2);

    engine.render().expect("render");
    assert_eq!(engine.renderer().last_line_count, 12);
}

#[test]
fn scatter_show_line_connects_points() {
    let mut chart = scatter_chart();
    chart.data.datasets[0].show_line = Some(true);
    let engine = engine(chart);
    assert_eq!(engine.build_render_frame().expect("frame").lines.len(), 13);
}

#[test]
fn later_datasets_are_painted_first() {
    let chart = scatter_chart().with_dataset(DatasetConfig::new([
        ErrorBarDatum::y(5.0, 4.0, 6.0).with_x(2.0, 1.0, 3.0),
    ]));
    let engine = engine(chart);
    let frame = engine.build_render_frame().expect("frame");

    let last_point = points(&engine, 1)[0].clone();
    assert_eq!(frame.arcs[0].center_x, last_point.props.x);
    assert_eq!(frame.arcs[0].center_y, last_point.props.y);
}
