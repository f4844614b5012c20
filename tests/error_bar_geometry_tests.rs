use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_abs_diff_eq;
use chart_error_bars::core::{
    ArcErrorBarProps, CartesianErrorBarProps, ErrorBarStyle, RangeValue, StyleOption, Viewport,
    render_error_bar, render_error_bar_arc,
};
use chart_error_bars::elements::{Drawable, PointWithErrorBar};
use chart_error_bars::render::{CanvasState, Color, FrameCanvas, LinePrimitive};

fn canvas() -> FrameCanvas {
    FrameCanvas::new(Viewport::new(400, 400))
}

fn flat_style() -> ErrorBarStyle {
    ErrorBarStyle {
        line_width: StyleOption::Fixed(2.0),
        color: StyleOption::Fixed(Color::rgb(0.2, 0.2, 0.2)),
        whisker_line_width: StyleOption::Fixed(1.0),
        whisker_ratio: StyleOption::Fixed(0.25),
        whisker_size: StyleOption::Fixed(24.0),
        whisker_color: StyleOption::Fixed(Color::rgb(0.4, 0.4, 0.4)),
    }
}

fn assert_segment(line: &LinePrimitive, from: (f64, f64), to: (f64, f64)) {
    assert_abs_diff_eq!(line.x1, from.0, epsilon = 1e-9);
    assert_abs_diff_eq!(line.y1, from.1, epsilon = 1e-9);
    assert_abs_diff_eq!(line.x2, to.0, epsilon = 1e-9);
    assert_abs_diff_eq!(line.y2, to.1, epsilon = 1e-9);
}

#[test]
fn vertical_bar_draws_main_segment_and_two_caps() {
    // y = 4 with range 1..6 on a 0..10 scale mapped to 200..0
    let pixel = |value: f64| 200.0 - value * 20.0;
    let props = CartesianErrorBarProps {
        x: 50.0,
        y: pixel(4.0),
        width: Some(20.0),
        y_min: Some(RangeValue::Single(pixel(1.0))),
        y_max: Some(RangeValue::Single(pixel(6.0))),
        ..CartesianErrorBarProps::default()
    };
    let mut canvas = canvas();
    render_error_bar(&props, &flat_style(), &mut canvas).expect("render");
    let frame = canvas.into_frame();

    assert_eq!(frame.lines.len(), 3);
    assert_segment(&frame.lines[0], (50.0, pixel(1.0)), (50.0, pixel(6.0)));
    assert_eq!(frame.lines[0].stroke_width, 2.0);
    // 20 * 0.25 * 0.5
    assert_segment(&frame.lines[1], (47.5, pixel(1.0)), (52.5, pixel(1.0)));
    assert_segment(&frame.lines[2], (47.5, pixel(6.0)), (52.5, pixel(6.0)));
    assert_eq!(frame.lines[1].color, Color::rgb(0.4, 0.4, 0.4));
}

#[test]
fn missing_side_falls_back_to_the_element_value() {
    let props = CartesianErrorBarProps {
        x: 10.0,
        y: 80.0,
        width: Some(40.0),
        y_max: Some(RangeValue::Single(20.0)),
        ..CartesianErrorBarProps::default()
    };
    let mut canvas = canvas();
    render_error_bar(&props, &flat_style(), &mut canvas).expect("render");
    let frame = canvas.into_frame();

    assert_segment(&frame.lines[0], (10.0, 80.0), (10.0, 20.0));
}

#[test]
fn stacked_ranges_paint_outermost_first() {
    let props = CartesianErrorBarProps {
        x: 0.0,
        y: 50.0,
        width: Some(20.0),
        y_min: Some(RangeValue::Multi(vec![60.0, 70.0])),
        y_max: Some(RangeValue::Multi(vec![40.0, 30.0])),
        ..CartesianErrorBarProps::default()
    };
    let mut canvas = canvas();
    render_error_bar(&props, &ErrorBarStyle::default(), &mut canvas).expect("render");
    let frame = canvas.into_frame();

    assert_eq!(frame.lines.len(), 6);
    assert_segment(&frame.lines[0], (0.0, 70.0), (0.0, 30.0));
    assert_eq!(frame.lines[0].stroke_width, 3.0);
    assert_segment(&frame.lines[3], (0.0, 60.0), (0.0, 40.0));
    assert_eq!(frame.lines[3].stroke_width, 1.0);
}

#[test]
fn polar_bar_follows_the_bisector_with_perpendicular_caps() {
    let props = ArcErrorBarProps {
        x: 200.0,
        y: 200.0,
        start_angle: 0.0,
        end_angle: FRAC_PI_2,
        outer_radius: 40.0,
        r_min: Some(RangeValue::Single(10.0)),
        r_max: Some(RangeValue::Single(60.0)),
    };
    let mut canvas = canvas();
    render_error_bar_arc(&props, &flat_style(), &mut canvas).expect("render");
    let frame = canvas.into_frame();
    assert_eq!(frame.lines.len(), 3);

    let (sin, cos) = FRAC_PI_4.sin_cos();
    let main = frame.lines[0];
    assert_segment(
        &main,
        (200.0 + 10.0 * cos, 200.0 + 10.0 * sin),
        (200.0 + 60.0 * cos, 200.0 + 60.0 * sin),
    );

    let direction = (main.x2 - main.x1, main.y2 - main.y1);
    for cap in &frame.lines[1..] {
        let cap_direction = (cap.x2 - cap.x1, cap.y2 - cap.y1);
        let dot = direction.0 * cap_direction.0 + direction.1 * cap_direction.1;
        assert_abs_diff_eq!(dot, 0.0, epsilon = 1e-9);
        // polar caps ignore the ratio and use the absolute size
        assert_abs_diff_eq!(cap.length(), 24.0, epsilon = 1e-9);
    }
    let cap_center = (
        (frame.lines[1].x1 + frame.lines[1].x2) / 2.0,
        (frame.lines[1].y1 + frame.lines[1].y2) / 2.0,
    );
    assert_abs_diff_eq!(cap_center.0, main.x1, epsilon = 1e-9);
    assert_abs_diff_eq!(cap_center.1, main.y1, epsilon = 1e-9);
}

#[test]
fn arc_without_ranges_draws_nothing() {
    let props = ArcErrorBarProps {
        outer_radius: 40.0,
        end_angle: FRAC_PI_2,
        ..ArcErrorBarProps::default()
    };
    let mut canvas = canvas();
    render_error_bar_arc(&props, &flat_style(), &mut canvas).expect("render");
    assert!(canvas.into_frame().is_empty());
}

#[test]
fn point_with_both_axes_draws_two_independent_bars_without_state_leak() {
    let point = PointWithErrorBar {
        props: CartesianErrorBarProps {
            x: 100.0,
            y: 150.0,
            x_min: Some(RangeValue::Single(80.0)),
            x_max: Some(RangeValue::Single(130.0)),
            y_min: Some(RangeValue::Single(170.0)),
            y_max: Some(RangeValue::Single(120.0)),
            ..CartesianErrorBarProps::default()
        },
        radius: 3.0,
        background_color: Color::rgb(1.0, 0.0, 0.0),
        error_bar: flat_style(),
        skip: false,
    };
    let mut canvas = canvas();
    point.draw(&mut canvas).expect("draw");

    assert_eq!(canvas.state_depth(), 0);
    assert_eq!(canvas.state(), CanvasState::default());

    let frame = canvas.into_frame();
    assert_eq!(frame.arcs.len(), 1);
    assert_eq!(frame.lines.len(), 6);

    // horizontal bar first, centered on the point's y
    assert_segment(&frame.lines[0], (80.0, 150.0), (130.0, 150.0));
    // points have no extent, so caps use whisker_size: 24 / 2
    assert_segment(&frame.lines[1], (80.0, 138.0), (80.0, 162.0));
    // vertical bar sees no translation left over from the horizontal one
    assert_segment(&frame.lines[3], (100.0, 170.0), (100.0, 120.0));
    assert_segment(&frame.lines[4], (88.0, 170.0), (112.0, 170.0));
}

#[test]
fn zero_line_width_skips_the_stroke() {
    let style = ErrorBarStyle {
        line_width: StyleOption::Fixed(0.0),
        ..flat_style()
    };
    let props = CartesianErrorBarProps {
        x: 10.0,
        y: 50.0,
        width: Some(20.0),
        y_min: Some(RangeValue::Single(60.0)),
        y_max: Some(RangeValue::Single(40.0)),
        ..CartesianErrorBarProps::default()
    };
    let mut canvas = canvas();
    render_error_bar(&props, &style, &mut canvas).expect("render");
    let frame = canvas.into_frame();

    // caps only
    assert_eq!(frame.lines.len(), 2);
    assert!(frame.lines.iter().all(|line| line.y1 == line.y2));
}
