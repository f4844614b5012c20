//! Error-bar geometry engine.
//!
//! Draws the range segment and whisker caps of one element through a
//! [`Canvas`]. Three layouts are supported: vertical (value axis Y),
//! horizontal (value axis X) and polar (value axis is the radius).
//! Every entry point saves the canvas state first and restores it on exit,
//! including when the canvas reports an error.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::range::{BarPairs, RangeValue, resolve_pairs};
use crate::core::style_option::StyleOption;
use crate::core::whisker::whisker_half_size;
use crate::error::ChartResult;
use crate::render::{Canvas, Color};

const FALLBACK_LINE_WIDTH: f64 = 1.0;
const FALLBACK_COLOR: Color = Color::rgba(44.0 / 255.0, 44.0 / 255.0, 44.0 / 255.0, 1.0);

/// Fully resolved error-bar style of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBarStyle {
    pub line_width: StyleOption<f64>,
    pub color: StyleOption<Color>,
    pub whisker_line_width: StyleOption<f64>,
    pub whisker_ratio: StyleOption<f64>,
    pub whisker_size: StyleOption<f64>,
    pub whisker_color: StyleOption<Color>,
}

impl Default for ErrorBarStyle {
    fn default() -> Self {
        let dark = Color::from_rgb8(0x1f, 0x1f, 0x1f);
        Self {
            line_width: StyleOption::cycling(vec![1.0, 3.0]),
            color: StyleOption::cycling(vec![FALLBACK_COLOR, dark]),
            whisker_line_width: StyleOption::cycling(vec![1.0, 3.0]),
            whisker_ratio: StyleOption::cycling(vec![0.2, 0.25]),
            whisker_size: StyleOption::cycling(vec![20.0, 24.0]),
            whisker_color: StyleOption::cycling(vec![FALLBACK_COLOR, dark]),
        }
    }
}

impl ErrorBarStyle {
    fn apply_line(&self, canvas: &mut (impl Canvas + ?Sized), index: usize) {
        canvas.set_line_width(self.line_width.resolve_or(index, FALLBACK_LINE_WIDTH));
        canvas.set_stroke_color(self.color.resolve_or(index, FALLBACK_COLOR));
    }

    fn apply_whisker(&self, canvas: &mut (impl Canvas + ?Sized), index: usize) {
        canvas.set_line_width(
            self.whisker_line_width
                .resolve_or(index, FALLBACK_LINE_WIDTH),
        );
        canvas.set_stroke_color(self.whisker_color.resolve_or(index, FALLBACK_COLOR));
    }
}

/// Pixel-space properties of a bar or point element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartesianErrorBarProps {
    pub x: f64,
    pub y: f64,
    /// Element footprint across a vertical error bar (bar width).
    pub width: Option<f64>,
    /// Element footprint across a horizontal error bar (bar height).
    pub height: Option<f64>,
    pub x_min: Option<RangeValue>,
    pub x_max: Option<RangeValue>,
    pub y_min: Option<RangeValue>,
    pub y_max: Option<RangeValue>,
}

/// Pixel-space properties of a polar arc element; ranges are radii.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcErrorBarProps {
    pub x: f64,
    pub y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub outer_radius: f64,
    pub r_min: Option<RangeValue>,
    pub r_max: Option<RangeValue>,
}

/// Draws horizontal and/or vertical error bars, depending on which ranges
/// are present. Both fire for points carrying X and Y ranges.
pub fn render_error_bar(
    props: &CartesianErrorBarProps,
    style: &ErrorBarStyle,
    canvas: &mut (impl Canvas + ?Sized),
) -> ChartResult<()> {
    if props.x_min.is_some() || props.x_max.is_some() {
        draw_error_bar_horizontal(
            props,
            props.x_min.as_ref(),
            props.x_max.as_ref(),
            style,
            canvas,
        )?;
    }
    if props.y_min.is_some() || props.y_max.is_some() {
        draw_error_bar_vertical(
            props,
            props.y_min.as_ref(),
            props.y_max.as_ref(),
            style,
            canvas,
        )?;
    }
    Ok(())
}

/// Draws the polar error bar when `rMin` or `rMax` is present.
pub fn render_error_bar_arc(
    props: &ArcErrorBarProps,
    style: &ErrorBarStyle,
    canvas: &mut (impl Canvas + ?Sized),
) -> ChartResult<()> {
    if props.r_min.is_none() && props.r_max.is_none() {
        return Ok(());
    }
    draw_error_bar_arc(
        props,
        props.r_min.as_ref(),
        props.r_max.as_ref(),
        style,
        canvas,
    )
}

/// Error bar along Y, centered on `props.x`. A missing side falls back to `props.y`.
pub fn draw_error_bar_vertical(
    props: &CartesianErrorBarProps,
    v_min: Option<&RangeValue>,
    v_max: Option<&RangeValue>,
    style: &ErrorBarStyle,
    canvas: &mut (impl Canvas + ?Sized),
) -> ChartResult<()> {
    let bars = resolve_with_fallback(v_min, v_max, props.y);
    trace!(x = props.x, bars = bars.len(), "draw vertical error bar");

    with_saved_state(canvas, |canvas| {
        canvas.translate(props.x, 0.0);
        for (index, &(low, high)) in bars.iter().enumerate().rev() {
            let half_width =
                whisker_half_size(props.width, &style.whisker_ratio, &style.whisker_size, index);

            style.apply_line(canvas, index);
            canvas.begin_path();
            canvas.move_to(0.0, low);
            canvas.line_to(0.0, high);
            canvas.stroke()?;

            style.apply_whisker(canvas, index);
            canvas.begin_path();
            canvas.move_to(-half_width, low);
            canvas.line_to(half_width, low);
            canvas.move_to(-half_width, high);
            canvas.line_to(half_width, high);
            canvas.stroke()?;
        }
        Ok(())
    })
}

/// Error bar along X, centered on `props.y`. A missing side falls back to `props.x`.
pub fn draw_error_bar_horizontal(
    props: &CartesianErrorBarProps,
    v_min: Option<&RangeValue>,
    v_max: Option<&RangeValue>,
    style: &ErrorBarStyle,
    canvas: &mut (impl Canvas + ?Sized),
) -> ChartResult<()> {
    let bars = resolve_with_fallback(v_min, v_max, props.x);
    trace!(y = props.y, bars = bars.len(), "draw horizontal error bar");

    with_saved_state(canvas, |canvas| {
        canvas.translate(0.0, props.y);
        for (index, &(low, high)) in bars.iter().enumerate().rev() {
            let half_height =
                whisker_half_size(props.height, &style.whisker_ratio, &style.whisker_size, index);

            style.apply_line(canvas, index);
            canvas.begin_path();
            canvas.move_to(low, 0.0);
            canvas.line_to(high, 0.0);
            canvas.stroke()?;

            style.apply_whisker(canvas, index);
            canvas.begin_path();
            canvas.move_to(low, -half_height);
            canvas.line_to(low, half_height);
            canvas.move_to(high, -half_height);
            canvas.line_to(high, half_height);
            canvas.stroke()?;
        }
        Ok(())
    })
}

/// Error bar along the bisector of an arc. Missing sides fall back to the
/// outer radius; whiskers always use the absolute size.
pub fn draw_error_bar_arc(
    props: &ArcErrorBarProps,
    v_min: Option<&RangeValue>,
    v_max: Option<&RangeValue>,
    style: &ErrorBarStyle,
    canvas: &mut (impl Canvas + ?Sized),
) -> ChartResult<()> {
    let angle = (props.start_angle + props.end_angle) / 2.0;
    let (sin, cos) = angle.sin_cos();
    let (normal_x, normal_y) = unit_normal(angle);
    let bars = resolve_with_fallback(v_min, v_max, props.outer_radius);
    trace!(angle, bars = bars.len(), "draw polar error bar");

    with_saved_state(canvas, |canvas| {
        canvas.translate(props.x, props.y);
        for (index, &(low, high)) in bars.iter().enumerate().rev() {
            let (min_x, min_y) = (low * cos, low * sin);
            let (max_x, max_y) = (high * cos, high * sin);
            let half = whisker_half_size(None, &style.whisker_ratio, &style.whisker_size, index);
            let (offset_x, offset_y) = (normal_x * half, normal_y * half);

            style.apply_line(canvas, index);
            canvas.begin_path();
            canvas.move_to(min_x, min_y);
            canvas.line_to(max_x, max_y);
            canvas.stroke()?;

            style.apply_whisker(canvas, index);
            canvas.begin_path();
            canvas.move_to(min_x + offset_x, min_y + offset_y);
            canvas.line_to(min_x - offset_x, min_y - offset_y);
            canvas.move_to(max_x + offset_x, max_y + offset_y);
            canvas.line_to(max_x - offset_x, max_y - offset_y);
            canvas.stroke()?;
        }
        Ok(())
    })
}

/// Unit vector perpendicular to the radial direction at `angle`.
#[must_use]
pub fn unit_normal(angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    let (x, y) = (-sin, cos);
    let length = x.hypot(y);
    (x / length, y / length)
}

fn resolve_with_fallback(
    v_min: Option<&RangeValue>,
    v_max: Option<&RangeValue>,
    fallback: f64,
) -> BarPairs {
    let fallback = RangeValue::Single(fallback);
    resolve_pairs(v_min.unwrap_or(&fallback), v_max.unwrap_or(&fallback))
}

fn with_saved_state<C: Canvas + ?Sized>(
    canvas: &mut C,
    draw: impl FnOnce(&mut C) -> ChartResult<()>,
) -> ChartResult<()> {
    canvas.save();
    let result = draw(canvas);
    canvas.restore();
    result
}

#[cfg(test)]
mod tests {
    use super::{
        ArcErrorBarProps, CartesianErrorBarProps, ErrorBarStyle, render_error_bar,
        render_error_bar_arc, unit_normal,
    };
    use crate::core::Viewport;
    use crate::core::range::RangeValue;
    use crate::core::style_option::StyleOption;
    use crate::render::{Color, FrameCanvas};

    fn flat_style() -> ErrorBarStyle {
        ErrorBarStyle {
            line_width: StyleOption::Fixed(1.0),
            color: StyleOption::Fixed(Color::rgb(0.0, 0.0, 0.0)),
            whisker_line_width: StyleOption::Fixed(2.0),
            whisker_ratio: StyleOption::Fixed(0.0),
            whisker_size: StyleOption::Fixed(10.0),
            whisker_color: StyleOption::Fixed(Color::rgb(1.0, 0.0, 0.0)),
        }
    }

    #[test]
    fn vertical_bar_emits_segment_then_two_caps() {
        let mut canvas = FrameCanvas::new(Viewport::new(200, 200));
        let props = CartesianErrorBarProps {
            x: 50.0,
            y: 40.0,
            y_min: Some(RangeValue::Single(80.0)),
            y_max: Some(RangeValue::Single(20.0)),
            ..CartesianErrorBarProps::default()
        };
        render_error_bar(&props, &flat_style(), &mut canvas).expect("render");

        assert_eq!(canvas.state_depth(), 0);
        let lines = canvas.into_frame().lines;
        assert_eq!(lines.len(), 3);
        assert_eq!((lines[0].x1, lines[0].y1, lines[0].x2, lines[0].y2), (50.0, 80.0, 50.0, 20.0));
        assert_eq!((lines[1].x1, lines[1].x2, lines[1].y1), (45.0, 55.0, 80.0));
        assert_eq!((lines[2].x1, lines[2].x2, lines[2].y1), (45.0, 55.0, 20.0));
        assert_eq!(lines[1].stroke_width, 2.0);
    }

    #[test]
    fn missing_side_falls_back_to_primary_value() {
        let mut canvas = FrameCanvas::new(Viewport::new(200, 200));
        let props = CartesianErrorBarProps {
            x: 10.0,
            y: 40.0,
            y_max: Some(RangeValue::Single(15.0)),
            ..CartesianErrorBarProps::default()
        };
        render_error_bar(&props, &flat_style(), &mut canvas).expect("render");
        let lines = canvas.into_frame().lines;
        assert_eq!((lines[0].y1, lines[0].y2), (40.0, 15.0));
    }

    #[test]
    fn stacked_bars_draw_back_to_front() {
        let mut canvas = FrameCanvas::new(Viewport::new(200, 200));
        let props = CartesianErrorBarProps {
            x: 10.0,
            y: 50.0,
            y_min: Some(RangeValue::Multi(vec![60.0, 90.0])),
            y_max: Some(RangeValue::Multi(vec![40.0, 10.0])),
            ..CartesianErrorBarProps::default()
        };
        let style = ErrorBarStyle {
            line_width: StyleOption::cycling(vec![1.0, 3.0]),
            ..flat_style()
        };
        render_error_bar(&props, &style, &mut canvas).expect("render");
        let lines = canvas.into_frame().lines;
        assert_eq!(lines.len(), 6);
        assert_eq!((lines[0].y1, lines[0].stroke_width), (90.0, 3.0));
        assert_eq!((lines[3].y1, lines[3].stroke_width), (60.0, 1.0));
    }

    #[test]
    fn polar_whiskers_are_perpendicular_to_bisector() {
        let mut canvas = FrameCanvas::new(Viewport::new(200, 200));
        let props = ArcErrorBarProps {
            x: 100.0,
            y: 100.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
            outer_radius: 40.0,
            r_min: Some(RangeValue::Single(10.0)),
            r_max: Some(RangeValue::Single(60.0)),
        };
        render_error_bar_arc(&props, &flat_style(), &mut canvas).expect("render");
        let lines = canvas.into_frame().lines;
        assert_eq!(lines.len(), 3);

        let main = lines[0];
        let (dx, dy) = (main.x2 - main.x1, main.y2 - main.y1);
        assert!((dx - dy).abs() < 1e-9, "segment follows the 45° bisector");
        assert!((main.length() - 50.0).abs() < 1e-9);

        for cap in &lines[1..] {
            let (cx, cy) = (cap.x2 - cap.x1, cap.y2 - cap.y1);
            assert!((cx * dx + cy * dy).abs() < 1e-9);
            assert!((cap.length() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn arc_without_ranges_draws_nothing() {
        let mut canvas = FrameCanvas::new(Viewport::new(200, 200));
        let props = ArcErrorBarProps {
            outer_radius: 10.0,
            ..ArcErrorBarProps::default()
        };
        render_error_bar_arc(&props, &flat_style(), &mut canvas).expect("render");
        assert!(canvas.frame().is_empty());
    }

    #[test]
    fn unit_normal_is_normalized() {
        let (x, y) = unit_normal(1.234);
        assert!((x.hypot(y) - 1.0).abs() < 1e-12);
    }
}
