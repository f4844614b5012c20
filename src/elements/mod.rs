//! Chart elements that draw their base shape and then their error bars.

mod arc;
mod bar;
mod point;

pub use arc::ArcWithErrorBar;
pub use bar::BarWithErrorBar;
pub use point::PointWithErrorBar;

use crate::core::interpolate::{
    interpolate_color_option, interpolate_number, interpolate_number_option,
    interpolate_optional_range,
};
use crate::core::{ArcErrorBarProps, CartesianErrorBarProps, ErrorBarStyle, Interpolate};
use crate::error::ChartResult;
use crate::render::Canvas;

pub const BAR_WITH_ERROR_BAR: &str = "barWithErrorBar";
pub const POINT_WITH_ERROR_BAR: &str = "pointWithErrorBar";
pub const ARC_WITH_ERROR_BAR: &str = "arcWithErrorBar";

/// Capability of anything that paints itself onto a canvas.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas) -> ChartResult<()>;
}

/// Element produced by one of the error-bar controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBarElement {
    Bar(BarWithErrorBar),
    Point(PointWithErrorBar),
    Arc(ArcWithErrorBar),
}

impl ErrorBarElement {
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Bar(_) => BAR_WITH_ERROR_BAR,
            Self::Point(_) => POINT_WITH_ERROR_BAR,
            Self::Arc(_) => ARC_WITH_ERROR_BAR,
        }
    }

    /// Elements of gaps (missing or NaN data) are kept for index alignment
    /// but never drawn.
    #[must_use]
    pub fn skip(&self) -> bool {
        match self {
            Self::Bar(bar) => bar.skip,
            Self::Point(point) => point.skip,
            Self::Arc(arc) => arc.skip,
        }
    }

    /// Pixel center used by line datasets to connect points.
    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            Self::Bar(bar) => (bar.props.x, bar.props.y),
            Self::Point(point) => (point.props.x, point.props.y),
            Self::Arc(arc) => (arc.props.x, arc.props.y),
        }
    }
}

impl Drawable for ErrorBarElement {
    fn draw(&self, canvas: &mut dyn Canvas) -> ChartResult<()> {
        if self.skip() {
            return Ok(());
        }
        match self {
            Self::Bar(bar) => bar.draw(canvas),
            Self::Point(point) => point.draw(canvas),
            Self::Arc(arc) => arc.draw(canvas),
        }
    }
}

impl Interpolate for ErrorBarElement {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        match (self, to) {
            (Self::Bar(from), Self::Bar(to)) => Self::Bar(from.interpolate(to, factor)),
            (Self::Point(from), Self::Point(to)) => Self::Point(from.interpolate(to, factor)),
            (Self::Arc(from), Self::Arc(to)) => Self::Arc(from.interpolate(to, factor)),
            _ => to.clone(),
        }
    }
}

impl Interpolate for ErrorBarStyle {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        Self {
            line_width: interpolate_number_option(&self.line_width, &to.line_width, factor),
            color: interpolate_color_option(&self.color, &to.color, factor),
            whisker_line_width: interpolate_number_option(
                &self.whisker_line_width,
                &to.whisker_line_width,
                factor,
            ),
            whisker_ratio: interpolate_number_option(
                &self.whisker_ratio,
                &to.whisker_ratio,
                factor,
            ),
            whisker_size: interpolate_number_option(&self.whisker_size, &to.whisker_size, factor),
            whisker_color: interpolate_color_option(
                &self.whisker_color,
                &to.whisker_color,
                factor,
            ),
        }
    }
}

impl Interpolate for CartesianErrorBarProps {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        let optional = |from: Option<f64>, to: Option<f64>| match (from, to) {
            (Some(from), Some(to)) => Some(interpolate_number(from, to, factor)),
            _ => to,
        };
        Self {
            x: interpolate_number(self.x, to.x, factor),
            y: interpolate_number(self.y, to.y, factor),
            width: optional(self.width, to.width),
            height: optional(self.height, to.height),
            x_min: interpolate_optional_range(self.x_min.as_ref(), to.x_min.as_ref(), factor),
            x_max: interpolate_optional_range(self.x_max.as_ref(), to.x_max.as_ref(), factor),
            y_min: interpolate_optional_range(self.y_min.as_ref(), to.y_min.as_ref(), factor),
            y_max: interpolate_optional_range(self.y_max.as_ref(), to.y_max.as_ref(), factor),
        }
    }
}

impl Interpolate for ArcErrorBarProps {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        Self {
            x: interpolate_number(self.x, to.x, factor),
            y: interpolate_number(self.y, to.y, factor),
            start_angle: interpolate_number(self.start_angle, to.start_angle, factor),
            end_angle: interpolate_number(self.end_angle, to.end_angle, factor),
            outer_radius: interpolate_number(self.outer_radius, to.outer_radius, factor),
            r_min: interpolate_optional_range(self.r_min.as_ref(), to.r_min.as_ref(), factor),
            r_max: interpolate_optional_range(self.r_max.as_ref(), to.r_max.as_ref(), factor),
        }
    }
}
