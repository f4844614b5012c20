use std::f64::consts::TAU;

use crate::core::interpolate::{interpolate_color, interpolate_number};
use crate::core::{CartesianErrorBarProps, ErrorBarStyle, Interpolate, render_error_bar};
use crate::elements::Drawable;
use crate::error::ChartResult;
use crate::render::{Canvas, Color};

/// Filled circle with error bars. Points report no width or height, so
/// their whiskers use the absolute `whisker_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointWithErrorBar {
    pub props: CartesianErrorBarProps,
    pub radius: f64,
    pub background_color: Color,
    pub error_bar: ErrorBarStyle,
    pub skip: bool,
}

impl Drawable for PointWithErrorBar {
    fn draw(&self, canvas: &mut dyn Canvas) -> ChartResult<()> {
        if self.radius > 0.0 {
            canvas.save();
            canvas.set_fill_color(self.background_color);
            let filled =
                canvas.fill_sector(self.props.x, self.props.y, 0.0, self.radius, 0.0, TAU);
            canvas.restore();
            filled?;
        }
        render_error_bar(&self.props, &self.error_bar, canvas)
    }
}

impl Interpolate for PointWithErrorBar {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        Self {
            props: self.props.interpolate(&to.props, factor),
            radius: interpolate_number(self.radius, to.radius, factor),
            background_color: interpolate_color(
                Some(self.background_color),
                Some(to.background_color),
                factor,
            ),
            error_bar: self.error_bar.interpolate(&to.error_bar, factor),
            skip: to.skip,
        }
    }
}
