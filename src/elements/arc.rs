use tracing::trace;

use crate::core::interpolate::{interpolate_color, interpolate_number};
use crate::core::{ArcErrorBarProps, ErrorBarStyle, Interpolate, render_error_bar_arc};
use crate::elements::Drawable;
use crate::error::ChartResult;
use crate::render::{Canvas, Color};

/// Polar-area slice with a radial error bar along its bisector.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcWithErrorBar {
    pub props: ArcErrorBarProps,
    pub inner_radius: f64,
    pub background_color: Color,
    pub error_bar: ErrorBarStyle,
    pub skip: bool,
}

impl ArcWithErrorBar {
    #[must_use]
    pub fn circumference(&self) -> f64 {
        self.props.end_angle - self.props.start_angle
    }
}

impl Drawable for ArcWithErrorBar {
    fn draw(&self, canvas: &mut dyn Canvas) -> ChartResult<()> {
        let props = &self.props;
        if self.circumference() > 0.0 && props.outer_radius > self.inner_radius {
            trace!(
                start = props.start_angle,
                end = props.end_angle,
                radius = props.outer_radius,
                "draw arc"
            );
            canvas.save();
            canvas.set_fill_color(self.background_color);
            let filled = canvas.fill_sector(
                props.x,
                props.y,
                self.inner_radius,
                props.outer_radius,
                props.start_angle,
                props.end_angle,
            );
            canvas.restore();
            filled?;
        }
        render_error_bar_arc(props, &self.error_bar, canvas)
    }
}

impl Interpolate for ArcWithErrorBar {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        Self {
            props: self.props.interpolate(&to.props, factor),
            inner_radius: interpolate_number(self.inner_radius, to.inner_radius, factor),
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
