use tracing::trace;

use crate::core::interpolate::{interpolate_color, interpolate_number};
use crate::core::{CartesianErrorBarProps, ErrorBarStyle, Interpolate, render_error_bar};
use crate::elements::Drawable;
use crate::error::ChartResult;
use crate::render::{Canvas, Color};

/// Bar growing from `base` to the value pixel, with error bars on top.
///
/// For vertical bars `props.x` is the bar center and `props.y` the value
/// pixel; horizontal bars swap the two.
#[derive(Debug, Clone, PartialEq)]
pub struct BarWithErrorBar {
    pub props: CartesianErrorBarProps,
    pub base: f64,
    pub horizontal: bool,
    pub background_color: Color,
    pub error_bar: ErrorBarStyle,
    pub skip: bool,
}

impl BarWithErrorBar {
    /// Pixel rectangle `(x, y, width, height)` of the bar body.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let CartesianErrorBarProps {
            x, y, width, height, ..
        } = self.props;
        if self.horizontal {
            let thickness = height.unwrap_or(0.0);
            (x.min(self.base), y - thickness / 2.0, (self.base - x).abs(), thickness)
        } else {
            let thickness = width.unwrap_or(0.0);
            (x - thickness / 2.0, y.min(self.base), thickness, (self.base - y).abs())
        }
    }
}

impl Drawable for BarWithErrorBar {
    fn draw(&self, canvas: &mut dyn Canvas) -> ChartResult<()> {
        let (x, y, width, height) = self.bounds();
        trace!(x, y, width, height, horizontal = self.horizontal, "draw bar");
        if width > 0.0 && height > 0.0 {
            canvas.save();
            canvas.set_fill_color(self.background_color);
            let filled = canvas.fill_rect(x, y, width, height);
            canvas.restore();
            filled?;
        }
        render_error_bar(&self.props, &self.error_bar, canvas)
    }
}

impl Interpolate for BarWithErrorBar {
    fn interpolate(&self, to: &Self, factor: f64) -> Self {
        Self {
            props: self.props.interpolate(&to.props, factor),
            base: interpolate_number(self.base, to.base, factor),
            horizontal: to.horizontal,
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
