use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use crate::api::ChartOptions;
use crate::controllers::tooltip::{TooltipItem, polar_label};
use crate::controllers::{
    AxisSetup, ChartController, DataParser, ElementUpdater, ParseContext, ScaleLayout,
    ScaleRangeExtender, TooltipLabeler, UpdateContext, calculate_polar_scale,
};
use crate::core::{
    ArcErrorBarProps, Axis, DataValue, ParsedPoint, ScaleKind, extrema_min_max,
    parse_error_number_data,
};
use crate::elements::{ARC_WITH_ERROR_BAR, ArcWithErrorBar, ErrorBarElement};
use crate::error::ChartResult;
use crate::render::Color;

const START_ANGLE: f64 = -FRAC_PI_2;
const DEFAULT_BACKGROUND: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

/// `polarAreaWithErrorBars`: equal-angle slices whose radius encodes the
/// value, with radial error ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarAreaWithErrorBarsController;

impl PolarAreaWithErrorBarsController {
    /// Slices that take up angle: a value is present and the index is shown.
    #[must_use]
    pub fn count_visible_elements(
        parsed: &[ParsedPoint],
        data_visible: &dyn Fn(usize) -> bool,
    ) -> usize {
        parsed
            .iter()
            .enumerate()
            .filter(|(i, point)| !point.r.is_nan() && data_visible(*i))
            .count()
    }
}

impl DataParser for PolarAreaWithErrorBarsController {
    fn parse(
        &self,
        data: &[Option<DataValue>],
        _context: &ParseContext<'_>,
    ) -> ChartResult<Vec<ParsedPoint>> {
        let mut parsed: Vec<ParsedPoint> = data
            .iter()
            .map(|entry| {
                let r = match entry {
                    Some(DataValue::Number(value)) => *value,
                    Some(DataValue::Point(datum)) => datum.r.unwrap_or(f64::NAN),
                    None => f64::NAN,
                };
                let r = if r.is_finite() { r } else { f64::NAN };
                let mut point = ParsedPoint::default();
                point.set_value(Axis::R, r);
                point
            })
            .collect();
        parse_error_number_data(&mut parsed, Axis::R, data, 0);
        Ok(parsed)
    }
}

impl ScaleRangeExtender for PolarAreaWithErrorBarsController {
    fn min_max(
        &self,
        parsed: &[ParsedPoint],
        axis: Axis,
        data_visible: &dyn Fn(usize) -> bool,
    ) -> Option<(f64, f64)> {
        extrema_min_max(parsed, axis, data_visible)
    }
}

impl ElementUpdater for PolarAreaWithErrorBarsController {
    fn update_elements(&self, context: &UpdateContext<'_>) -> ChartResult<Vec<ErrorBarElement>> {
        let scale = context.scales.radial()?;
        let (center_x, center_y) = scale.center();
        let reset = context.is_reset();
        let animation = context.options.animation;
        let background_color = context
            .dataset
            .background_color
            .unwrap_or(DEFAULT_BACKGROUND);

        let visible_count = Self::count_visible_elements(context.parsed, context.data_visible);
        let slice_angle = if visible_count > 0 {
            TAU / visible_count as f64
        } else {
            0.0
        };

        let mut angle = START_ANGLE;
        let mut elements = Vec::with_capacity(context.parsed.len());
        for (i, point) in context.parsed.iter().enumerate() {
            let shown = !point.r.is_nan() && (context.data_visible)(i);
            let mut start_angle = angle;
            let mut end_angle = angle + if shown { slice_angle } else { 0.0 };
            angle = end_angle;

            let mut outer_radius = if shown {
                scale.distance_for_value(point.r)?
            } else {
                0.0
            };
            if reset {
                if animation.animate_scale {
                    outer_radius = 0.0;
                }
                if animation.animate_rotate {
                    start_angle = START_ANGLE;
                    end_angle = START_ANGLE;
                }
            }
            let (r_min, r_max) =
                calculate_polar_scale(point, scale, reset, animation.animate_scale)?;

            elements.push(ErrorBarElement::Arc(ArcWithErrorBar {
                props: ArcErrorBarProps {
                    x: center_x,
                    y: center_y,
                    start_angle,
                    end_angle,
                    outer_radius,
                    r_min,
                    r_max,
                },
                inner_radius: 0.0,
                background_color,
                error_bar: context.style_for(i),
                skip: !shown,
            }));
        }

        debug!(
            dataset = context.dataset_index,
            elements = elements.len(),
            visible = visible_count,
            "polar area elements updated"
        );
        Ok(elements)
    }
}

impl TooltipLabeler for PolarAreaWithErrorBarsController {
    fn tooltip_label(&self, item: &TooltipItem<'_>) -> String {
        polar_label(item)
    }
}

impl ChartController for PolarAreaWithErrorBarsController {
    fn id(&self) -> &'static str {
        "polarAreaWithErrorBars"
    }

    fn element_id(&self) -> &'static str {
        ARC_WITH_ERROR_BAR
    }

    fn scale_layout(&self, _options: &ChartOptions) -> ScaleLayout {
        ScaleLayout::Radial(AxisSetup::new(Axis::R, ScaleKind::RadialLinear).begin_at_zero())
    }
}
