use tracing::debug;

use crate::api::{ChartOptions, DatasetConfig};
use crate::controllers::tooltip::{TooltipItem, bar_label};
use crate::controllers::{
    AxisSetup, ChartController, DataParser, ElementUpdater, ParseContext, ScaleLayout,
    ScaleRangeExtender, TooltipLabeler, UpdateContext, calculate_scale, parse_cartesian,
    value_pixel,
};
use crate::core::{Axis, CartesianErrorBarProps, DataValue, ParsedPoint, RangeValue, ScaleKind};
use crate::elements::{Drawable, ErrorBarElement, POINT_WITH_ERROR_BAR, PointWithErrorBar};
use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, Color};

pub(crate) const DEFAULT_POINT_RADIUS: f64 = 3.0;
pub(crate) const DEFAULT_BORDER_WIDTH: f64 = 3.0;
pub(crate) const DEFAULT_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

/// `lineWithErrorBars`: connected points with value-axis error ranges, plus
/// index-axis ranges when the index scale is numeric.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineWithErrorBarsController;

impl DataParser for LineWithErrorBarsController {
    fn parse(
        &self,
        data: &[Option<DataValue>],
        context: &ParseContext<'_>,
    ) -> ChartResult<Vec<ParsedPoint>> {
        parse_cartesian(data, context)
    }
}

impl ScaleRangeExtender for LineWithErrorBarsController {}

impl ElementUpdater for LineWithErrorBarsController {
    fn update_elements(&self, context: &UpdateContext<'_>) -> ChartResult<Vec<ErrorBarElement>> {
        let ScaleLayout::Cartesian { index, value } = context.layout else {
            return Err(ChartError::InvalidData(
                "line chart requires a cartesian layout".to_owned(),
            ));
        };
        let index_scale = context.scales.cartesian(index.axis)?;
        let value_scale = context.scales.cartesian(value.axis)?;
        let reset = context.is_reset();
        let elements = update_points(context, index.axis, value.axis, |point| {
            let mut ranges = vec![(value.axis, calculate_scale(point, value_scale, reset)?)];
            if index.kind.is_numeric() {
                ranges.push((index.axis, calculate_scale(point, index_scale, reset)?));
            }
            Ok(ranges)
        })?;

        debug!(
            dataset = context.dataset_index,
            elements = elements.len(),
            "line elements updated"
        );
        Ok(elements)
    }
}

impl TooltipLabeler for LineWithErrorBarsController {
    fn tooltip_label(&self, item: &TooltipItem<'_>) -> String {
        bar_label(item)
    }
}

impl ChartController for LineWithErrorBarsController {
    fn id(&self) -> &'static str {
        "lineWithErrorBars"
    }

    fn element_id(&self) -> &'static str {
        POINT_WITH_ERROR_BAR
    }

    fn scale_layout(&self, options: &ChartOptions) -> ScaleLayout {
        let (index_axis, value_axis) = if options.is_horizontal() {
            (Axis::Y, Axis::X)
        } else {
            (Axis::X, Axis::Y)
        };
        ScaleLayout::Cartesian {
            index: AxisSetup::new(index_axis, ScaleKind::Category),
            value: AxisSetup::new(value_axis, ScaleKind::Linear),
        }
    }

    fn draw_dataset(
        &self,
        dataset: &DatasetConfig,
        elements: &[ErrorBarElement],
        canvas: &mut dyn Canvas,
    ) -> ChartResult<()> {
        draw_connected(dataset, elements, canvas, true)
    }
}

/// Pixel `(min, max)` ranges of one point, keyed by axis.
pub(crate) type AxisRanges = Vec<(Axis, (Option<RangeValue>, Option<RangeValue>))>;

/// Lays out one point per entry. The value pixel collapses onto the value
/// scale base on reset; `ranges` supplies the pixel ranges per axis.
pub(crate) fn update_points(
    context: &UpdateContext<'_>,
    index_axis: Axis,
    value_axis: Axis,
    ranges: impl Fn(&ParsedPoint) -> ChartResult<AxisRanges>,
) -> ChartResult<Vec<ErrorBarElement>> {
    let index_scale = context.scales.cartesian(index_axis)?;
    let value_scale = context.scales.cartesian(value_axis)?;
    let reset = context.is_reset();
    let base = value_scale.base_pixel();
    let radius = context.dataset.point_radius.unwrap_or(DEFAULT_POINT_RADIUS);
    let background_color = context.dataset.background_color.unwrap_or(DEFAULT_COLOR);

    context
        .parsed
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let index_px = value_pixel(index_scale, point.value(index_axis))?;
            let value_px = value_pixel(value_scale, point.value(value_axis))?;
            let value_at = if reset { base } else { value_px.unwrap_or(base) };
            let index_at = index_px.unwrap_or(0.0);

            let mut props = CartesianErrorBarProps::default();
            if index_axis == Axis::X {
                (props.x, props.y) = (index_at, value_at);
            } else {
                (props.x, props.y) = (value_at, index_at);
            }
            for (axis, (min, max)) in ranges(point)? {
                match axis {
                    Axis::X => (props.x_min, props.x_max) = (min, max),
                    Axis::Y => (props.y_min, props.y_max) = (min, max),
                    Axis::R => {}
                }
            }

            Ok(ErrorBarElement::Point(PointWithErrorBar {
                props,
                radius,
                background_color,
                error_bar: context.style_for(i),
                skip: index_px.is_none() || value_px.is_none(),
            }))
        })
        .collect()
}

/// Strokes the path through consecutive drawn points, then the points.
/// Gaps break the path.
pub(crate) fn draw_connected(
    dataset: &DatasetConfig,
    elements: &[ErrorBarElement],
    canvas: &mut dyn Canvas,
    default_show_line: bool,
) -> ChartResult<()> {
    if dataset.show_line.unwrap_or(default_show_line) {
        canvas.save();
        canvas.set_line_width(dataset.border_width.unwrap_or(DEFAULT_BORDER_WIDTH));
        canvas.set_stroke_color(dataset.border_color.unwrap_or(DEFAULT_COLOR));
        canvas.begin_path();
        let mut pen_down = false;
        for element in elements {
            if element.skip() {
                pen_down = false;
                continue;
            }
            let (x, y) = element.anchor();
            if pen_down {
                canvas.line_to(x, y);
            } else {
                canvas.move_to(x, y);
                pen_down = true;
            }
        }
        let stroked = canvas.stroke();
        canvas.restore();
        stroked?;
    }

    for element in elements {
        element.draw(canvas)?;
    }
    Ok(())
}
