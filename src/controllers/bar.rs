use tracing::debug;

use crate::api::ChartOptions;
use crate::controllers::tooltip::{TooltipItem, bar_label};
use crate::controllers::{
    AxisSetup, ChartController, DataParser, ElementUpdater, ParseContext, ScaleLayout,
    ScaleRangeExtender, TooltipLabeler, UpdateContext, calculate_scale, parse_cartesian,
    value_pixel,
};
use crate::core::{Axis, CartesianErrorBarProps, DataValue, ParsedPoint, ScaleKind};
use crate::elements::{BAR_WITH_ERROR_BAR, BarWithErrorBar, ErrorBarElement};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Share of a category slot filled by the bars of all datasets.
pub const CATEGORY_PERCENTAGE: f64 = 0.8;
/// Share of one dataset's chunk filled by its bar.
pub const BAR_PERCENTAGE: f64 = 0.9;

const DEFAULT_BACKGROUND: Color = Color::rgba(0.0, 0.0, 0.0, 0.1);

/// `barWithErrorBars`: bars with error ranges on the value axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarWithErrorBarsController;

impl DataParser for BarWithErrorBarsController {
    fn parse(
        &self,
        data: &[Option<DataValue>],
        context: &ParseContext<'_>,
    ) -> ChartResult<Vec<ParsedPoint>> {
        parse_cartesian(data, context)
    }
}

impl ScaleRangeExtender for BarWithErrorBarsController {}

impl ElementUpdater for BarWithErrorBarsController {
    fn update_elements(&self, context: &UpdateContext<'_>) -> ChartResult<Vec<ErrorBarElement>> {
        let ScaleLayout::Cartesian { index, value } = context.layout else {
            return Err(ChartError::InvalidData(
                "bar chart requires a cartesian layout".to_owned(),
            ));
        };
        let index_scale = context.scales.cartesian(index.axis)?;
        let value_scale = context.scales.cartesian(value.axis)?;
        let horizontal = index.axis == Axis::Y;
        let reset = context.is_reset();
        let base = value_scale.base_pixel();

        let (position, count) = context.slot;
        let slot = index_scale.slot_width(context.parsed.len()) * CATEGORY_PERCENTAGE;
        let chunk = slot / count.max(1) as f64;
        let thickness = chunk * BAR_PERCENTAGE;
        let background_color = context
            .dataset
            .background_color
            .unwrap_or(DEFAULT_BACKGROUND);

        let elements = context
            .parsed
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let value_px = value_pixel(value_scale, point.value(value.axis))?;
                let index_px = value_pixel(index_scale, point.value(index.axis))?;
                let head = if reset {
                    base
                } else {
                    value_px.unwrap_or(base)
                };
                let center = index_px.map_or(0.0, |px| {
                    px - slot / 2.0 + chunk * position as f64 + chunk / 2.0
                });
                let length = (head - base).abs();
                let (min, max) = calculate_scale(point, value_scale, reset)?;

                let props = if horizontal {
                    CartesianErrorBarProps {
                        x: head,
                        y: center,
                        width: Some(length),
                        height: Some(thickness),
                        x_min: min,
                        x_max: max,
                        ..CartesianErrorBarProps::default()
                    }
                } else {
                    CartesianErrorBarProps {
                        x: center,
                        y: head,
                        width: Some(thickness),
                        height: Some(length),
                        y_min: min,
                        y_max: max,
                        ..CartesianErrorBarProps::default()
                    }
                };

                Ok(ErrorBarElement::Bar(BarWithErrorBar {
                    props,
                    base,
                    horizontal,
                    background_color,
                    error_bar: context.style_for(i),
                    skip: value_px.is_none() || index_px.is_none(),
                }))
            })
            .collect::<ChartResult<Vec<_>>>()?;

        debug!(
            dataset = context.dataset_index,
            elements = elements.len(),
            horizontal,
            "bar elements updated"
        );
        Ok(elements)
    }
}

impl TooltipLabeler for BarWithErrorBarsController {
    fn tooltip_label(&self, item: &TooltipItem<'_>) -> String {
        bar_label(item)
    }
}

impl ChartController for BarWithErrorBarsController {
    fn id(&self) -> &'static str {
        "barWithErrorBars"
    }

    fn element_id(&self) -> &'static str {
        BAR_WITH_ERROR_BAR
    }

    fn scale_layout(&self, options: &ChartOptions) -> ScaleLayout {
        let (index_axis, value_axis) = if options.is_horizontal() {
            (Axis::Y, Axis::X)
        } else {
            (Axis::X, Axis::Y)
        };
        ScaleLayout::Cartesian {
            index: AxisSetup::new(index_axis, ScaleKind::Category).with_offset(),
            value: AxisSetup::new(value_axis, ScaleKind::Linear).begin_at_zero(),
        }
    }
}
