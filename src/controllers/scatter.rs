use tracing::debug;

use crate::api::{ChartOptions, DatasetConfig};
use crate::controllers::line::{draw_connected, update_points};
use crate::controllers::tooltip::{TooltipItem, scatter_label};
use crate::controllers::{
    AxisSetup, ChartController, DataParser, ElementUpdater, ParseContext, ScaleLayout,
    ScaleRangeExtender, TooltipLabeler, UpdateContext, calculate_scale, parse_cartesian,
};
use crate::core::{Axis, DataValue, ParsedPoint, ScaleKind};
use crate::elements::{ErrorBarElement, POINT_WITH_ERROR_BAR};
use crate::error::ChartResult;
use crate::render::Canvas;

/// `scatterWithErrorBars`: free points with error ranges on both axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterWithErrorBarsController;

impl DataParser for ScatterWithErrorBarsController {
    fn parse(
        &self,
        data: &[Option<DataValue>],
        context: &ParseContext<'_>,
    ) -> ChartResult<Vec<ParsedPoint>> {
        parse_cartesian(data, context)
    }
}

impl ScaleRangeExtender for ScatterWithErrorBarsController {}

impl ElementUpdater for ScatterWithErrorBarsController {
    fn update_elements(&self, context: &UpdateContext<'_>) -> ChartResult<Vec<ErrorBarElement>> {
        let x_scale = context.scales.cartesian(Axis::X)?;
        let y_scale = context.scales.cartesian(Axis::Y)?;
        let reset = context.is_reset();
        let elements = update_points(context, Axis::X, Axis::Y, |point| {
            Ok(vec![
                (Axis::X, calculate_scale(point, x_scale, reset)?),
                (Axis::Y, calculate_scale(point, y_scale, reset)?),
            ])
        })?;

        debug!(
            dataset = context.dataset_index,
            elements = elements.len(),
            "scatter elements updated"
        );
        Ok(elements)
    }
}

impl TooltipLabeler for ScatterWithErrorBarsController {
    fn tooltip_label(&self, item: &TooltipItem<'_>) -> String {
        scatter_label(item)
    }
}

impl ChartController for ScatterWithErrorBarsController {
    fn id(&self) -> &'static str {
        "scatterWithErrorBars"
    }

    fn element_id(&self) -> &'static str {
        POINT_WITH_ERROR_BAR
    }

    fn scale_layout(&self, _options: &ChartOptions) -> ScaleLayout {
        ScaleLayout::Cartesian {
            index: AxisSetup::new(Axis::X, ScaleKind::Linear),
            value: AxisSetup::new(Axis::Y, ScaleKind::Linear),
        }
    }

    fn draw_dataset(
        &self,
        dataset: &DatasetConfig,
        elements: &[ErrorBarElement],
        canvas: &mut dyn Canvas,
    ) -> ChartResult<()> {
        draw_connected(dataset, elements, canvas, false)
    }
}
