use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::controllers::{
    AxisSetup, ChartController, ChartScales, ParseContext, ScaleLayout, TooltipItem,
    UpdateContext,
};
use crate::core::{
    Axis, CartesianScale, CategoryScale, ChartArea, LinearScale, LogarithmicScale, ParsedPoint,
    PixelSpan, RadialLinearScale, ScaleKind, UpdateMode, resolve_domain,
};
use crate::elements::ErrorBarElement;
use crate::error::{ChartError, ChartResult};
use crate::render::{FrameCanvas, RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::animation::interpolate_elements;
use super::{ChartConfig, ChartEngineConfig, ChartTypeRegistry, ScaleOptions};

#[derive(Debug, Clone, Default)]
struct DatasetState {
    parsed: Vec<ParsedPoint>,
    elements: Vec<ErrorBarElement>,
}

#[derive(Debug, Clone, Default)]
struct UpdateState {
    layout: Option<ScaleLayout>,
    scales: ChartScales,
    datasets: Vec<DatasetState>,
    previous: Option<Vec<Vec<ErrorBarElement>>>,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` parses the configured datasets, builds scales that cover
/// every error range, lays out elements through the chart type's controller
/// and hands finished frames to the renderer.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    registry: ChartTypeRegistry,
    controller: Box<dyn ChartController>,
    hidden_data: BTreeSet<usize>,
    state: UpdateState,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with the built-in error-bar chart types and runs
    /// the initial reset-then-default update.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        Self::with_registry(renderer, config, ChartTypeRegistry::with_error_bar_types())
    }

    pub fn with_registry(
        renderer: R,
        config: ChartEngineConfig,
        registry: ChartTypeRegistry,
    ) -> ChartResult<Self> {
        if !config.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        let controller = registry.create(&config.chart.chart_type)?;
        debug!(
            chart_type = %config.chart.chart_type,
            datasets = config.chart.data.datasets.len(),
            "chart engine created"
        );

        let mut engine = Self {
            renderer,
            config,
            registry,
            controller,
            hidden_data: BTreeSet::new(),
            state: UpdateState::default(),
        };
        engine.update(UpdateMode::Reset)?;
        engine.update(UpdateMode::Default)?;
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn chart(&self) -> &ChartConfig {
        &self.config.chart
    }

    /// Mutable chart config; changes apply on the next [`ChartEngine::update`].
    pub fn chart_mut(&mut self) -> &mut ChartConfig {
        &mut self.config.chart
    }

    #[must_use]
    pub fn registry(&self) -> &ChartTypeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn controller(&self) -> &dyn ChartController {
        self.controller.as_ref()
    }

    /// Replaces the chart configuration and updates with animation from the
    /// current elements.
    pub fn set_chart(&mut self, chart: ChartConfig) -> ChartResult<()> {
        if chart.chart_type != self.config.chart.chart_type {
            self.controller = self.registry.create(&chart.chart_type)?;
            self.state = UpdateState::default();
        }
        self.config.chart = chart;
        self.update(UpdateMode::Default)
    }

    /// Shows or hides one data index. Takes effect on the next update.
    pub fn set_data_visibility(&mut self, index: usize, visible: bool) {
        if visible {
            self.hidden_data.remove(&index);
        } else {
            self.hidden_data.insert(index);
        }
    }

    #[must_use]
    pub fn is_data_visible(&self, index: usize) -> bool {
        !self.hidden_data.contains(&index)
    }

    /// Re-parses data, rebuilds scales and lays out every element.
    ///
    /// With [`UpdateMode::Default`] the previous elements are kept as the
    /// animation start; the other modes drop them.
    pub fn update(&mut self, mode: UpdateMode) -> ChartResult<()> {
        let chart = &self.config.chart;
        let area = self.config.viewport.chart_area();
        let layout = effective_layout(self.controller.scale_layout(&chart.options), chart);

        let index_offset = layout.index_axis().is_some_and(|setup| setup.offset);
        let labels = CategoryScale::new(chart.data.labels.clone(), index_offset);
        let parse_context = ParseContext {
            layout,
            labels: &labels,
        };
        let parsed = chart
            .data
            .datasets
            .iter()
            .map(|dataset| self.controller.parse(&dataset.data, &parse_context))
            .collect::<ChartResult<Vec<_>>>()?;

        let hidden_data = &self.hidden_data;
        let data_visible = |index: usize| !hidden_data.contains(&index);
        let data_range = |axis: Axis| {
            chart
                .data
                .datasets
                .iter()
                .zip(&parsed)
                .filter(|(dataset, _)| !dataset.hidden)
                .filter_map(|(_, points)| self.controller.min_max(points, axis, &data_visible))
                .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
        };

        let mut scales = ChartScales::default();
        for setup in layout.axes() {
            let options = chart.options.scales.get(setup.axis);
            match setup.axis {
                Axis::R => {
                    scales.r = Some(build_radial_scale(
                        setup,
                        options,
                        data_range(Axis::R),
                        area,
                    )?);
                }
                Axis::X | Axis::Y => {
                    let scale = build_cartesian_scale(
                        setup,
                        options,
                        data_range(setup.axis),
                        &labels,
                        area,
                    )?;
                    trace!(
                        axis = setup.axis.as_str(),
                        kind = ?scale.kind(),
                        domain = ?scale.domain(),
                        "scale built"
                    );
                    if setup.axis == Axis::X {
                        scales.x = Some(scale);
                    } else {
                        scales.y = Some(scale);
                    }
                }
            }
        }

        let visible_count = chart.data.datasets.iter().filter(|d| !d.hidden).count();
        let mut datasets = Vec::with_capacity(parsed.len());
        let mut position = 0;
        for (dataset_index, (dataset, points)) in
            chart.data.datasets.iter().zip(parsed).enumerate()
        {
            let elements = if dataset.hidden {
                Vec::new()
            } else {
                let context = UpdateContext {
                    dataset_index,
                    dataset,
                    options: &chart.options,
                    layout,
                    parsed: &points,
                    scales: &scales,
                    mode,
                    slot: (position, visible_count),
                    data_visible: &data_visible,
                };
                position += 1;
                self.controller.update_elements(&context)?
            };
            datasets.push(DatasetState {
                parsed: points,
                elements,
            });
        }

        let previous = match mode {
            UpdateMode::Default if !self.state.datasets.is_empty() => Some(
                std::mem::take(&mut self.state.datasets)
                    .into_iter()
                    .map(|dataset| dataset.elements)
                    .collect(),
            ),
            _ => None,
        };

        debug!(
            chart_type = self.controller.id(),
            ?mode,
            datasets = datasets.len(),
            animated = previous.is_some(),
            "chart updated"
        );
        self.state = UpdateState {
            layout: Some(layout),
            scales,
            datasets,
            previous,
        };
        Ok(())
    }

    /// Frame of the current elements.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        self.build_render_frame_at(1.0)
    }

    /// Frame at `progress` (clamped to `[0, 1]`) of the transition started by
    /// the last animated update.
    ///
    /// Datasets are painted last to first so the first dataset ends on top.
    pub fn build_render_frame_at(&self, progress: f64) -> ChartResult<RenderFrame> {
        let mut canvas = FrameCanvas::new(self.config.viewport);
        let datasets = &self.config.chart.data.datasets;

        for (index, state) in self.state.datasets.iter().enumerate().rev() {
            let Some(dataset) = datasets.get(index) else {
                continue;
            };
            if dataset.hidden {
                continue;
            }
            let previous = self
                .state
                .previous
                .as_ref()
                .and_then(|previous| previous.get(index));
            match previous {
                Some(previous) => {
                    let blended = interpolate_elements(previous, &state.elements, progress);
                    self.controller
                        .draw_dataset(dataset, &blended, &mut canvas)?;
                }
                None => self
                    .controller
                    .draw_dataset(dataset, &state.elements, &mut canvas)?,
            }
        }

        if canvas.state_depth() != 0 {
            warn!(
                depth = canvas.state_depth(),
                "canvas state left unbalanced after drawing"
            );
        }
        Ok(canvas.into_frame())
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    pub fn render_at(&mut self, progress: f64) -> ChartResult<()> {
        let frame = self.build_render_frame_at(progress)?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    /// Tooltip text of one entry, or `None` when it does not exist.
    #[must_use]
    pub fn tooltip_label(&self, dataset_index: usize, data_index: usize) -> Option<String> {
        let dataset = self.config.chart.data.datasets.get(dataset_index)?;
        let state = self.state.datasets.get(dataset_index)?;
        let parsed = state.parsed.get(data_index)?;
        let horizontal = matches!(
            state.elements.get(data_index),
            Some(ErrorBarElement::Bar(bar)) if bar.horizontal
        );
        let item = TooltipItem {
            dataset_index,
            data_index,
            dataset_label: dataset.label.as_deref(),
            label: self
                .config
                .chart
                .data
                .labels
                .get(data_index)
                .map(String::as_str),
            raw: dataset.data.get(data_index).and_then(Option::as_ref),
            parsed,
            horizontal,
        };
        Some(self.controller.tooltip_label(&item))
    }

    #[must_use]
    pub fn elements(&self, dataset_index: usize) -> Option<&[ErrorBarElement]> {
        self.state
            .datasets
            .get(dataset_index)
            .map(|dataset| dataset.elements.as_slice())
    }

    #[must_use]
    pub fn parsed(&self, dataset_index: usize) -> Option<&[ParsedPoint]> {
        self.state
            .datasets
            .get(dataset_index)
            .map(|dataset| dataset.parsed.as_slice())
    }

    #[must_use]
    pub fn scales(&self) -> &ChartScales {
        &self.state.scales
    }

    #[must_use]
    pub fn scale_layout(&self) -> Option<ScaleLayout> {
        self.state.layout
    }

    #[must_use]
    pub fn scale_domain(&self, axis: Axis) -> Option<(f64, f64)> {
        self.state.scales.domain(axis)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Chart type defaults with the user's `scales.<axis>` overrides applied.
fn effective_layout(mut layout: ScaleLayout, chart: &ChartConfig) -> ScaleLayout {
    for setup in layout.axes() {
        let Some(options) = chart.options.scales.get(setup.axis) else {
            continue;
        };
        let mut effective = setup;
        if let Some(kind) = options.kind {
            let compatible = (setup.axis == Axis::R) == (kind == ScaleKind::RadialLinear);
            if compatible {
                effective.kind = kind;
            } else {
                warn!(
                    axis = setup.axis.as_str(),
                    ?kind,
                    "scale type does not fit this axis, keeping default"
                );
            }
        }
        if let Some(offset) = options.offset {
            effective.offset = offset;
        }
        if let Some(begin_at_zero) = options.begin_at_zero {
            effective.begin_at_zero = begin_at_zero;
        }
        layout.set_axis(effective);
    }
    layout
}

fn build_cartesian_scale(
    setup: AxisSetup,
    options: Option<&ScaleOptions>,
    data: Option<(f64, f64)>,
    labels: &CategoryScale,
    area: ChartArea,
) -> ChartResult<CartesianScale> {
    let span = match (setup.axis, setup.kind) {
        (Axis::X, _) => PixelSpan::horizontal(area),
        // categories run top to bottom on a vertical axis
        (Axis::Y, ScaleKind::Category) => PixelSpan::new(area.top, area.bottom),
        (Axis::Y, _) => PixelSpan::vertical(area),
        (Axis::R, _) => {
            return Err(ChartError::InvalidData(
                "radial axis cannot back a cartesian scale".to_owned(),
            ));
        }
    };
    let bounds = options.map_or_else(
        || ScaleOptions::default().bounds(setup.begin_at_zero),
        |options| options.bounds(setup.begin_at_zero),
    );

    match setup.kind {
        ScaleKind::Category => Ok(CartesianScale::category(
            setup.axis,
            CategoryScale::new(labels.labels().to_vec(), setup.offset),
            span,
        )),
        ScaleKind::Linear => {
            let (min, max) = resolve_domain(data, bounds, ScaleKind::Linear);
            Ok(CartesianScale::linear(
                setup.axis,
                LinearScale::new(min, max)?,
                span,
            ))
        }
        ScaleKind::Logarithmic => {
            let (min, max) = resolve_domain(data, bounds, ScaleKind::Logarithmic);
            Ok(CartesianScale::logarithmic(
                setup.axis,
                LogarithmicScale::new(min, max)?,
                span,
            ))
        }
        ScaleKind::RadialLinear => Err(ChartError::InvalidData(
            "radialLinear scale cannot be used on a cartesian axis".to_owned(),
        )),
    }
}

fn build_radial_scale(
    setup: AxisSetup,
    options: Option<&ScaleOptions>,
    data: Option<(f64, f64)>,
    area: ChartArea,
) -> ChartResult<RadialLinearScale> {
    let bounds = options.map_or_else(
        || ScaleOptions::default().bounds(setup.begin_at_zero),
        |options| options.bounds(setup.begin_at_zero),
    );
    let (min, max) = resolve_domain(data, bounds, ScaleKind::Linear);
    trace!(min, max, "radial scale built");
    RadialLinearScale::new(LinearScale::new(min, max)?, area)
}
