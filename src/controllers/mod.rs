//! Error-bar controllers.
//!
//! A controller turns one dataset into elements in four steps, each a
//! separate capability: parse raw entries ([`DataParser`]), report the value
//! range its scales must cover ([`ScaleRangeExtender`]), lay elements out
//! in pixel space ([`ElementUpdater`]) and describe an entry for a tooltip
//! ([`TooltipLabeler`]).

mod bar;
mod line;
mod polar_area;
mod scatter;
pub mod tooltip;

pub use bar::BarWithErrorBarsController;
pub use line::LineWithErrorBarsController;
pub use polar_area::PolarAreaWithErrorBarsController;
pub use scatter::ScatterWithErrorBarsController;
pub use tooltip::TooltipItem;

use smallvec::SmallVec;

use crate::api::{ChartOptions, DatasetConfig, ScriptContext, resolve_error_bar_style};
use crate::core::{
    Axis, CartesianScale, CategoryScale, DataValue, ErrorBarStyle, ParsedPoint, RadialLinearScale,
    RangeValue, ScaleKind, UpdateMode, extrema_min_max, parse_error_label_data,
    parse_error_number_data,
};
use crate::elements::{Drawable, ErrorBarElement};
use crate::error::{ChartError, ChartResult};
use crate::render::Canvas;

/// Default set-up of one axis for a chart type, before user overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSetup {
    pub axis: Axis,
    pub kind: ScaleKind,
    pub begin_at_zero: bool,
    pub offset: bool,
}

impl AxisSetup {
    #[must_use]
    pub fn new(axis: Axis, kind: ScaleKind) -> Self {
        Self {
            axis,
            kind,
            begin_at_zero: false,
            offset: false,
        }
    }

    #[must_use]
    pub fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }

    #[must_use]
    pub fn with_offset(mut self) -> Self {
        self.offset = true;
        self
    }
}

/// Axes a chart type draws on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleLayout {
    Cartesian { index: AxisSetup, value: AxisSetup },
    Radial(AxisSetup),
}

impl ScaleLayout {
    #[must_use]
    pub fn axes(&self) -> SmallVec<[AxisSetup; 2]> {
        match *self {
            Self::Cartesian { index, value } => SmallVec::from_buf([index, value]),
            Self::Radial(value) => {
                let mut axes = SmallVec::new();
                axes.push(value);
                axes
            }
        }
    }

    #[must_use]
    pub fn index_axis(&self) -> Option<AxisSetup> {
        match *self {
            Self::Cartesian { index, .. } => Some(index),
            Self::Radial(_) => None,
        }
    }

    #[must_use]
    pub fn value_axis(&self) -> AxisSetup {
        match *self {
            Self::Cartesian { value, .. } | Self::Radial(value) => value,
        }
    }

    /// Replaces the default set-up of `axis`.
    pub fn set_axis(&mut self, setup: AxisSetup) {
        match self {
            Self::Cartesian { index, value } => {
                if index.axis == setup.axis {
                    *index = setup;
                } else if value.axis == setup.axis {
                    *value = setup;
                }
            }
            Self::Radial(value) => {
                if value.axis == setup.axis {
                    *value = setup;
                }
            }
        }
    }
}

/// Scales built for one update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartScales {
    pub x: Option<CartesianScale>,
    pub y: Option<CartesianScale>,
    pub r: Option<RadialLinearScale>,
}

impl ChartScales {
    pub fn cartesian(&self, axis: Axis) -> ChartResult<&CartesianScale> {
        let scale = match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::R => None,
        };
        scale.ok_or_else(|| {
            ChartError::InvalidData(format!("no cartesian scale for axis `{}`", axis.as_str()))
        })
    }

    pub fn radial(&self) -> ChartResult<&RadialLinearScale> {
        self.r
            .as_ref()
            .ok_or_else(|| ChartError::InvalidData("no radial scale configured".to_owned()))
    }

    #[must_use]
    pub fn domain(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => self.x.as_ref().map(CartesianScale::domain),
            Axis::Y => self.y.as_ref().map(CartesianScale::domain),
            Axis::R => self.r.map(RadialLinearScale::domain),
        }
    }
}

/// Inputs to parsing one dataset.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    pub layout: ScaleLayout,
    pub labels: &'a CategoryScale,
}

/// Inputs to laying out the elements of one dataset.
pub struct UpdateContext<'a> {
    pub dataset_index: usize,
    pub dataset: &'a DatasetConfig,
    pub options: &'a ChartOptions,
    pub layout: ScaleLayout,
    pub parsed: &'a [ParsedPoint],
    pub scales: &'a ChartScales,
    pub mode: UpdateMode,
    /// Position of this dataset among the visible datasets, and their count.
    pub slot: (usize, usize),
    pub data_visible: &'a dyn Fn(usize) -> bool,
}

impl UpdateContext<'_> {
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.mode == UpdateMode::Reset
    }

    #[must_use]
    pub fn raw(&self, index: usize) -> Option<&DataValue> {
        self.dataset.data.get(index).and_then(Option::as_ref)
    }

    /// Error-bar style of the element at `index`.
    #[must_use]
    pub fn style_for(&self, index: usize) -> ErrorBarStyle {
        let context = ScriptContext {
            dataset_index: self.dataset_index,
            data_index: index,
            raw: self.raw(index),
        };
        resolve_error_bar_style(&self.dataset.error_bar, &self.options.error_bar, &context)
    }
}

pub trait DataParser {
    fn parse(
        &self,
        data: &[Option<DataValue>],
        context: &ParseContext<'_>,
    ) -> ChartResult<Vec<ParsedPoint>>;
}

pub trait ScaleRangeExtender {
    /// Range `axis` must cover, error bounds included. Per-index visibility
    /// is ignored unless a chart type says otherwise.
    fn min_max(
        &self,
        parsed: &[ParsedPoint],
        axis: Axis,
        data_visible: &dyn Fn(usize) -> bool,
    ) -> Option<(f64, f64)> {
        let _ = data_visible;
        extrema_min_max(parsed, axis, |_| true)
    }
}

pub trait ElementUpdater {
    fn update_elements(&self, context: &UpdateContext<'_>) -> ChartResult<Vec<ErrorBarElement>>;
}

pub trait TooltipLabeler {
    fn tooltip_label(&self, item: &TooltipItem<'_>) -> String;
}

/// Complete chart type: the four capabilities plus identity and axes.
pub trait ChartController:
    DataParser + ScaleRangeExtender + ElementUpdater + TooltipLabeler + Send + Sync
{
    fn id(&self) -> &'static str;

    fn element_id(&self) -> &'static str;

    fn scale_layout(&self, options: &ChartOptions) -> ScaleLayout;

    /// Paints the elements of one dataset. Line charts add a connecting path.
    fn draw_dataset(
        &self,
        dataset: &DatasetConfig,
        elements: &[ErrorBarElement],
        canvas: &mut dyn Canvas,
    ) -> ChartResult<()> {
        let _ = dataset;
        for element in elements {
            element.draw(canvas)?;
        }
        Ok(())
    }
}

/// Primary values of a bar/line/scatter dataset, then error data on the
/// value axis and on a numeric index axis (label positions otherwise).
pub(crate) fn parse_cartesian(
    data: &[Option<DataValue>],
    context: &ParseContext<'_>,
) -> ChartResult<Vec<ParsedPoint>> {
    let ScaleLayout::Cartesian { index, value } = context.layout else {
        return Err(ChartError::InvalidData(
            "cartesian dataset requires an index and a value axis".to_owned(),
        ));
    };

    let mut parsed: Vec<ParsedPoint> = data
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let mut point = ParsedPoint::default();
            match entry {
                Some(DataValue::Number(number)) => {
                    point.set_value(value.axis, *number);
                    point.set_value(index.axis, label_value(context, index, position));
                }
                Some(DataValue::Point(datum)) => {
                    point.set_value(value.axis, datum.value(value.axis).unwrap_or(f64::NAN));
                    let index_value = datum
                        .value(index.axis)
                        .unwrap_or_else(|| label_value(context, index, position));
                    point.set_value(index.axis, index_value);
                }
                None => point.set_value(index.axis, label_value(context, index, position)),
            }
            point
        })
        .collect();

    parse_error_number_data(&mut parsed, value.axis, data, 0);
    if index.kind.is_numeric() {
        parse_error_number_data(&mut parsed, index.axis, data, 0);
    } else {
        parse_error_label_data(&mut parsed, index.axis, context.labels, 0);
    }
    Ok(parsed)
}

fn label_value(context: &ParseContext<'_>, index: AxisSetup, position: usize) -> f64 {
    let label = context.labels.labels().get(position).map(String::as_str);
    if index.kind.is_numeric() {
        label
            .and_then(|label| label.trim().parse::<f64>().ok())
            .unwrap_or(position as f64)
    } else {
        context.labels.parse(label, position)
    }
}

/// Pixel form of the `axisMin`/`axisMax` ranges of one point on a Cartesian
/// scale. On reset every value collapses onto the scale base. Non-finite
/// bounds become NaN pixels, which the canvas does not draw.
pub(crate) fn calculate_scale(
    point: &ParsedPoint,
    scale: &CartesianScale,
    reset: bool,
) -> ChartResult<(Option<RangeValue>, Option<RangeValue>)> {
    let Some(range) = point.range(scale.axis()) else {
        return Ok((None, None));
    };
    let base = scale.base_pixel();
    let to_pixel = |value: f64| -> ChartResult<f64> {
        if reset {
            Ok(base)
        } else if !value.is_finite() {
            Ok(f64::NAN)
        } else {
            scale.pixel_for_value(value)
        }
    };
    let min = range.min.as_ref().map(|v| v.try_map(to_pixel)).transpose()?;
    let max = range.max.as_ref().map(|v| v.try_map(to_pixel)).transpose()?;
    Ok((min, max))
}

/// Radial counterpart of [`calculate_scale`]: ranges become distances from
/// the center, and collapse to zero on reset when `animate_scale` is on.
pub(crate) fn calculate_polar_scale(
    point: &ParsedPoint,
    scale: &RadialLinearScale,
    reset: bool,
    animate_scale: bool,
) -> ChartResult<(Option<RangeValue>, Option<RangeValue>)> {
    let Some(range) = point.range(Axis::R) else {
        return Ok((None, None));
    };
    let to_radius = |value: f64| -> ChartResult<f64> {
        if !value.is_finite() {
            return Ok(if reset && animate_scale { 0.0 } else { f64::NAN });
        }
        let radius = scale.distance_for_value(value)?;
        Ok(if reset && animate_scale { 0.0 } else { radius })
    };
    let min = range.min.as_ref().map(|v| v.try_map(to_radius)).transpose()?;
    let max = range.max.as_ref().map(|v| v.try_map(to_radius)).transpose()?;
    Ok((min, max))
}

/// Maps a primary value, or `None` when it is a gap.
pub(crate) fn value_pixel(scale: &CartesianScale, value: f64) -> ChartResult<Option<f64>> {
    if !value.is_finite() {
        return Ok(None);
    }
    scale.pixel_for_value(value).map(Some)
}
