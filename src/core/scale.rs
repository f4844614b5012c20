use serde::{Deserialize, Serialize};

use crate::core::types::{Axis, ChartArea};
use crate::error::{ChartError, ChartResult};

/// Scale type tag, as named in chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleKind {
    Linear,
    Logarithmic,
    Category,
    RadialLinear,
}

impl ScaleKind {
    /// Whether values on this scale are numbers (and so may carry error ranges).
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Linear | Self::Logarithmic)
    }
}

/// Pixel interval a scale maps onto; `start` is the pixel of the domain start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpan {
    pub start: f64,
    pub end: f64,
}

impl PixelSpan {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Left-to-right span of a chart area.
    #[must_use]
    pub fn horizontal(area: ChartArea) -> Self {
        Self::new(area.left, area.right)
    }

    /// Bottom-to-top span of a chart area.
    #[must_use]
    pub fn vertical(area: ChartArea) -> Self {
        Self::new(area.bottom, area.top)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }

    fn is_valid(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start != self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !span.is_valid() {
            return Err(ChartError::InvalidData(
                "pixel span must be finite and non-empty".to_owned(),
            ));
        }

        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.start + normalized * (span.end - span.start))
    }

    /// Value the scale grows from: zero when inside the domain, otherwise the
    /// domain edge closest to zero.
    #[must_use]
    pub fn base_value(self) -> f64 {
        let (min, max) = (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        );
        if min < 0.0 && max < 0.0 {
            max
        } else if min > 0.0 && max > 0.0 {
            min
        } else {
            0.0
        }
    }
}

/// Base-10 logarithmic mapping over a strictly positive domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogarithmicScale {
    domain_start: f64,
    domain_end: f64,
    log_start: f64,
    log_end: f64,
}

impl LogarithmicScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !(domain_start.is_finite() && domain_end.is_finite())
            || domain_start <= 0.0
            || domain_end <= 0.0
            || domain_start == domain_end
        {
            return Err(ChartError::InvalidData(
                "logarithmic domain must be finite, positive and non-zero".to_owned(),
            ));
        }
        Ok(Self {
            domain_start,
            domain_end,
            log_start: domain_start.log10(),
            log_end: domain_end.log10(),
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Non-positive values map onto the domain start.
    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let log = if value > 0.0 {
            value.log10()
        } else {
            self.log_start
        };
        LinearScale::new(self.log_start, self.log_end)?.domain_to_pixel(log, span)
    }
}

/// Label axis; values are label indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScale {
    labels: Vec<String>,
    offset: bool,
}

impl CategoryScale {
    /// `offset` shifts values by half a category so bars sit between grid lines.
    #[must_use]
    pub fn new(labels: Vec<String>, offset: bool) -> Self {
        Self { labels, offset }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn offset(&self) -> bool {
        self.offset
    }

    /// Resolves a label to its index, preferring the expected position.
    #[must_use]
    pub fn parse(&self, label: Option<&str>, index: usize) -> f64 {
        let Some(label) = label else {
            return index as f64;
        };
        if self.labels.get(index).is_some_and(|l| l == label) {
            return index as f64;
        }
        self.labels
            .iter()
            .position(|l| l == label)
            .unwrap_or(index) as f64
    }

    /// Pixel width of one category slot.
    #[must_use]
    pub fn category_width(&self, span: PixelSpan) -> f64 {
        let slots = if self.offset {
            self.labels.len()
        } else {
            self.labels.len().saturating_sub(1)
        };
        span.length() / slots.max(1) as f64
    }

    pub fn index_to_pixel(&self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let count = self.labels.len();
        let normalized = if self.offset {
            (value + 0.5) / count.max(1) as f64
        } else if count <= 1 {
            0.5
        } else {
            value / (count - 1) as f64
        };
        Ok(span.start + normalized * (span.end - span.start))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CartesianMapping {
    Linear(LinearScale),
    Logarithmic(LogarithmicScale),
    Category(CategoryScale),
}

/// One Cartesian axis: a mapping plus the pixel span it draws into.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianScale {
    axis: Axis,
    span: PixelSpan,
    mapping: CartesianMapping,
}

impl CartesianScale {
    #[must_use]
    pub fn linear(axis: Axis, scale: LinearScale, span: PixelSpan) -> Self {
        Self {
            axis,
            span,
            mapping: CartesianMapping::Linear(scale),
        }
    }

    #[must_use]
    pub fn logarithmic(axis: Axis, scale: LogarithmicScale, span: PixelSpan) -> Self {
        Self {
            axis,
            span,
            mapping: CartesianMapping::Logarithmic(scale),
        }
    }

    #[must_use]
    pub fn category(axis: Axis, scale: CategoryScale, span: PixelSpan) -> Self {
        Self {
            axis,
            span,
            mapping: CartesianMapping::Category(scale),
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn span(&self) -> PixelSpan {
        self.span
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self.mapping {
            CartesianMapping::Linear(_) => ScaleKind::Linear,
            CartesianMapping::Logarithmic(_) => ScaleKind::Logarithmic,
            CartesianMapping::Category(_) => ScaleKind::Category,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&CategoryScale> {
        match &self.mapping {
            CartesianMapping::Category(scale) => Some(scale),
            _ => None,
        }
    }

    /// Numeric domain; category scales report their index range.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        match &self.mapping {
            CartesianMapping::Linear(scale) => scale.domain(),
            CartesianMapping::Logarithmic(scale) => scale.domain(),
            CartesianMapping::Category(scale) => {
                (0.0, scale.labels().len().saturating_sub(1) as f64)
            }
        }
    }

    pub fn pixel_for_value(&self, value: f64) -> ChartResult<f64> {
        match &self.mapping {
            CartesianMapping::Linear(scale) => scale.domain_to_pixel(value, self.span),
            CartesianMapping::Logarithmic(scale) => scale.domain_to_pixel(value, self.span),
            CartesianMapping::Category(scale) => scale.index_to_pixel(value, self.span),
        }
    }

    /// Pixel bars grow from.
    #[must_use]
    pub fn base_pixel(&self) -> f64 {
        match &self.mapping {
            CartesianMapping::Linear(scale) => scale
                .domain_to_pixel(scale.base_value(), self.span)
                .unwrap_or(self.span.start),
            CartesianMapping::Logarithmic(_) | CartesianMapping::Category(_) => self.span.start,
        }
    }

    /// Width of one category slot, or of an evenly spread sample when the
    /// axis is numeric with `sample_count` points.
    #[must_use]
    pub fn slot_width(&self, sample_count: usize) -> f64 {
        match &self.mapping {
            CartesianMapping::Category(scale) => scale.category_width(self.span),
            _ => self.span.length() / sample_count.max(1) as f64,
        }
    }
}

/// Radial scale of polar charts: distance from the center grows with value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLinearScale {
    scale: LinearScale,
    center_x: f64,
    center_y: f64,
    drawing_area: f64,
}

impl RadialLinearScale {
    pub fn new(scale: LinearScale, area: ChartArea) -> ChartResult<Self> {
        let (center_x, center_y) = area.center();
        let drawing_area = area.width().min(area.height()) * 0.5;
        if !drawing_area.is_finite() || drawing_area <= 0.0 {
            return Err(ChartError::InvalidData(
                "radial drawing area must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            scale,
            center_x,
            center_y,
            drawing_area,
        })
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        Axis::R
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        ScaleKind::RadialLinear
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.scale.domain()
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    #[must_use]
    pub fn drawing_area(self) -> f64 {
        self.drawing_area
    }

    pub fn distance_for_value(self, value: f64) -> ChartResult<f64> {
        self.scale
            .domain_to_pixel(value, PixelSpan::new(0.0, self.drawing_area))
    }
}

/// User constraints applied on top of the data range of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomainBounds {
    pub begin_at_zero: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Turns a data range into a usable scale domain.
///
/// Order: data range (or `0..1` when empty), zero inclusion, explicit
/// overrides, then widening of degenerate domains.
#[must_use]
pub fn resolve_domain(data: Option<(f64, f64)>, bounds: DomainBounds, kind: ScaleKind) -> (f64, f64) {
    let (mut min, mut max) = data
        .filter(|(min, max)| min.is_finite() && max.is_finite())
        .unwrap_or((0.0, 1.0));

    if bounds.begin_at_zero && kind != ScaleKind::Logarithmic {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if let Some(explicit) = bounds.min.filter(|v| v.is_finite()) {
        min = explicit;
    }
    if let Some(explicit) = bounds.max.filter(|v| v.is_finite()) {
        max = explicit;
    }
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }

    if kind == ScaleKind::Logarithmic {
        if max <= 0.0 {
            max = 10.0;
        }
        if min <= 0.0 {
            min = (max / 10.0).min(1.0);
        }
        if max <= min {
            max = min * 10.0;
        }
    } else if min == max {
        min -= 1.0;
        max += 1.0;
    }

    (min, max)
}
