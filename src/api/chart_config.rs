use serde::{Deserialize, Serialize};

use crate::core::{Axis, DataValue, DomainBounds, ScaleKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::ErrorBarStyleConfig;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    pub chart: ChartConfig,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport, chart: ChartConfig) -> Self {
        Self { viewport, chart }
    }

    /// Serializes config to pretty JSON. Scripted options cannot be serialized.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

/// Chart configuration in the familiar `{ type, data, options }` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart_type: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            data: ChartData::default(),
            options: ChartOptions::default(),
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetConfig) -> Self {
        self.data.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

/// One dataset: raw entries plus per-dataset styling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<Option<DataValue>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(flatten)]
    pub error_bar: ErrorBarStyleConfig,
}

impl DatasetConfig {
    #[must_use]
    pub fn new<I, V>(data: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DataValue>,
    {
        Self {
            data: data.into_iter().map(|value| Some(value.into())).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_error_bar(mut self, style: ErrorBarStyleConfig) -> Self {
        self.error_bar = style;
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Chart-level options. Error-bar options set here apply to every dataset
/// that does not override them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<Axis>,
    #[serde(default)]
    pub scales: ScalesConfig,
    #[serde(default)]
    pub animation: AnimationOptions,
    #[serde(flatten)]
    pub error_bar: ErrorBarStyleConfig,
}

impl ChartOptions {
    /// Whether bars run along X (`indexAxis: "y"`).
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.index_axis == Some(Axis::Y)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<ScaleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<ScaleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<ScaleOptions>,
}

impl ScalesConfig {
    #[must_use]
    pub fn get(&self, axis: Axis) -> Option<&ScaleOptions> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::R => self.r.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScaleKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<bool>,
}

impl ScaleOptions {
    /// Domain constraints, with `begin_at_zero` falling back to the chart
    /// type's default.
    #[must_use]
    pub fn bounds(&self, default_begin_at_zero: bool) -> DomainBounds {
        DomainBounds {
            begin_at_zero: self.begin_at_zero.unwrap_or(default_begin_at_zero),
            min: self.min,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationOptions {
    /// Polar slices (and their error bars) grow from the center on reset.
    pub animate_scale: bool,
    /// Polar slices sweep open from the start angle on reset.
    pub animate_rotate: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            animate_scale: true,
            animate_rotate: true,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
