use std::fmt;
use std::sync::Arc;

use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};

use crate::core::{DataValue, ErrorBarStyle, StyleOption};
use crate::render::Color;

/// Inputs available to scripted error-bar options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptContext<'a> {
    pub dataset_index: usize,
    pub data_index: usize,
    pub raw: Option<&'a DataValue>,
}

pub type ScriptFn<T> = Arc<dyn Fn(&ScriptContext<'_>) -> StyleOption<T> + Send + Sync>;

/// Error-bar option as configured: a value, one value per data index, or a
/// closure evaluated per element.
///
/// JSON accepts the first two forms: a scalar or `{"v": [...]}` is a value,
/// a plain array is indexed by data index.
#[derive(Clone)]
pub enum Scriptable<T> {
    Value(StyleOption<T>),
    PerDataIndex(Vec<StyleOption<T>>),
    Script(ScriptFn<T>),
}

impl<T: Clone> Scriptable<T> {
    pub fn script(
        script: impl Fn(&ScriptContext<'_>) -> StyleOption<T> + Send + Sync + 'static,
    ) -> Self {
        Self::Script(Arc::new(script))
    }

    /// `None` only for an empty per-index list.
    #[must_use]
    pub fn resolve(&self, context: &ScriptContext<'_>) -> Option<StyleOption<T>> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::PerDataIndex(values) => {
                if values.is_empty() {
                    return None;
                }
                values.get(context.data_index % values.len()).cloned()
            }
            Self::Script(script) => Some(script(context)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scriptable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::PerDataIndex(values) => f.debug_tuple("PerDataIndex").field(values).finish(),
            Self::Script(_) => f.write_str("Script(..)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Scriptable<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::PerDataIndex(a), Self::PerDataIndex(b)) => a == b,
            (Self::Script(a), Self::Script(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ScriptableRef<'a, T> {
    Value(&'a StyleOption<T>),
    PerDataIndex(&'a [StyleOption<T>]),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptableRepr<T> {
    Value(StyleOption<T>),
    PerDataIndex(Vec<StyleOption<T>>),
}

impl<T: Serialize> Serialize for Scriptable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => ScriptableRef::Value(value).serialize(serializer),
            Self::PerDataIndex(values) => {
                ScriptableRef::PerDataIndex(values.as_slice()).serialize(serializer)
            }
            Self::Script(_) => Err(S::Error::custom("scripted options cannot be serialized")),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Scriptable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ScriptableRepr::deserialize(deserializer)? {
            ScriptableRepr::Value(value) => Self::Value(value),
            ScriptableRepr::PerDataIndex(values) => Self::PerDataIndex(values),
        })
    }
}

/// The six error-bar options under their configuration names. Unset fields
/// inherit from the next level (dataset, then chart, then defaults).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBarStyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_line_width: Option<Scriptable<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_color: Option<Scriptable<Color>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_whisker_line_width: Option<Scriptable<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_whisker_ratio: Option<Scriptable<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_whisker_size: Option<Scriptable<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bar_whisker_color: Option<Scriptable<Color>>,
}

impl ErrorBarStyleConfig {
    #[must_use]
    pub fn with_line_width(mut self, value: impl Into<Scriptable<f64>>) -> Self {
        self.error_bar_line_width = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, value: impl Into<Scriptable<Color>>) -> Self {
        self.error_bar_color = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_whisker_line_width(mut self, value: impl Into<Scriptable<f64>>) -> Self {
        self.error_bar_whisker_line_width = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_whisker_ratio(mut self, value: impl Into<Scriptable<f64>>) -> Self {
        self.error_bar_whisker_ratio = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_whisker_size(mut self, value: impl Into<Scriptable<f64>>) -> Self {
        self.error_bar_whisker_size = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_whisker_color(mut self, value: impl Into<Scriptable<Color>>) -> Self {
        self.error_bar_whisker_color = Some(value.into());
        self
    }
}

impl<T> From<T> for Scriptable<T> {
    fn from(value: T) -> Self {
        Self::Value(StyleOption::Fixed(value))
    }
}

/// Resolves the effective style of one element: dataset options win over
/// chart options, which win over the built-in defaults.
#[must_use]
pub fn resolve_error_bar_style(
    dataset: &ErrorBarStyleConfig,
    chart: &ErrorBarStyleConfig,
    context: &ScriptContext<'_>,
) -> ErrorBarStyle {
    fn pick<T: Clone>(
        dataset: Option<&Scriptable<T>>,
        chart: Option<&Scriptable<T>>,
        context: &ScriptContext<'_>,
        fallback: StyleOption<T>,
    ) -> StyleOption<T> {
        dataset
            .and_then(|option| option.resolve(context))
            .or_else(|| chart.and_then(|option| option.resolve(context)))
            .unwrap_or(fallback)
    }

    let defaults = ErrorBarStyle::default();
    ErrorBarStyle {
        line_width: pick(
            dataset.error_bar_line_width.as_ref(),
            chart.error_bar_line_width.as_ref(),
            context,
            defaults.line_width,
        ),
        color: pick(
            dataset.error_bar_color.as_ref(),
            chart.error_bar_color.as_ref(),
            context,
            defaults.color,
        ),
        whisker_line_width: pick(
            dataset.error_bar_whisker_line_width.as_ref(),
            chart.error_bar_whisker_line_width.as_ref(),
            context,
            defaults.whisker_line_width,
        ),
        whisker_ratio: pick(
            dataset.error_bar_whisker_ratio.as_ref(),
            chart.error_bar_whisker_ratio.as_ref(),
            context,
            defaults.whisker_ratio,
        ),
        whisker_size: pick(
            dataset.error_bar_whisker_size.as_ref(),
            chart.error_bar_whisker_size.as_ref(),
            context,
            defaults.whisker_size,
        ),
        whisker_color: pick(
            dataset.error_bar_whisker_color.as_ref(),
            chart.error_bar_whisker_color.as_ref(),
            context,
            defaults.whisker_color,
        ),
    }
}
