use serde::{Deserialize, Serialize};

use crate::core::range::{RangeValue, max_extremum, min_extremum};
use crate::core::scale::CategoryScale;
use crate::core::types::Axis;

/// One raw data entry: a bare primary value or an object with error ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Point(ErrorBarDatum),
}

impl DataValue {
    /// Error bounds carried for `axis`; bare numbers carry none.
    #[must_use]
    pub fn bounds(&self, axis: Axis) -> (Option<&RangeValue>, Option<&RangeValue>) {
        match self {
            Self::Number(_) => (None, None),
            Self::Point(datum) => datum.bounds(axis),
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<&ErrorBarDatum> {
        match self {
            Self::Point(datum) => Some(datum),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<ErrorBarDatum> for DataValue {
    fn from(datum: ErrorBarDatum) -> Self {
        Self::Point(datum)
    }
}

/// Object data point: primary values plus scalar-or-array min/max per axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBarDatum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_min: Option<RangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<RangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<RangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<RangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_min: Option<RangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_max: Option<RangeValue>,
}

impl ErrorBarDatum {
    /// Vertical error bar on a `y` value.
    #[must_use]
    pub fn y(y: f64, y_min: impl Into<RangeValue>, y_max: impl Into<RangeValue>) -> Self {
        Self {
            y: Some(y),
            y_min: Some(y_min.into()),
            y_max: Some(y_max.into()),
            ..Self::default()
        }
    }

    /// Horizontal error bar on an `x` value.
    #[must_use]
    pub fn x(x: f64, x_min: impl Into<RangeValue>, x_max: impl Into<RangeValue>) -> Self {
        Self {
            x: Some(x),
            x_min: Some(x_min.into()),
            x_max: Some(x_max.into()),
            ..Self::default()
        }
    }

    /// Radial error bar on an `r` value.
    #[must_use]
    pub fn r(r: f64, r_min: impl Into<RangeValue>, r_max: impl Into<RangeValue>) -> Self {
        Self {
            r: Some(r),
            r_min: Some(r_min.into()),
            r_max: Some(r_max.into()),
            ..Self::default()
        }
    }

    /// Adds X error data to a point built with [`ErrorBarDatum::y`].
    #[must_use]
    pub fn with_x(
        mut self,
        x: f64,
        x_min: impl Into<RangeValue>,
        x_max: impl Into<RangeValue>,
    ) -> Self {
        self.x = Some(x);
        self.x_min = Some(x_min.into());
        self.x_max = Some(x_max.into());
        self
    }

    #[must_use]
    pub fn value(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::R => self.r,
        }
    }

    #[must_use]
    pub fn bounds(&self, axis: Axis) -> (Option<&RangeValue>, Option<&RangeValue>) {
        match axis {
            Axis::X => (self.x_min.as_ref(), self.x_max.as_ref()),
            Axis::Y => (self.y_min.as_ref(), self.y_max.as_ref()),
            Axis::R => (self.r_min.as_ref(), self.r_max.as_ref()),
        }
    }
}

/// Error data of one axis after parsing, with the extrema that widen scales.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisErrorRange {
    pub min: Option<RangeValue>,
    pub max: Option<RangeValue>,
    pub min_min: f64,
    pub max_max: f64,
}

/// Parsed form of one data entry. Absent values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    x_range: Option<AxisErrorRange>,
    y_range: Option<AxisErrorRange>,
    r_range: Option<AxisErrorRange>,
}

impl Default for ParsedPoint {
    fn default() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            r: f64::NAN,
            x_range: None,
            y_range: None,
            r_range: None,
        }
    }
}

impl ParsedPoint {
    #[must_use]
    pub fn value(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::R => self.r,
        }
    }

    pub fn set_value(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::R => self.r = value,
        }
    }

    #[must_use]
    pub fn range(&self, axis: Axis) -> Option<&AxisErrorRange> {
        match axis {
            Axis::X => self.x_range.as_ref(),
            Axis::Y => self.y_range.as_ref(),
            Axis::R => self.r_range.as_ref(),
        }
    }

    pub fn set_range(&mut self, axis: Axis, range: AxisErrorRange) {
        let slot = match axis {
            Axis::X => &mut self.x_range,
            Axis::Y => &mut self.y_range,
            Axis::R => &mut self.r_range,
        };
        *slot = Some(range);
    }

    /// Lower extremum on `axis`; the value itself when no error data was parsed.
    #[must_use]
    pub fn min_min(&self, axis: Axis) -> f64 {
        self.range(axis)
            .map_or(self.value(axis), |range| range.min_min)
    }

    /// Upper extremum on `axis`; the value itself when no error data was parsed.
    #[must_use]
    pub fn max_max(&self, axis: Axis) -> f64 {
        self.range(axis)
            .map_or(self.value(axis), |range| range.max_max)
    }

    /// Whether any min/max bound was supplied on `axis`.
    #[must_use]
    pub fn has_error_bounds(&self, axis: Axis) -> bool {
        self.range(axis)
            .is_some_and(|range| range.min.is_some() || range.max.is_some())
    }
}

/// Copies `axisMin`/`axisMax` from the raw entries into `parsed` and computes
/// the extrema fields. `parsed[i]` corresponds to `data[start + i]`.
pub fn parse_error_number_data(
    parsed: &mut [ParsedPoint],
    axis: Axis,
    data: &[Option<DataValue>],
    start: usize,
) {
    for (offset, point) in parsed.iter_mut().enumerate() {
        let (min, max) = data
            .get(start + offset)
            .and_then(Option::as_ref)
            .map_or((None, None), |entry| entry.bounds(axis));
        let value = point.value(axis);
        point.set_range(
            axis,
            AxisErrorRange {
                min_min: min_extremum(value, min),
                max_max: max_extremum(value, max),
                min: min.cloned(),
                max: max.cloned(),
            },
        );
    }
}

/// Index-axis values of a label axis: the parsed label position.
pub fn parse_error_label_data(
    parsed: &mut [ParsedPoint],
    axis: Axis,
    scale: &CategoryScale,
    start: usize,
) {
    for (offset, point) in parsed.iter_mut().enumerate() {
        let index = start + offset;
        let label = scale.labels().get(index).map(String::as_str);
        point.set_value(axis, scale.parse(label, index));
    }
}

/// Data range of `axis` including every error bound, over the points for
/// which `visible` holds. `None` when no point has a usable value.
pub fn extrema_min_max(
    parsed: &[ParsedPoint],
    axis: Axis,
    visible: impl Fn(usize) -> bool,
) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for (index, point) in parsed.iter().enumerate() {
        if !point.value(axis).is_finite() || !visible(index) {
            continue;
        }
        let (low, high) = (point.min_min(axis), point.max_max(axis));
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(low), max.max(high)),
            None => (low, high),
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::{
        DataValue, ErrorBarDatum, ParsedPoint, extrema_min_max, parse_error_label_data,
        parse_error_number_data,
    };
    use crate::core::range::RangeValue;
    use crate::core::scale::CategoryScale;
    use crate::core::types::Axis;

    #[test]
    fn json_datum_accepts_scalar_and_array_bounds() {
        let data: Vec<Option<DataValue>> = serde_json::from_str(
            r#"[{"y": 4, "yMin": 1, "yMax": [6, 8]}, 3, null]"#,
        )
        .expect("parse");
        assert_eq!(
            data[0],
            Some(DataValue::Point(ErrorBarDatum::y(
                4.0,
                1.0,
                vec![6.0, 8.0]
            )))
        );
        assert_eq!(data[1], Some(DataValue::Number(3.0)));
        assert_eq!(data[2], None);
    }

    #[test]
    fn number_parsing_fills_extrema() {
        let data = vec![
            Some(DataValue::from(ErrorBarDatum::y(4.0, vec![1.0, 2.0], 6.0))),
            Some(DataValue::Number(3.0)),
        ];
        let mut parsed = vec![ParsedPoint::default(), ParsedPoint::default()];
        parsed[0].y = 4.0;
        parsed[1].y = 3.0;
        parse_error_number_data(&mut parsed, Axis::Y, &data, 0);

        let range = parsed[0].range(Axis::Y).expect("range");
        assert_eq!(range.min, Some(RangeValue::Multi(vec![1.0, 2.0])));
        assert_eq!((range.min_min, range.max_max), (1.0, 6.0));
        assert!(!parsed[1].has_error_bounds(Axis::Y));
        assert_eq!(parsed[1].min_min(Axis::Y), 3.0);
    }

    #[test]
    fn label_parsing_uses_label_positions() {
        let scale = CategoryScale::new(vec!["A".to_owned(), "B".to_owned()], true);
        let mut parsed = vec![ParsedPoint::default(), ParsedPoint::default()];
        parse_error_label_data(&mut parsed, Axis::X, &scale, 0);
        assert_eq!((parsed[0].x, parsed[1].x), (0.0, 1.0));
        assert!(parsed[0].range(Axis::X).is_none());
    }

    #[test]
    fn min_max_spans_error_bounds_of_visible_points() {
        let data = vec![
            Some(DataValue::from(ErrorBarDatum::y(4.0, 1.0, 6.0))),
            Some(DataValue::from(ErrorBarDatum::y(2.0, -3.0, 9.0))),
        ];
        let mut parsed = vec![ParsedPoint::default(), ParsedPoint::default()];
        parsed[0].y = 4.0;
        parsed[1].y = 2.0;
        parse_error_number_data(&mut parsed, Axis::Y, &data, 0);

        assert_eq!(extrema_min_max(&parsed, Axis::Y, |_| true), Some((-3.0, 9.0)));
        assert_eq!(extrema_min_max(&parsed, Axis::Y, |i| i == 0), Some((1.0, 6.0)));
        assert_eq!(extrema_min_max(&parsed, Axis::X, |_| true), None);
    }
}
