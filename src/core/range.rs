use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::ChartResult;

/// Resolved `(low, high)` pairs of one data point, in array order.
pub type BarPairs = SmallVec<[(f64, f64); 4]>;

/// Error-bar bound: one value, or several stacked values at one data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    Single(f64),
    Multi(Vec<f64>),
}

impl RangeValue {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Applies `f` to every value, keeping the scalar/array shape.
    pub fn try_map(&self, mut f: impl FnMut(f64) -> ChartResult<f64>) -> ChartResult<Self> {
        Ok(match self {
            Self::Single(value) => Self::Single(f(*value)?),
            Self::Multi(values) => {
                Self::Multi(values.iter().map(|v| f(*v)).collect::<ChartResult<_>>()?)
            }
        })
    }

    #[must_use]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        match self {
            Self::Single(value) => Self::Single(f(*value)),
            Self::Multi(values) => Self::Multi(values.iter().map(|v| f(*v)).collect()),
        }
    }
}

impl From<f64> for RangeValue {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<f64>> for RangeValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Multi(values)
    }
}

/// Pairs low and high bounds into the bars to draw.
///
/// Two scalars give one pair. Otherwise both sides are treated as arrays and
/// paired by position, wrapping the shorter side with `index % len`; the
/// result has the length of the longer side. An empty array yields no bars.
#[must_use]
pub fn resolve_pairs(low: &RangeValue, high: &RangeValue) -> BarPairs {
    if let (RangeValue::Single(low), RangeValue::Single(high)) = (low, high) {
        return smallvec![(*low, *high)];
    }

    let lows = low.as_slice();
    let highs = high.as_slice();
    if lows.is_empty() || highs.is_empty() {
        return BarPairs::new();
    }

    let count = lows.len().max(highs.len());
    (0..count)
        .map(|i| (lows[i % lows.len()], highs[i % highs.len()]))
        .collect()
}

/// Smallest value among the primary value and every finite lower bound.
#[must_use]
pub fn min_extremum(value: f64, bound: Option<&RangeValue>) -> f64 {
    fold_extremum(value, bound, f64::min)
}

/// Largest value among the primary value and every finite upper bound.
#[must_use]
pub fn max_extremum(value: f64, bound: Option<&RangeValue>) -> f64 {
    fold_extremum(value, bound, f64::max)
}

fn fold_extremum(value: f64, bound: Option<&RangeValue>, op: fn(f64, f64) -> f64) -> f64 {
    match bound {
        Some(bound) => bound
            .as_slice()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(value, op),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeValue, max_extremum, min_extremum, resolve_pairs};

    #[test]
    fn scalar_bounds_resolve_to_single_pair() {
        let pairs = resolve_pairs(&RangeValue::Single(5.0), &RangeValue::Single(10.0));
        assert_eq!(pairs.as_slice(), &[(5.0, 10.0)]);
    }

    #[test]
    fn equal_length_arrays_pair_positionally() {
        let pairs = resolve_pairs(
            &RangeValue::Multi(vec![1.0, 2.0, 3.0]),
            &RangeValue::Multi(vec![10.0, 20.0, 30.0]),
        );
        assert_eq!(pairs.as_slice(), &[(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]);
    }

    #[test]
    fn shorter_array_wraps_around() {
        let pairs = resolve_pairs(
            &RangeValue::Multi(vec![1.0, 2.0]),
            &RangeValue::Multi(vec![10.0, 20.0, 30.0]),
        );
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], (1.0, 30.0));
    }

    #[test]
    fn scalar_is_broadcast_against_array() {
        let pairs = resolve_pairs(
            &RangeValue::Single(4.0),
            &RangeValue::Multi(vec![6.0, 8.0]),
        );
        assert_eq!(pairs.as_slice(), &[(4.0, 6.0), (4.0, 8.0)]);
    }

    #[test]
    fn empty_array_resolves_to_nothing() {
        let pairs = resolve_pairs(&RangeValue::Multi(Vec::new()), &RangeValue::Single(3.0));
        assert!(pairs.is_empty());
    }

    #[test]
    fn extrema_include_primary_value() {
        let low = RangeValue::Multi(vec![2.0, 0.5]);
        assert_eq!(min_extremum(1.0, Some(&low)), 0.5);
        assert_eq!(min_extremum(0.2, Some(&low)), 0.2);
        assert_eq!(max_extremum(3.0, None), 3.0);
        assert_eq!(max_extremum(3.0, Some(&RangeValue::Single(7.0))), 7.0);
    }

    #[test]
    fn extrema_ignore_non_finite_bounds() {
        let low = RangeValue::Multi(vec![f64::NAN, f64::NEG_INFINITY, 1.0]);
        assert_eq!(min_extremum(3.0, Some(&low)), 1.0);
        let high = RangeValue::Multi(vec![f64::INFINITY, 2.0]);
        assert_eq!(max_extremum(3.0, Some(&high)), 3.0);
    }
}
