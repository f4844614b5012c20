//! Animation interpolation for error-bar properties.
//!
//! Two families: numbers (range bounds, widths, ratios, sizes) and colors.
//! Both operate element-wise over scalar-or-list shapes and fall back to the
//! target value when the shapes do not line up.

use crate::core::range::RangeValue;
use crate::core::style_option::StyleOption;
use crate::render::Color;

/// Linear blend; equal endpoints return `to` unchanged.
#[must_use]
pub fn interpolate_number(from: f64, to: f64, factor: f64) -> f64 {
    if from == to {
        return to;
    }
    from + (to - from) * factor
}

/// Color blend; a missing side is treated as transparent.
#[must_use]
pub fn interpolate_color(from: Option<Color>, to: Option<Color>, factor: f64) -> Color {
    let from = from.unwrap_or(Color::TRANSPARENT);
    let to = to.unwrap_or(Color::TRANSPARENT);
    if from == to {
        return to;
    }
    Color::blend(from, to, factor)
}

/// Blends two range values when their shapes match, otherwise yields `to`.
#[must_use]
pub fn interpolate_range(from: &RangeValue, to: &RangeValue, factor: f64) -> RangeValue {
    match (from, to) {
        (RangeValue::Single(from), RangeValue::Single(to)) => {
            RangeValue::Single(interpolate_number(*from, *to, factor))
        }
        (RangeValue::Multi(from), RangeValue::Multi(to)) if from.len() == to.len() => {
            RangeValue::Multi(
                from.iter()
                    .zip(to)
                    .map(|(f, t)| interpolate_number(*f, *t, factor))
                    .collect(),
            )
        }
        _ => to.clone(),
    }
}

/// Optional range: both sides must be present to blend.
#[must_use]
pub fn interpolate_optional_range(
    from: Option<&RangeValue>,
    to: Option<&RangeValue>,
    factor: f64,
) -> Option<RangeValue> {
    match (from, to) {
        (Some(from), Some(to)) => Some(interpolate_range(from, to, factor)),
        _ => to.cloned(),
    }
}

/// Element-wise blend of two style options with the same shape.
#[must_use]
pub fn interpolate_style_option<T: Clone>(
    from: &StyleOption<T>,
    to: &StyleOption<T>,
    factor: f64,
    blend: impl Fn(&T, &T, f64) -> T,
) -> StyleOption<T> {
    match (from, to) {
        (StyleOption::Fixed(from), StyleOption::Fixed(to)) => {
            StyleOption::Fixed(blend(from, to, factor))
        }
        (StyleOption::Cycling { values: from }, StyleOption::Cycling { values: to })
            if from.len() == to.len() =>
        {
            StyleOption::cycling(
                from.iter()
                    .zip(to)
                    .map(|(f, t)| blend(f, t, factor))
                    .collect::<Vec<_>>(),
            )
        }
        _ => to.clone(),
    }
}

/// Numeric style option (line widths, ratios, sizes).
#[must_use]
pub fn interpolate_number_option(
    from: &StyleOption<f64>,
    to: &StyleOption<f64>,
    factor: f64,
) -> StyleOption<f64> {
    interpolate_style_option(from, to, factor, |f, t, k| interpolate_number(*f, *t, k))
}

/// Color style option.
#[must_use]
pub fn interpolate_color_option(
    from: &StyleOption<Color>,
    to: &StyleOption<Color>,
    factor: f64,
) -> StyleOption<Color> {
    interpolate_style_option(from, to, factor, |f, t, k| {
        interpolate_color(Some(*f), Some(*t), k)
    })
}

/// Types whose state can be blended between two animation keyframes.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, factor: f64) -> Self;
}

#[cfg(test)]
mod tests {
    use super::{
        interpolate_color, interpolate_number, interpolate_number_option, interpolate_range,
    };
    use crate::core::range::RangeValue;
    use crate::core::style_option::StyleOption;
    use crate::render::Color;

    #[test]
    fn number_blend_hits_endpoints() {
        assert_eq!(interpolate_number(2.0, 6.0, 0.0), 2.0);
        assert_eq!(interpolate_number(2.0, 6.0, 0.5), 4.0);
        assert_eq!(interpolate_number(2.0, 6.0, 1.0), 6.0);
    }

    #[test]
    fn color_blend_hits_endpoints() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        assert_eq!(interpolate_color(Some(red), Some(blue), 0.0), red);
        assert_eq!(interpolate_color(Some(red), Some(blue), 1.0), blue);
        let mid = interpolate_color(Some(red), Some(blue), 0.5);
        assert!((mid.red - 0.5).abs() < 1e-12 && (mid.blue - 0.5).abs() < 1e-12);
    }

    #[test]
    fn missing_color_fades_from_transparent() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let start = interpolate_color(None, Some(red), 0.0);
        assert_eq!(start.alpha, 0.0);
        assert_eq!(interpolate_color(None, Some(red), 1.0), red);
    }

    #[test]
    fn arrays_blend_element_wise_or_pass_through() {
        let from = RangeValue::Multi(vec![0.0, 10.0]);
        let to = RangeValue::Multi(vec![10.0, 20.0]);
        assert_eq!(
            interpolate_range(&from, &to, 0.5),
            RangeValue::Multi(vec![5.0, 15.0])
        );

        let mismatched = RangeValue::Multi(vec![1.0, 2.0, 3.0]);
        assert_eq!(interpolate_range(&from, &mismatched, 0.5), mismatched);
        assert_eq!(
            interpolate_range(&RangeValue::Single(1.0), &to, 0.5),
            to
        );
    }

    #[test]
    fn cycling_options_blend_per_entry() {
        let from = StyleOption::cycling(vec![1.0, 3.0]);
        let to = StyleOption::cycling(vec![3.0, 5.0]);
        assert_eq!(
            interpolate_number_option(&from, &to, 0.5),
            StyleOption::cycling(vec![2.0, 4.0])
        );
    }
}
