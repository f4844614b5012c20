use crate::core::style_option::StyleOption;

/// Half-length of the whisker caps of bar `index`.
///
/// With an element extent (bar width, bar height) and a positive ratio the
/// cap scales with the element; otherwise the absolute whisker size is used.
/// Results that are not finite and positive collapse to a zero-width cap.
#[must_use]
pub fn whisker_half_size(
    total_extent: Option<f64>,
    ratio: &StyleOption<f64>,
    size: &StyleOption<f64>,
    index: usize,
) -> f64 {
    let ratio = ratio.resolve(index).unwrap_or(0.0);
    let half = match total_extent {
        Some(extent) if extent.is_finite() && ratio > 0.0 => extent.abs() * ratio * 0.5,
        _ => size.resolve(index).unwrap_or(0.0) * 0.5,
    };
    if half.is_finite() && half > 0.0 {
        half
    } else {
        0.0
    }
}
