//! Tooltip label text for entries with error ranges.
//!
//! Bounds are printed the way they were configured. An array of minimums is
//! printed in reverse order, maximums as given.

use crate::core::{Axis, DataValue, ParsedPoint, RangeValue};

/// Entry a tooltip is shown for.
#[derive(Debug, Clone, Copy)]
pub struct TooltipItem<'a> {
    pub dataset_index: usize,
    pub data_index: usize,
    pub dataset_label: Option<&'a str>,
    /// Category label at `data_index`, when the chart has labels.
    pub label: Option<&'a str>,
    pub raw: Option<&'a DataValue>,
    pub parsed: &'a ParsedPoint,
    /// Set for bars laid out along X.
    pub horizontal: bool,
}

/// `"{label}: {value} ({min} .. {max})"` for bar and line charts; the value
/// and bound keys follow the bar orientation.
#[must_use]
pub fn bar_label(item: &TooltipItem<'_>) -> String {
    let axis = if item.horizontal { Axis::X } else { Axis::Y };
    let value = format_value(item.parsed.value(axis));
    let base = match item.dataset_label.filter(|label| !label.is_empty()) {
        Some(label) => format!("{label}: {value}"),
        None => value,
    };
    match bounds_text(item.raw, axis) {
        Some((min, max)) => format!("{base} ({min} .. {max})"),
        None => base,
    }
}

/// `"({x} [{min} .. {max}], {y} [{min} .. {max}])"`; an axis without error
/// data shows its value alone.
#[must_use]
pub fn scatter_label(item: &TooltipItem<'_>) -> String {
    let sub_label = |base: String, axis: Axis| match bounds_text(item.raw, axis) {
        Some((min, max)) => format!("{base} [{min} .. {max}]"),
        None => base,
    };
    format!(
        "({}, {})",
        sub_label(format_value(item.parsed.x), Axis::X),
        sub_label(plain_number(item.parsed.y), Axis::Y)
    )
}

/// `"{label}: {value} [{min} .. {max}]"` for polar-area slices.
#[must_use]
pub fn polar_label(item: &TooltipItem<'_>) -> String {
    let base = format!(
        "{}: {}",
        item.label.unwrap_or_default(),
        format_value(item.parsed.r)
    );
    match bounds_text(item.raw, Axis::R) {
        Some((min, max)) => format!("{base} [{min} .. {max}]"),
        None => base,
    }
}

fn bounds_text(raw: Option<&DataValue>, axis: Axis) -> Option<(String, String)> {
    let (min, max) = raw?.bounds(axis);
    if min.is_none() && max.is_none() {
        return None;
    }
    Some((
        min.map(|range| range_text(range, true)).unwrap_or_default(),
        max.map(|range| range_text(range, false)).unwrap_or_default(),
    ))
}

/// Bound as text; arrays are comma-joined, optionally reversed.
#[must_use]
pub fn range_text(range: &RangeValue, reverse: bool) -> String {
    let mut values: Vec<String> = range.as_slice().iter().map(|v| plain_number(*v)).collect();
    if reverse {
        values.reverse();
    }
    values.join(",")
}

/// Plain number text: integers without a fraction, shortest round-trip
/// digits otherwise.
#[must_use]
pub fn plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_owned()
    } else {
        format!("{value}")
    }
}

/// Display text of a scale value: at most three fraction digits and
/// thousands separators.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}
