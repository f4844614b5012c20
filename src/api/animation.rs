use crate::core::Interpolate;
use crate::elements::ErrorBarElement;

/// Elements at `progress` of the transition from `from` to `to`.
///
/// Entries are matched by data index; entries without a predecessor appear
/// in their final state. Non-finite progress is treated as complete.
#[must_use]
pub fn interpolate_elements(
    from: &[ErrorBarElement],
    to: &[ErrorBarElement],
    progress: f64,
) -> Vec<ErrorBarElement> {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        1.0
    };
    to.iter()
        .enumerate()
        .map(|(index, target)| match from.get(index) {
            Some(source) if progress < 1.0 => source.interpolate(target, progress),
            _ => target.clone(),
        })
        .collect()
}
