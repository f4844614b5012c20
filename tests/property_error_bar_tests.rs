use chart_error_bars::core::{RangeValue, StyleOption, resolve_pairs, whisker_half_size};
use proptest::prelude::*;

fn range_value() -> impl Strategy<Value = RangeValue> {
    prop_oneof![
        (-1_000.0f64..1_000.0).prop_map(RangeValue::Single),
        prop::collection::vec(-1_000.0f64..1_000.0, 1..6).prop_map(RangeValue::Multi),
    ]
}

proptest! {
    #[test]
    fn pairs_take_the_longer_side_and_wrap_the_shorter(
        low in range_value(),
        high in range_value()
    ) {
        let pairs = resolve_pairs(&low, &high);
        let lows = low.as_slice();
        let highs = high.as_slice();

        prop_assert_eq!(pairs.len(), lows.len().max(highs.len()));
        for (index, &(l, h)) in pairs.iter().enumerate() {
            prop_assert_eq!(l, lows[index % lows.len()]);
            prop_assert_eq!(h, highs[index % highs.len()]);
        }
    }

    #[test]
    fn cycling_style_wraps_by_index(
        values in prop::collection::vec(0.0f64..50.0, 1..8),
        index in 0usize..100
    ) {
        let option = StyleOption::cycling(values.clone());
        prop_assert_eq!(option.resolve(index), Some(values[index % values.len()]));
    }

    #[test]
    fn whisker_half_size_is_never_negative_or_infinite(
        extent in prop::option::of(prop::num::f64::ANY),
        ratio in prop::num::f64::ANY,
        size in prop::num::f64::ANY,
        index in 0usize..4
    ) {
        let half = whisker_half_size(
            extent,
            &StyleOption::Fixed(ratio),
            &StyleOption::Fixed(size),
            index,
        );
        prop_assert!(half.is_finite());
        prop_assert!(half >= 0.0);
    }

    #[test]
    fn positive_ratio_scales_with_extent(
        extent in 1.0f64..500.0,
        ratio in 0.01f64..1.0
    ) {
        let half = whisker_half_size(
            Some(extent),
            &StyleOption::Fixed(ratio),
            &StyleOption::Fixed(99.0),
            0,
        );
        prop_assert!((half - extent * ratio * 0.5).abs() <= 1e-9);
    }
}
