//! Property tests for the entropy estimate.

use data_entropy::{estimate, EstimateError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn unique_never_exceeds_total(data in prop::collection::vec(any::<i32>(), 1..500)) {
        let est = estimate(&data).unwrap();
        prop_assert!(est.unique_entropy() <= est.total_entropy());
        prop_assert!(est.unique_entropy() >= 0.0);
        prop_assert!(est.distinct_count() <= est.total_count());
    }

    #[test]
    fn float_unique_never_exceeds_total(data in prop::collection::vec(-1e6f64..1e6, 1..500)) {
        let est = estimate(&data).unwrap();
        prop_assert!(est.unique_entropy() <= est.total_entropy());
    }

    #[test]
    fn estimate_is_deterministic(data in prop::collection::vec(any::<u16>(), 1..500)) {
        prop_assert_eq!(estimate(&data), estimate(&data));
    }

    #[test]
    fn order_does_not_matter(
        (data, shuffled) in prop::collection::vec(0u8..32, 1..300)
            .prop_flat_map(|data| (Just(data.clone()), Just(data).prop_shuffle())),
    ) {
        prop_assert_eq!(estimate(&data).unwrap(), estimate(&shuffled).unwrap());
    }

    #[test]
    fn float_order_does_not_matter(
        (data, shuffled) in prop::collection::vec(
            prop_oneof![(0u16..64).prop_map(f64::from), -1e3f64..1e3],
            1..300,
        )
        .prop_flat_map(|data| (Just(data.clone()), Just(data).prop_shuffle())),
    ) {
        prop_assert_eq!(estimate(&data).unwrap(), estimate(&shuffled).unwrap());
    }

    #[test]
    fn total_entropy_depends_only_on_length(len in 1usize..2000) {
        let est = estimate(&vec![0u8; len]).unwrap();
        prop_assert_eq!(est.unique_entropy(), 0.0);
        prop_assert!((est.total_entropy() - (len as f64).log2()).abs() < 1e-12);
    }

    #[test]
    fn any_nan_is_rejected(
        data in prop::collection::vec(-100.0f64..100.0, 1..100),
        at in 0usize..100,
    ) {
        let mut data = data;
        let index = at % data.len();
        data[index] = f64::NAN;

        let rejected = matches!(
            estimate(&data),
            Err(EstimateError::InvalidInput { index: i, .. }) if i == index
        );
        prop_assert!(rejected);
    }
}
