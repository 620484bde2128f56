use proptest::prelude::*;

use smc_core::{categorical_index, RngHandle};

proptest! {
    #[test]
    fn sampled_index_is_always_in_range(
        weights in prop::collection::vec(0.0f64..10.0, 1..32),
        seed in any::<u64>(),
    ) {
        let mut rng = RngHandle::from_seed(seed);
        match categorical_index(&weights, &mut rng) {
            Ok(index) => prop_assert!(index < weights.len()),
            Err(_) => prop_assert!(weights.iter().sum::<f64>() <= 0.0),
        }
    }

    #[test]
    fn point_mass_selects_its_position(
        (len, position) in (1usize..24).prop_flat_map(|len| (Just(len), 0..len)),
        seed in any::<u64>(),
    ) {
        let mut weights = vec![0.0; len];
        weights[position] = 1.0;
        let mut rng = RngHandle::from_seed(seed);
        prop_assert_eq!(categorical_index(&weights, &mut rng).unwrap(), position);
    }
}
