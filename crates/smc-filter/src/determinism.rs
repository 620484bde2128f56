use smc_core::derive_substream_seed;

/// Derives the seed for the initial particle draw from the prior.
pub fn init_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 0)
}

/// Derives the seed for the multinomial resampling pass triggered after
/// the given number of observations.
pub fn resample_seed(master_seed: u64, observation_count: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0x5EED_5A5A_5EED_5A5A, observation_count as u64)
}

/// Derives the seed for the Metropolis-Hastings move pass triggered after
/// the given number of observations.
pub fn move_seed(master_seed: u64, observation_count: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0xA5A5_A5A5_A5A5_A5A5, observation_count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substreams_do_not_collide() {
        let master = 2024;
        let mut seeds = vec![init_seed(master)];
        for count in 1..=16 {
            seeds.push(resample_seed(master, count));
            seeds.push(move_seed(master, count));
        }
        let unique: std::collections::BTreeSet<_> = seeds.iter().copied().collect();
        assert_eq!(unique.len(), seeds.len());
    }
}
