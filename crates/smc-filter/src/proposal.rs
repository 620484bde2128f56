use smc_core::{standard_normal, uniform_open01, RngHandle};

use crate::particle::{uniform_log_weight, Particle};

/// Draws `count` particles with per-dimension independent normal thetas.
///
/// Used for the initial draw from the prior and as the default move-step
/// proposal (with the pre-resample marginal snapshot as parameters).
pub fn draw_from_normal(
    count: usize,
    means: &[f64],
    sds: &[f64],
    rng: &mut RngHandle,
) -> Vec<Particle> {
    let log_weight = uniform_log_weight(count);
    (0..count)
        .map(|_| {
            let theta = means
                .iter()
                .zip(sds)
                .map(|(mean, sd)| standard_normal(rng) * sd + mean)
                .collect();
            Particle::new(theta, log_weight)
        })
        .collect()
}

/// Draws `count` particles uniformly over the per-dimension min/max range
/// observed in `current`, ignoring particle weights.
pub fn draw_from_range(
    count: usize,
    current: &[Particle],
    dimension: usize,
    rng: &mut RngHandle,
) -> Vec<Particle> {
    let mut lower = vec![f64::INFINITY; dimension];
    let mut upper = vec![f64::NEG_INFINITY; dimension];
    for particle in current {
        for (d, value) in particle.theta.iter().enumerate() {
            if *value < lower[d] {
                lower[d] = *value;
            }
            if *value > upper[d] {
                upper[d] = *value;
            }
        }
    }

    let log_weight = uniform_log_weight(count);
    (0..count)
        .map(|_| {
            let theta = lower
                .iter()
                .zip(&upper)
                .map(|(lo, hi)| uniform_open01(rng) * (hi - lo) + lo)
                .collect();
            Particle::new(theta, log_weight)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_draws_have_the_requested_shape() {
        let mut rng = RngHandle::from_seed(17);
        let particles = draw_from_normal(32, &[0.0, 5.0], &[1.0, 0.1], &mut rng);
        assert_eq!(particles.len(), 32);
        for p in &particles {
            assert_eq!(p.theta.len(), 2);
            assert!((p.log_weight - (1.0f64 / 32.0).ln()).abs() < 1e-12);
        }
        // The tight second dimension should hug its mean.
        let spread = particles
            .iter()
            .map(|p| (p.theta[1] - 5.0).abs())
            .fold(0.0, f64::max);
        assert!(spread < 1.0);
    }

    #[test]
    fn range_draws_stay_inside_the_observed_envelope() {
        let mut rng = RngHandle::from_seed(23);
        let current: Vec<Particle> = [[-2.0, 1.0], [3.0, 1.5], [0.0, 1.2]]
            .iter()
            .map(|t| Particle::new(t.to_vec(), 0.0))
            .collect();
        let proposals = draw_from_range(64, &current, 2, &mut rng);
        for p in &proposals {
            assert!(p.theta[0] >= -2.0 && p.theta[0] <= 3.0);
            assert!(p.theta[1] >= 1.0 && p.theta[1] <= 1.5);
        }
    }
}
