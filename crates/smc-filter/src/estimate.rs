use crate::particle::Particle;

/// Computes `ln(Σ exp(v))` with the max-shift trick, so large-magnitude
/// log-weights neither overflow nor underflow when exponentiated.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Effective sample size, `1 / Σ wᵢ²` over exponentiated weights. Can be
/// fractional; equals the particle count exactly when weights are uniform.
pub fn effective_sample_size(particles: &[Particle]) -> f64 {
    let sum_of_squares: f64 = particles
        .iter()
        .map(|p| {
            let w = p.weight();
            w * w
        })
        .sum();
    1.0 / sum_of_squares
}

/// Weighted marginal mean per dimension, `Σ θᵢ[d] · wᵢ`.
pub fn weighted_means(particles: &[Particle], dimension: usize) -> Vec<f64> {
    let mut means = vec![0.0; dimension];
    for particle in particles {
        let w = particle.weight();
        for (mean, value) in means.iter_mut().zip(&particle.theta) {
            *mean += value * w;
        }
    }
    means
}

/// Weighted marginal standard deviation per dimension around the supplied
/// means. Population formula: the implicit total weight of one is the
/// divisor, not `n - 1`.
pub fn weighted_sds(particles: &[Particle], means: &[f64]) -> Vec<f64> {
    let mut variances = vec![0.0; means.len()];
    for particle in particles {
        let w = particle.weight();
        for ((variance, mean), value) in variances.iter_mut().zip(means).zip(&particle.theta) {
            let deviation = value - mean;
            *variance += deviation * deviation * w;
        }
    }
    variances.iter().map(|v| v.sqrt()).collect()
}
