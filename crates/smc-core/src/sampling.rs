//! Random-variate utilities: standard-normal deviates and categorical
//! index sampling over unnormalized weight vectors.

use crate::errors::{ErrorInfo, SmcError};
use crate::rng::RngHandle;

use std::f64::consts::PI;

/// Returns a uniform draw from the open unit interval `(0, 1)`.
///
/// The draw can never be exactly zero, so `ln()` of the result is always
/// finite. Used for Box-Muller and Metropolis acceptance draws.
pub fn uniform_open01(rng: &mut RngHandle) -> f64 {
    use rand::RngCore;
    // Offset by half an ulp of the 53-bit lattice to exclude both endpoints.
    ((rng.next_u64() >> 11) as f64 + 0.5) / (1u64 << 53) as f64
}

/// Draws from the standard normal distribution via the Box-Muller transform.
pub fn standard_normal(rng: &mut RngHandle) -> f64 {
    let u1 = uniform_open01(rng);
    let u2 = uniform_open01(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Samples an index from the categorical distribution described by
/// `weights`.
///
/// Weights are assumed non-negative and need not sum to one; they are
/// normalized internally. The final cumulative value is forced to exactly
/// 1.0 so floating-point shortfall cannot push the scan past the end. An
/// all-zero or non-finite weight vector is a degenerate input and raises a
/// [`SmcError::Sampling`] error instead of looping or returning an invalid
/// index.
pub fn categorical_index(weights: &[f64], rng: &mut RngHandle) -> Result<usize, SmcError> {
    if weights.is_empty() {
        return Err(SmcError::Sampling(ErrorInfo::new(
            "categorical-empty",
            "cannot sample an index from an empty weight vector",
        )));
    }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(SmcError::Sampling(
            ErrorInfo::new(
                "categorical-degenerate",
                "categorical weights must have a positive finite total",
            )
            .with_context("total", total.to_string())
            .with_context("len", weights.len().to_string()),
        ));
    }

    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for &w in weights {
        acc += w / total;
        cumulative.push(acc);
    }
    if let Some(last) = cumulative.last_mut() {
        *last = 1.0;
    }

    let draw = uniform_open01(rng);
    for (index, &q) in cumulative.iter().enumerate() {
        if draw <= q {
            return Ok(index);
        }
    }
    // Unreachable: the last cumulative entry is exactly 1.0 and draw < 1.
    Ok(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_mass_always_selects_its_index() {
        let mut rng = RngHandle::from_seed(11);
        for _ in 0..200 {
            assert_eq!(categorical_index(&[0.0, 0.0, 1.0, 0.0], &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let mut rng = RngHandle::from_seed(3);
        let err = categorical_index(&[0.0, 0.0, 0.0], &mut rng).unwrap_err();
        assert!(matches!(err, SmcError::Sampling(_)));
        assert_eq!(err.info().code, "categorical-degenerate");
    }

    #[test]
    fn empty_weights_are_rejected() {
        let mut rng = RngHandle::from_seed(3);
        assert!(categorical_index(&[], &mut rng).is_err());
    }

    #[test]
    fn unnormalized_weights_are_accepted() {
        let mut rng = RngHandle::from_seed(29);
        let mut counts = [0usize; 3];
        for _ in 0..6000 {
            counts[categorical_index(&[1.0, 2.0, 1.0], &mut rng).unwrap()] += 1;
        }
        // Middle index carries half the mass.
        assert!(counts[1] > counts[0]);
        assert!(counts[1] > counts[2]);
        assert!((counts[1] as f64 / 6000.0 - 0.5).abs() < 0.05);
    }

    #[test]
    fn standard_normal_moments_are_roughly_correct() {
        let mut rng = RngHandle::from_seed(7);
        let draws: Vec<f64> = (0..20_000).map(|_| standard_normal(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>()
            / draws.len() as f64;
        assert!(mean.abs() < 0.03);
        assert!((var - 1.0).abs() < 0.05);
    }

    #[test]
    fn open_uniform_never_hits_the_endpoints() {
        let mut rng = RngHandle::from_seed(5);
        for _ in 0..10_000 {
            let u = uniform_open01(&mut rng);
            assert!(u > 0.0 && u < 1.0);
            assert!(u.ln().is_finite());
        }
    }
}
