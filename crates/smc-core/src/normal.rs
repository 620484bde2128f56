//! Scalar normal-density helpers used by priors and demo likelihoods.

use std::f64::consts::PI;

/// Density of the normal distribution with the given mean and standard
/// deviation, evaluated at `x`.
pub fn pdf(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    (-0.5 * z * z).exp() / (sd * (2.0 * PI).sqrt())
}

/// Log-density of the normal distribution, computed directly in log space.
///
/// Evaluating `pdf(..).ln()` underflows to `-inf` for moderately extreme
/// arguments; the direct form stays finite wherever the quadratic term does.
pub fn log_pdf(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    -0.5 * (2.0 * PI).ln() - sd.ln() - 0.5 * z * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_pdf_matches_pdf_in_the_bulk() {
        for &x in &[-2.0, -0.5, 0.0, 0.7, 3.0] {
            let direct = log_pdf(x, 0.5, 1.5);
            let via_pdf = pdf(x, 0.5, 1.5).ln();
            assert!((direct - via_pdf).abs() < 1e-12);
        }
    }

    #[test]
    fn log_pdf_stays_finite_in_the_tails() {
        let tail = log_pdf(1e4, 0.0, 1.0);
        assert!(tail.is_finite());
        assert!(pdf(1e4, 0.0, 1.0) == 0.0);
    }

    #[test]
    fn standard_normal_mode_density() {
        assert!((pdf(0.0, 0.0, 1.0) - 0.3989422804014327).abs() < 1e-15);
    }
}
