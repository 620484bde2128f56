//! The inference-model capability and its independent-normal prior.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SmcError};
use crate::normal;

/// Independent normal prior over each dimension of the parameter vector.
///
/// Validated on construction and immutable afterwards: a model carries
/// exactly one prior for its whole lifetime, so "replacing the prior" is
/// unrepresentable rather than silently overwriting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorSpec {
    means: Vec<f64>,
    sds: Vec<f64>,
}

impl PriorSpec {
    /// Builds a prior from per-dimension means and standard deviations.
    ///
    /// Fails with a [`SmcError::Config`] error when the vectors are empty or
    /// of unequal length, when any mean is non-finite, or when any standard
    /// deviation is not strictly positive.
    pub fn new(means: Vec<f64>, sds: Vec<f64>) -> Result<Self, SmcError> {
        if means.is_empty() {
            return Err(SmcError::Config(ErrorInfo::new(
                "prior-empty",
                "prior must describe at least one parameter dimension",
            )));
        }
        if means.len() != sds.len() {
            return Err(SmcError::Config(
                ErrorInfo::new(
                    "prior-length-mismatch",
                    "prior means and standard deviations imply different dimensionalities",
                )
                .with_context("means", means.len().to_string())
                .with_context("sds", sds.len().to_string()),
            ));
        }
        if let Some(mean) = means.iter().find(|m| !m.is_finite()) {
            return Err(SmcError::Config(
                ErrorInfo::new("prior-mean-nonfinite", "prior mean was infinite or NaN")
                    .with_context("mean", mean.to_string()),
            ));
        }
        if let Some(sd) = sds.iter().find(|s| !(**s > 0.0) || !s.is_finite()) {
            return Err(SmcError::Config(
                ErrorInfo::new(
                    "prior-sd-nonpositive",
                    "prior standard deviation must be strictly positive and finite",
                )
                .with_context("sd", sd.to_string()),
            ));
        }
        Ok(Self { means, sds })
    }

    /// Per-dimension prior means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-dimension prior standard deviations.
    pub fn sds(&self) -> &[f64] {
        &self.sds
    }

    /// Number of parameter dimensions described by the prior.
    pub fn dimension(&self) -> usize {
        self.means.len()
    }

    /// Sum of per-dimension independent normal log-densities at `theta`.
    pub fn log_density(&self, theta: &[f64]) -> f64 {
        self.means
            .iter()
            .zip(&self.sds)
            .zip(theta)
            .map(|((mean, sd), value)| normal::log_pdf(*value, *mean, *sd))
            .sum()
    }
}

/// Capability implemented by user-supplied statistical models.
///
/// A model owns its validated [`PriorSpec`] and defines the log-likelihood
/// of a batch of observations given a parameter vector. The observation
/// type is opaque to the filter engine, which only ever forwards slices of
/// it back to the model. Note the sign convention: `log_likelihood` is the
/// log-likelihood, not the negative log-likelihood.
pub trait InferenceModel: Send + Sync {
    /// Data-point type this model knows how to score.
    type Observation: Send + Sync;

    /// Log-likelihood of the observations under parameter vector `theta`.
    fn log_likelihood(&self, observations: &[Self::Observation], theta: &[f64]) -> f64;

    /// The model's validated prior.
    fn prior(&self) -> &PriorSpec;

    /// Log-density of the prior at `theta`.
    fn log_prior(&self, theta: &[f64]) -> f64 {
        self.prior().log_density(theta)
    }

    /// Number of parameter dimensions, equal to the prior's length.
    fn dimension(&self) -> usize {
        self.prior().dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_prior_lengths_are_rejected() {
        let err = PriorSpec::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(err.info().code, "prior-length-mismatch");
    }

    #[test]
    fn nonfinite_means_are_rejected() {
        let err = PriorSpec::new(vec![f64::NAN], vec![1.0]).unwrap_err();
        assert_eq!(err.info().code, "prior-mean-nonfinite");
        let err = PriorSpec::new(vec![f64::INFINITY], vec![1.0]).unwrap_err();
        assert_eq!(err.info().code, "prior-mean-nonfinite");
    }

    #[test]
    fn nonpositive_sds_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = PriorSpec::new(vec![0.0], vec![bad]).unwrap_err();
            assert_eq!(err.info().code, "prior-sd-nonpositive");
        }
    }

    #[test]
    fn empty_prior_is_rejected() {
        let err = PriorSpec::new(Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err.info().code, "prior-empty");
    }

    #[test]
    fn log_density_sums_per_dimension_terms() {
        let prior = PriorSpec::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
        let expected = crate::normal::log_pdf(0.5, 0.0, 1.0) + crate::normal::log_pdf(-1.0, 1.0, 2.0);
        assert!((prior.log_density(&[0.5, -1.0]) - expected).abs() < 1e-12);
    }
}
