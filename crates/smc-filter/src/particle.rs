use serde::{Deserialize, Serialize};

/// A weighted point of the Monte Carlo posterior approximation.
///
/// Weights are stored in logarithmic form. Cloning a particle produces an
/// independent copy of its parameter vector; two live particles never share
/// a theta buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Parameter vector, one entry per model dimension.
    pub theta: Vec<f64>,
    /// Natural logarithm of the particle's importance weight.
    pub log_weight: f64,
}

impl Particle {
    /// Creates a particle from a parameter vector and a log-weight.
    pub fn new(theta: Vec<f64>, log_weight: f64) -> Self {
        Self { theta, log_weight }
    }

    /// Returns the exponentiated weight.
    pub fn weight(&self) -> f64 {
        self.log_weight.exp()
    }
}

/// Log-weight assigned to every particle of a freshly drawn or rejuvenated
/// set of `count` particles, `ln(1/count)`.
pub fn uniform_log_weight(count: usize) -> f64 {
    (1.0 / count as f64).ln()
}
