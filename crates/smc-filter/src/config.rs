use serde::{Deserialize, Serialize};

/// Settings governing the rejuvenation behaviour of a filter run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Rejuvenation trigger as a fraction of the particle count: the
    /// resample-move step runs whenever `ess / n < resampling_limit`.
    /// Values at or below 0 disable rejuvenation entirely; values at or
    /// above 1 force it after every observation.
    #[serde(default = "default_resampling_limit")]
    pub resampling_limit: f64,
    /// Proposal distribution used by the move step.
    #[serde(default)]
    pub proposal: ProposalKind,
    /// Absolute effective-sample-size floor below which an advisory event
    /// is recorded. Telemetry only; never alters control flow.
    #[serde(default = "default_ess_warning_floor")]
    pub ess_warning_floor: f64,
}

fn default_resampling_limit() -> f64 {
    0.5
}

fn default_ess_warning_floor() -> f64 {
    10.0
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            resampling_limit: default_resampling_limit(),
            proposal: ProposalKind::default(),
            ess_warning_floor: default_ess_warning_floor(),
        }
    }
}

/// Supported move-step proposal distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    /// Per-dimension independent normal built from the weighted marginal
    /// mean and standard deviation snapshotted before resampling.
    Gaussian,
    /// Per-dimension uniform over the current particle set's observed
    /// min/max range, ignoring particle weights.
    Uniform,
}

impl Default for ProposalKind {
    fn default() -> Self {
        ProposalKind::Gaussian
    }
}
