#![deny(missing_docs)]

//! Resample-move sequential Monte Carlo particle filter.
//!
//! The filter maintains a fixed-size set of weighted particles approximating
//! the posterior over a parameter vector. Each observation triggers a
//! sequential importance-sampling reweight; when the effective sample size
//! falls below a configurable fraction of the particle count, the set is
//! rejuvenated by multinomial resampling followed by an independent
//! Metropolis-Hastings move against the full observation history.

/// Filter settings and proposal-distribution selection.
pub mod config;
/// Deterministic seed derivation for the per-observation substreams.
pub mod determinism;
/// Effective-sample-size history, rejuvenation records, advisory events.
pub mod diagnostics;
/// The particle filter engine and its update cycle.
pub mod engine;
/// Weighted marginal estimators and log-sum-exp.
pub mod estimate;
/// Weighted particle representation.
pub mod particle;
/// Proposal-set construction for the move step.
pub mod proposal;

pub use config::{FilterConfig, ProposalKind};
pub use diagnostics::{DiagnosticsRecorder, EssAdvisory, RejuvenationRecord};
pub use engine::ParticleFilter;
pub use particle::Particle;
