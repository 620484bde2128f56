use rayon::prelude::*;

use smc_core::errors::ErrorInfo;
use smc_core::{categorical_index, uniform_open01, InferenceModel, RngHandle, SmcError};

use crate::config::{FilterConfig, ProposalKind};
use crate::determinism;
use crate::diagnostics::{DiagnosticsRecorder, EssAdvisory, RejuvenationRecord};
use crate::estimate;
use crate::particle::{uniform_log_weight, Particle};
use crate::proposal;

/// Resample-move particle filter over a user-supplied [`InferenceModel`].
///
/// The filter owns its particle set, observation history, and diagnostics.
/// Callers drive it one observation at a time with [`observe`] (or in bulk
/// with [`run_on_dataset`]) and read posterior marginals back through the
/// query methods. All returned slices are snapshots of the current state;
/// they are never mutated behind the caller's back within one call.
///
/// [`observe`]: ParticleFilter::observe
/// [`run_on_dataset`]: ParticleFilter::run_on_dataset
pub struct ParticleFilter<M: InferenceModel> {
    model: M,
    particles: Vec<Particle>,
    observations: Vec<M::Observation>,
    config: FilterConfig,
    master_seed: u64,
    diagnostics: DiagnosticsRecorder,
}

impl<M: InferenceModel + std::fmt::Debug> std::fmt::Debug for ParticleFilter<M>
where
    M::Observation: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleFilter")
            .field("model", &self.model)
            .field("particles", &self.particles)
            .field("observations", &self.observations)
            .field("config", &self.config)
            .field("master_seed", &self.master_seed)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl<M: InferenceModel> ParticleFilter<M> {
    /// Creates a filter with `particle_count` particles drawn from the
    /// model's prior, every log-weight set to `ln(1/n)`, and default
    /// [`FilterConfig`] settings.
    ///
    /// Fails with a [`SmcError::Config`] error when `particle_count` is
    /// zero. The model's prior is validated by [`PriorSpec`] construction,
    /// so a model in hand always carries a well-formed prior.
    ///
    /// [`PriorSpec`]: smc_core::PriorSpec
    pub fn new(particle_count: usize, model: M, seed: u64) -> Result<Self, SmcError> {
        Self::with_config(particle_count, model, seed, FilterConfig::default())
    }

    /// Creates a filter with explicit [`FilterConfig`] settings.
    pub fn with_config(
        particle_count: usize,
        model: M,
        seed: u64,
        config: FilterConfig,
    ) -> Result<Self, SmcError> {
        if particle_count == 0 {
            return Err(SmcError::Config(ErrorInfo::new(
                "particle-count-zero",
                "number of particles must be a positive integer",
            )));
        }
        let prior = model.prior();
        let mut rng = RngHandle::from_seed(determinism::init_seed(seed));
        let particles =
            proposal::draw_from_normal(particle_count, prior.means(), prior.sds(), &mut rng);
        Ok(Self {
            model,
            particles,
            observations: Vec::new(),
            config,
            master_seed: seed,
            diagnostics: DiagnosticsRecorder::new(),
        })
    }

    /// Ingests one observation: reweight, normalize, monitor the effective
    /// sample size, and rejuvenate the particle set when the ESS fraction
    /// falls below the resampling limit.
    pub fn observe(&mut self, observation: M::Observation) -> Result<(), SmcError> {
        self.reweight(&observation);
        self.normalize_weights();
        self.observations.push(observation);

        let ess = estimate::effective_sample_size(&self.particles);
        self.diagnostics
            .record_ess(self.observations.len(), ess, self.config.ess_warning_floor);

        if ess / (self.particles.len() as f64) < self.config.resampling_limit {
            self.rejuvenate()?;
        }
        Ok(())
    }

    /// Ingests a whole dataset by calling [`observe`](Self::observe) once
    /// per element in order.
    pub fn run_on_dataset<I>(&mut self, dataset: I) -> Result<(), SmcError>
    where
        I: IntoIterator<Item = M::Observation>,
    {
        for observation in dataset {
            self.observe(observation)?;
        }
        Ok(())
    }

    /// Sets the rejuvenation trigger fraction, effective from the next
    /// observation. Values at or below 0 disable rejuvenation; values at or
    /// above 1 force it after every observation.
    pub fn set_resampling_limit(&mut self, limit: f64) {
        self.config.resampling_limit = limit;
    }

    /// Switches the move step between uniform-range and Gaussian proposals,
    /// effective from the next rejuvenation.
    pub fn use_uniform_proposals(&mut self, enabled: bool) {
        self.config.proposal = if enabled {
            ProposalKind::Uniform
        } else {
            ProposalKind::Gaussian
        };
    }

    /// Weighted posterior marginal mean per dimension.
    pub fn marginal_means(&self) -> Vec<f64> {
        estimate::weighted_means(&self.particles, self.model.dimension())
    }

    /// Weighted posterior marginal standard deviation per dimension
    /// (population formula over the normalized weights).
    pub fn marginal_sds(&self) -> Vec<f64> {
        let means = self.marginal_means();
        estimate::weighted_sds(&self.particles, &means)
    }

    /// Effective sample size of the current particle set.
    pub fn effective_sample_size(&self) -> f64 {
        estimate::effective_sample_size(&self.particles)
    }

    /// Effective sample size recorded after each observation.
    pub fn ess_history(&self) -> &[f64] {
        self.diagnostics.ess_history()
    }

    /// Resample-move passes performed so far, with acceptance ratios and
    /// the observation counts at which they ran.
    pub fn rejuvenations(&self) -> &[RejuvenationRecord] {
        self.diagnostics.rejuvenations()
    }

    /// Low-ESS advisory events recorded so far.
    pub fn low_ess_events(&self) -> &[EssAdvisory] {
        self.diagnostics.advisories()
    }

    /// All observations ingested so far, in order.
    pub fn observations(&self) -> &[M::Observation] {
        &self.observations
    }

    /// Snapshot view of the current particle set.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles, fixed for the filter's lifetime.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Current rejuvenation trigger fraction.
    pub fn resampling_limit(&self) -> f64 {
        self.config.resampling_limit
    }

    /// The model driving this filter.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Full telemetry recorder (ESS history, rejuvenations, advisories).
    pub fn diagnostics(&self) -> &DiagnosticsRecorder {
        &self.diagnostics
    }

    /// Sequential importance-sampling update: add the latest point's
    /// log-likelihood to each particle's running log-weight. Per-particle
    /// scoring is independent, so the map runs in parallel; order is
    /// preserved by mutating in place.
    fn reweight(&mut self, observation: &M::Observation) {
        let model = &self.model;
        let latest = std::slice::from_ref(observation);
        self.particles.par_iter_mut().for_each(|particle| {
            particle.log_weight += model.log_likelihood(latest, &particle.theta);
        });
    }

    /// Normalizes so the exponentiated log-weights sum to one, via
    /// log-sum-exp.
    fn normalize_weights(&mut self) {
        let log_weights: Vec<f64> = self.particles.iter().map(|p| p.log_weight).collect();
        let log_total = estimate::log_sum_exp(&log_weights);
        for particle in &mut self.particles {
            particle.log_weight -= log_total;
        }
    }

    /// Resample-move pass. The pre-resample weighted marginals are
    /// snapshotted first: they parameterize the Gaussian move proposal.
    fn rejuvenate(&mut self) -> Result<(), SmcError> {
        let snapshot_means = self.marginal_means();
        let snapshot_sds = self.marginal_sds();
        self.resample()?;
        self.move_particles(&snapshot_means, &snapshot_sds)?;
        Ok(())
    }

    /// Multinomial resampling: draw `n` indices with replacement from the
    /// current weights and replace the set with independent copies.
    /// Duplicates are expected; the move step restores diversity.
    fn resample(&mut self) -> Result<(), SmcError> {
        let n = self.particles.len();
        let mut rng = RngHandle::from_seed(determinism::resample_seed(
            self.master_seed,
            self.observations.len(),
        ));
        let weights: Vec<f64> = self.particles.iter().map(Particle::weight).collect();

        let mut resampled = Vec::with_capacity(n);
        for _ in 0..n {
            let index = categorical_index(&weights, &mut rng)?;
            resampled.push(self.particles[index].clone());
        }

        let log_weight = uniform_log_weight(n);
        for particle in &mut resampled {
            particle.log_weight = log_weight;
        }
        self.particles = resampled;
        Ok(())
    }

    /// Independent Metropolis-Hastings move against the full observation
    /// history. Scoring of the current and proposal sets is index-aligned
    /// and embarrassingly parallel; the accept/reject loop pairs
    /// `(current_i, proposal_i)` sequentially once both scores exist.
    fn move_particles(&mut self, snapshot_means: &[f64], snapshot_sds: &[f64]) -> Result<(), SmcError> {
        let n = self.particles.len();
        let mut rng = RngHandle::from_seed(determinism::move_seed(
            self.master_seed,
            self.observations.len(),
        ));

        let proposals = match self.config.proposal {
            ProposalKind::Gaussian => {
                proposal::draw_from_normal(n, snapshot_means, snapshot_sds, &mut rng)
            }
            ProposalKind::Uniform => {
                proposal::draw_from_range(n, &self.particles, self.model.dimension(), &mut rng)
            }
        };

        let model = &self.model;
        let history = self.observations.as_slice();
        let current_scores: Vec<f64> = self
            .particles
            .par_iter()
            .map(|p| model.log_likelihood(history, &p.theta) + model.log_prior(&p.theta))
            .collect();
        let proposal_scores: Vec<f64> = proposals
            .par_iter()
            .map(|p| model.log_likelihood(history, &p.theta) + model.log_prior(&p.theta))
            .collect();

        let mut accepted = 0usize;
        let mut next_set = Vec::with_capacity(n);
        for i in 0..n {
            let ratio = proposal_scores[i] - current_scores[i];
            let draw = uniform_open01(&mut rng);
            if draw.ln() < ratio || ratio > 0.0 {
                next_set.push(proposals[i].clone());
                accepted += 1;
            } else {
                next_set.push(self.particles[i].clone());
            }
        }

        let log_weight = uniform_log_weight(n);
        for particle in &mut next_set {
            particle.log_weight = log_weight;
        }
        self.particles = next_set;

        self.diagnostics
            .record_rejuvenation(self.observations.len(), accepted as f64 / n as f64);
        Ok(())
    }
}
