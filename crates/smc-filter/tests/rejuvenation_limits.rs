use smc_core::{normal, standard_normal, InferenceModel, PriorSpec, RngHandle};
use smc_filter::{FilterConfig, ParticleFilter, ProposalKind};

struct NormalMeanModel {
    prior: PriorSpec,
}

impl NormalMeanModel {
    fn new(prior_mean: f64, prior_sd: f64) -> Self {
        Self {
            prior: PriorSpec::new(vec![prior_mean], vec![prior_sd]).unwrap(),
        }
    }
}

impl InferenceModel for NormalMeanModel {
    type Observation = f64;

    fn log_likelihood(&self, observations: &[f64], theta: &[f64]) -> f64 {
        observations
            .iter()
            .map(|y| normal::log_pdf(*y, theta[0], 1.0))
            .sum()
    }

    fn prior(&self) -> &PriorSpec {
        &self.prior
    }
}

fn synthetic_data(count: usize, mean: f64, seed: u64) -> Vec<f64> {
    let mut rng = RngHandle::from_seed(seed);
    (0..count).map(|_| standard_normal(&mut rng) + mean).collect()
}

#[test]
fn nonpositive_limit_disables_rejuvenation() {
    for limit in [0.0, -1.0] {
        let mut filter = ParticleFilter::new(200, NormalMeanModel::new(0.0, 2.0), 31).unwrap();
        filter.set_resampling_limit(limit);
        filter
            .run_on_dataset(synthetic_data(100, 0.5, 211))
            .unwrap();
        assert!(
            filter.rejuvenations().is_empty(),
            "limit {limit} still triggered rejuvenation"
        );
    }
}

#[test]
fn limit_at_or_above_one_forces_rejuvenation_every_step() {
    for limit in [1.0, 1.5] {
        let mut filter = ParticleFilter::new(200, NormalMeanModel::new(0.0, 2.0), 37).unwrap();
        filter.set_resampling_limit(limit);
        filter.run_on_dataset(synthetic_data(25, 0.5, 223)).unwrap();

        let counts: Vec<usize> = filter
            .rejuvenations()
            .iter()
            .map(|r| r.observation_count)
            .collect();
        assert_eq!(counts, (1..=25).collect::<Vec<_>>());
    }
}

#[test]
fn uniform_proposals_keep_the_filter_on_target() {
    let config = FilterConfig {
        resampling_limit: 1.0,
        proposal: ProposalKind::Uniform,
        ..FilterConfig::default()
    };
    let mut filter =
        ParticleFilter::with_config(1000, NormalMeanModel::new(0.0, 2.0), 41, config).unwrap();
    filter
        .run_on_dataset(synthetic_data(100, 0.5, 227))
        .unwrap();

    assert_eq!(filter.rejuvenations().len(), 100);
    let estimate = filter.marginal_means()[0];
    assert!(
        (estimate - 0.5).abs() < 0.3,
        "uniform-proposal estimate {estimate} strayed from 0.5"
    );
    for record in filter.rejuvenations() {
        assert!(record.acceptance_ratio >= 0.0 && record.acceptance_ratio <= 1.0);
    }
}

#[test]
fn proposal_toggle_takes_effect_from_the_next_observation() {
    let mut filter = ParticleFilter::new(200, NormalMeanModel::new(0.0, 2.0), 43).unwrap();
    filter.set_resampling_limit(1.5);
    filter.observe(0.4).unwrap();
    assert_eq!(filter.rejuvenations().len(), 1);

    filter.use_uniform_proposals(true);
    filter.observe(0.6).unwrap();
    assert_eq!(filter.rejuvenations().len(), 2);

    filter.use_uniform_proposals(false);
    filter.observe(0.5).unwrap();
    assert_eq!(filter.rejuvenations().len(), 3);
}

#[test]
fn low_ess_advisories_are_recorded_but_not_fatal() {
    // A tiny particle set with rejuvenation disabled degenerates quickly.
    let mut filter = ParticleFilter::new(5, NormalMeanModel::new(0.0, 5.0), 47).unwrap();
    filter.set_resampling_limit(0.0);
    filter
        .run_on_dataset(synthetic_data(50, 3.0, 229))
        .unwrap();

    assert!(!filter.low_ess_events().is_empty());
    for event in filter.low_ess_events() {
        assert!(event.ess < 10.0);
    }
    assert!(filter.rejuvenations().is_empty());
}
