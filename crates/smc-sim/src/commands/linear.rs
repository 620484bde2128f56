use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use smc_core::{
    derive_substream_seed, normal, standard_normal, uniform_open01, InferenceModel, PriorSpec,
    RngHandle,
};
use smc_filter::{FilterConfig, ParticleFilter, ProposalKind, RejuvenationRecord};

const DATA_SUBSTREAM: u64 = 0xDA7A;

#[derive(Args, Debug)]
pub struct LinearArgs {
    /// Number of particles used by the filter.
    #[arg(long, default_value_t = 1000)]
    pub particles: usize,
    /// Number of synthetic observations to stream through the filter.
    #[arg(long, default_value_t = 100)]
    pub observations: usize,
    /// Generating intercept.
    #[arg(long, default_value_t = -0.5)]
    pub intercept: f64,
    /// Generating slope.
    #[arg(long, default_value_t = 1.5)]
    pub slope: f64,
    /// Generating noise standard deviation.
    #[arg(long, default_value_t = 0.5)]
    pub noise_sd: f64,
    /// Master seed for data generation and the filter.
    #[arg(long, default_value_t = 2024)]
    pub seed: u64,
    /// Rejuvenation trigger as a fraction of the particle count.
    #[arg(long, default_value_t = 0.5)]
    pub resampling_limit: f64,
    /// Use uniform-range proposals in the move step instead of Gaussian.
    #[arg(long)]
    pub uniform_proposals: bool,
    /// Optional path for a JSON report of the run.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Optional path for the per-observation diagnostics CSV.
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,
}

/// A covariate/response pair for the linear model.
#[derive(Debug, Clone, Copy)]
pub struct LinearPoint {
    pub x: f64,
    pub y: f64,
}

/// Simple linear regression with the parameter vector ordered as
/// {intercept, slope, log standard deviation}. The log-sd parameterization
/// keeps the sampled noise scale strictly positive.
struct LinearModel {
    prior: PriorSpec,
}

impl InferenceModel for LinearModel {
    type Observation = LinearPoint;

    fn log_likelihood(&self, observations: &[LinearPoint], theta: &[f64]) -> f64 {
        let sd = theta[2].exp();
        observations
            .iter()
            .map(|point| normal::log_pdf(point.y, theta[0] + point.x * theta[1], sd))
            .sum()
    }

    fn prior(&self) -> &PriorSpec {
        &self.prior
    }
}

#[derive(Debug, Serialize)]
struct LinearReport {
    provenance: Provenance,
    final_means: Vec<f64>,
    final_sds: Vec<f64>,
    rejuvenations: Vec<RejuvenationRecord>,
}

#[derive(Debug, Serialize)]
struct Provenance {
    particles: usize,
    observations: usize,
    intercept: f64,
    slope: f64,
    noise_sd: f64,
    seed: u64,
    resampling_limit: f64,
    uniform_proposals: bool,
}

pub fn run(args: &LinearArgs) -> Result<(), Box<dyn Error>> {
    let model = LinearModel {
        prior: PriorSpec::new(vec![0.0, 0.0, 0.0], vec![5.0, 5.0, 1.0])?,
    };
    let config = FilterConfig {
        resampling_limit: args.resampling_limit,
        proposal: if args.uniform_proposals {
            ProposalKind::Uniform
        } else {
            ProposalKind::Gaussian
        },
        ..FilterConfig::default()
    };
    let mut filter = ParticleFilter::with_config(args.particles, model, args.seed, config)?;

    let mut data_rng = RngHandle::from_seed(derive_substream_seed(args.seed, DATA_SUBSTREAM));

    println!("                 intercept   slope   ln_sd");
    for index in 1..=args.observations {
        let x = uniform_open01(&mut data_rng) * 10.0 - 5.0;
        let y = args.intercept + x * args.slope + standard_normal(&mut data_rng) * args.noise_sd;
        filter.observe(LinearPoint { x, y })?;

        if index % 10 == 0 || index == args.observations {
            print_marginals(index, &filter);
        }
    }
    println!(
        "generating:      {:9.2} {:7.2} {:7.2}",
        args.intercept,
        args.slope,
        args.noise_sd.ln()
    );
    println!("rejuvenated {} time(s)", filter.rejuvenations().len());

    if let Some(path) = &args.diagnostics {
        filter.diagnostics().write_csv(path)?;
    }
    if let Some(path) = &args.report {
        let report = LinearReport {
            provenance: Provenance {
                particles: args.particles,
                observations: args.observations,
                intercept: args.intercept,
                slope: args.slope,
                noise_sd: args.noise_sd,
                seed: args.seed,
                resampling_limit: args.resampling_limit,
                uniform_proposals: args.uniform_proposals,
            },
            final_means: filter.marginal_means(),
            final_sds: filter.marginal_sds(),
            rejuvenations: filter.rejuvenations().to_vec(),
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}

fn print_marginals(index: usize, filter: &ParticleFilter<LinearModel>) {
    let means = filter.marginal_means();
    let sds = filter.marginal_sds();
    println!(
        "obs {:03} means:  {:9.2} {:7.2} {:7.2}",
        index, means[0], means[1], means[2]
    );
    println!(
        "        sds:    {:9.2} {:7.2} {:7.2}",
        sds[0], sds[1], sds[2]
    );
}
