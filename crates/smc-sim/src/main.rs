use std::error::Error;

use clap::{Parser, Subcommand};

use commands::{linear, normal_mean};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "smc-sim", about = "Resample-move particle filter demos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer the mean of a normal distribution with known unit variance and
    /// compare the filter against the closed-form conjugate posterior.
    NormalMean(normal_mean::NormalMeanArgs),
    /// Infer intercept, slope, and log standard deviation of a simple
    /// linear model from streaming synthetic data.
    Linear(linear::LinearArgs),
}

fn main() {
    let cli = Cli::parse();
    let outcome: Result<(), Box<dyn Error>> = match &cli.command {
        Command::NormalMean(args) => normal_mean::run(args),
        Command::Linear(args) => linear::run(args),
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
