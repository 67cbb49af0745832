//! Forecourt Simulator CLI
//!
//! Run replicated gas station simulations and write one report per
//! experiment.
//!
//! # Example
//!
//! ```bash
//! # 100 replications of one day, fixed seed
//! forecourt-sim -r 100 -d 1440 --seed 42
//!
//! # The full classic table, CSV and JSON, into ./results
//! forecourt-sim --standard-plan --json -o results
//! ```

use clap::{Parser, ValueEnum};
use forecourt_simulation::{ArrivalHorizon, StationConfig, UtilizationBase};
use forecourt_simulator::{
    run_experiment, ExperimentConfig, ExperimentPlan, ReportWriter, SimulatorError,
};
use forecourt_types::SimTime;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Denominator for utilization percentages.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum BaseArg {
    /// In-window busy time over the run duration.
    Elapsed,
    /// Total busy time over one day.
    Day,
}

/// When arrivals stop.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum HorizonArg {
    /// After the first day.
    Day,
    /// At the end of the run.
    Duration,
}

/// Forecourt Simulator
///
/// Runs independent replications of a two-pump, one-clerk gas station and
/// reports per-metric averages and standard deviations. Reproducible when
/// the same seed is used.
#[derive(Parser, Debug)]
#[command(name = "forecourt-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of replications
    #[arg(short = 'r', long, default_value = "10")]
    replications: usize,

    /// Duration of each replication in minutes
    #[arg(short = 'd', long, default_value = "1440")]
    duration: f64,

    /// Run the classic {1, 10, 100, 300} x {1, 10, 30, 365} day table instead
    #[arg(long)]
    standard_plan: bool,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for report files
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write a JSON report per experiment
    #[arg(long)]
    json: bool,

    /// Run replications on a single thread
    #[arg(long)]
    sequential: bool,

    /// Utilization denominator
    #[arg(long, value_enum, default_value = "elapsed")]
    utilization_base: BaseArg,

    /// When arrivals stop
    #[arg(long, value_enum, default_value = "day")]
    arrival_horizon: HorizonArg,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,forecourt_simulator=info")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Simulation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimulatorError> {
    let seed = args.seed.unwrap_or_else(rand::random);

    let station = StationConfig::new()
        .with_utilization_base(match args.utilization_base {
            BaseArg::Elapsed => UtilizationBase::Elapsed,
            BaseArg::Day => UtilizationBase::ONE_DAY,
        })
        .with_arrival_horizon(match args.arrival_horizon {
            HorizonArg::Day => ArrivalHorizon::ONE_DAY,
            HorizonArg::Duration => ArrivalHorizon::RunDuration,
        });

    let duration = SimTime::from_minutes(args.duration);
    let plan = if args.standard_plan {
        ExperimentPlan::standard()
    } else {
        ExperimentPlan::single(args.replications, duration)
    };

    let mut template = ExperimentConfig::new(args.replications, duration)
        .with_seed(seed)
        .with_station(station);
    if args.sequential {
        template = template.sequential();
    }

    info!(
        experiments = plan.len(),
        seed,
        output_dir = %args.output_dir.display(),
        json = args.json,
        "Starting simulation"
    );

    let writer = ReportWriter::new(args.output_dir).with_json(args.json);
    for experiment in plan.experiments(&template)? {
        let result = run_experiment(&experiment)?;
        writer.write(&result)?;
        result.print_summary();
    }

    Ok(())
}
