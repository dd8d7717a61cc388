//! Generates a seeded candidate set, sorts it by weight, selects the optimal
//! subset for a capacity, and prints the report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use u_subset::candidate::{BuilderConfig, CandidateBuilder};
use u_subset::knapsack::{SolverConfig, Strategy, SubsetRunner};
use u_subset::report::Report;
use u_subset::sort_by_weight;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Auto,
    Memoized,
    Tabulated,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::Memoized => Strategy::Memoized,
            StrategyArg::Tabulated => Strategy::Tabulated,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "subset-select")]
#[command(about = "Select the most reliable candidate subset that fits a capacity")]
struct Cli {
    /// Capacity the selected weights must not exceed.
    #[arg(long, default_value_t = 300, allow_negative_numbers = true)]
    capacity: i64,

    /// Seed for candidate generation.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 10)]
    min_weight: u64,

    #[arg(long, default_value_t = 120)]
    max_weight: u64,

    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Refuse to solve if candidates × (min(capacity, total weight) + 1)
    /// exceeds this.
    #[arg(long)]
    max_states: Option<usize>,
}

/// Runs build → sort → solve and renders the report.
///
/// Any failure returns before a report is rendered.
fn select(cli: &Cli) -> Result<String> {
    let builder_config = BuilderConfig::default()
        .with_weight_range(cli.min_weight, cli.max_weight)
        .with_seed(cli.seed);
    let candidates =
        CandidateBuilder::generate(&builder_config).context("failed to generate candidates")?;
    log::info!("generated {} candidates (seed {})", candidates.len(), cli.seed);

    log::info!("sorting candidates by weight");
    let candidates = sort_by_weight(&candidates);

    let mut solver_config = SolverConfig::default().with_strategy(cli.strategy.into());
    solver_config.max_states = cli.max_states;

    let result = SubsetRunner::run(&candidates, cli.capacity, &solver_config)
        .with_context(|| format!("cannot select candidates for capacity {}", cli.capacity))?;
    log::info!(
        "evaluated {} states with {:?}",
        result.states_evaluated,
        result.strategy
    );

    // Already rejected by run() when negative.
    let capacity = u64::try_from(cli.capacity).context("capacity must be non-negative")?;
    Ok(Report::new(&candidates, capacity, &result.outcome).to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let report = select(&cli)?;
    println!("{report}");
    Ok(())
}
