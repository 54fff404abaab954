//! Simulation harness binary for the folio catalog engine.

mod constants;
mod simulation;

use clap::Parser;
use simulation::Simulator;
use tracing::info;

/// Catalog engine simulation harness.
///
/// Runs a randomized stream of add/remove/search events against an
/// in-memory catalog and prints the outcome of every step plus a final
/// statistics block.
#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Args {
    /// Number of simulation steps to run
    #[arg(default_value_t = constants::DEFAULT_STEPS)]
    steps: u64,

    /// Seed for reproducible runs (entropy-seeded when omitted)
    seed: Option<u64>,

    /// Emit log lines as JSON
    #[arg(long)]
    log_json: bool,

    /// Print the final statistics block as JSON
    #[arg(long)]
    stats_json: bool,
}

fn init_logging(json: bool) {
    let filter = std::env::var("FOLIO_LOG").unwrap_or_else(|_| "folio_core=debug,info".to_string());
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        steps = args.steps,
        "starting catalog simulation"
    );

    let catalog = simulation::seed_catalog("Central Catalog")?;
    let mut simulator = Simulator::new(catalog, args.seed);
    let stats = simulator.run(args.steps)?;

    info!(
        catalog = simulator.catalog().name(),
        records = simulator.catalog().len(),
        "simulation finished"
    );

    println!();
    println!("{}", "=".repeat(70));
    println!("FINAL STATISTICS:");
    println!("{}", "=".repeat(70));
    if args.stats_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }
    println!("{}", "=".repeat(70));

    Ok(())
}
