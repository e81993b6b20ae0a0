//! Fund Cashflow Engine CLI
//!
//! Command-line interface for generating synthetic fund cashflows

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use fund_cashflow_engine::{
    metrics::FundMetrics,
    simulation::{SimulationConfig, SimulationEngine},
};

#[derive(Parser, Debug)]
#[command(
    name = "fund_cashflow_engine",
    about = "Generate a synthetic private equity fund lifecycle"
)]
struct Args {
    /// Committed capital
    #[arg(long, default_value_t = 100.0)]
    committed_capital: f64,

    /// Commitment period in years
    #[arg(long, default_value_t = 5.0)]
    commitment_period: f64,

    /// Fund life in years
    #[arg(long, default_value_t = 10.0)]
    fund_life: f64,

    /// Time step in years (0.25 = quarterly)
    #[arg(long, default_value_t = 0.25)]
    dt: f64,

    /// Target distribution multiple
    #[arg(long, default_value_t = 1.6)]
    target_multiple: f64,

    /// Years before distributions begin
    #[arg(long, default_value_t = 2.0)]
    dist_lag: f64,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// First timeline date
    #[arg(long, default_value = "2020-01-01")]
    start_date: NaiveDate,

    /// Write the full per-step output to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Fund Cashflow Engine v0.1.0");
    println!("===========================\n");

    let mut config = SimulationConfig {
        random_seed: args.seed,
        start_date: args.start_date,
        ..Default::default()
    };
    config.terms.committed_capital = args.committed_capital;
    config.terms.commitment_period_years = args.commitment_period;
    config.terms.fund_life_years = args.fund_life;
    config.terms.time_step_years = args.dt;
    config.distribution.target_multiple = args.target_multiple;
    config.distribution.lag_years = args.dist_lag;

    println!("Fund terms:");
    println!("  Committed Capital: {:.2}", config.terms.committed_capital);
    println!(
        "  Commitment Period: {} years",
        config.terms.commitment_period_years
    );
    println!("  Fund Life: {} years", config.terms.fund_life_years);
    println!(
        "  Target Multiple: {:.2}x",
        config.distribution.target_multiple
    );
    println!();

    let result = SimulationEngine::new(config).run()?;

    // Print the first three years to console
    println!("{:>5} {:>12} {:>12} {:>12}", "Step", "Date", "Call", "Dist");
    println!("{}", "-".repeat(45));
    for i in 0..result.dates.len().min(12) {
        println!(
            "{:>5} {:>12} {:>12.4} {:>12.4}",
            i, result.dates[i], result.calls[i], result.dists[i]
        );
    }
    if result.dates.len() > 12 {
        println!("... ({} more steps)", result.dates.len() - 12);
    }

    if let Some(path) = &args.output {
        let mut file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        writeln!(file, "Step,Time,Date,Call,Dist")?;
        for i in 0..result.dates.len() {
            writeln!(
                file,
                "{},{:.2},{},{:.8},{:.8}",
                i, result.times[i], result.dates[i], result.calls[i], result.dists[i]
            )?;
        }
        println!("\nFull results written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Steps: {}", summary.num_points);
    println!("  Total Called: {:.2}", summary.total_called);
    println!("  Total Distributed: {:.2}", summary.total_distributed);
    println!("  Residual NAV: {:.2}", summary.nav);

    let metrics = FundMetrics::from_cashflows(&result);
    println!("\nPerformance:");
    match metrics.irr {
        Some(irr) => println!("  Net IRR: {:.2}%", irr * 100.0),
        None => println!("  Net IRR: n/a"),
    }
    if let Some(tvpi) = metrics.tvpi {
        println!("  TVPI: {:.2}x  (DPI {:.2}x + RVPI {:.2}x)",
            tvpi,
            metrics.dpi.unwrap_or(0.0),
            metrics.rvpi.unwrap_or(0.0),
        );
    }

    Ok(())
}
