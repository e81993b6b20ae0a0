//! Project a realized track record forward
//!
//! Usage: project_history <cashflows.csv> [--json]
//!
//! The CSV needs Date,Call,Dist columns. Overrides via environment
//! variables:
//!   COMMITTED_CAPITAL  (default 100)
//!   PROJECTION_YEARS   (default 5)
//!   TARGET_MULTIPLE    (default 1.6)
//!   SEED               (optional, deterministic projection)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

use fund_cashflow_engine::fund::load_cashflows;
use fund_cashflow_engine::projection::{ContinuationEngine, ProjectionConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let path: PathBuf = match env::args().skip(1).find(|arg| !arg.starts_with("--")) {
        Some(path) => path.into(),
        None => bail!("usage: project_history <cashflows.csv> [--json]"),
    };

    let history = load_cashflows(&path)?;

    let mut config = ProjectionConfig {
        committed_capital: env::var("COMMITTED_CAPITAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100.0),
        projection_years: env::var("PROJECTION_YEARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5.0),
        random_seed: env::var("SEED").ok().and_then(|v| v.parse().ok()),
        ..Default::default()
    };
    if let Some(multiple) = env::var("TARGET_MULTIPLE").ok().and_then(|v| v.parse().ok()) {
        config.distribution.target_multiple = multiple;
    }

    let result = ContinuationEngine::new(config)
        .project(&history)
        .context("projecting track record")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Projected track record ({} historical rows):", history.len());
    println!("{:>5} {:>12} {:>12} {:>12}", "Row", "Date", "Call", "Dist");
    println!("{}", "-".repeat(45));
    for i in 0..result.dates.len() {
        println!(
            "{:>5} {:>12} {:>12.4} {:>12.4}",
            i, result.dates[i], result.calls[i], result.dists[i]
        );
    }

    println!("\nResidual NAV: {:.2}", result.nav);
    if result.multiple_exceeded {
        println!("Note: historical distributions already exceed the target multiple;");
        println!("no further distributions were projected.");
    }

    Ok(())
}
