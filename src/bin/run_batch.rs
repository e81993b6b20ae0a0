//! Run a Monte Carlo batch of fund lifecycles and aggregate per-step means
//!
//! Configuration via environment variables:
//!   NUM_PATHS  - number of simulation paths (default 1000)
//!   BASE_SEED  - first seed; path i uses BASE_SEED + i (default 42)

use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use fund_cashflow_engine::scenario::{summarize, ScenarioRunner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let num_paths: usize = env::var("NUM_PATHS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000);
    let base_seed: u64 = env::var("BASE_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(42);

    let runner = ScenarioRunner::new();
    println!("Running {} paths (base seed {})...", num_paths, base_seed);

    let start = Instant::now();
    let paths = runner.run_paths(num_paths, base_seed)?;
    println!("Simulation complete in {:?}", start.elapsed());

    // Aggregate per-step means across all paths
    let num_points = paths.first().map(|p| p.times.len()).unwrap_or(0);
    let mut mean_calls = vec![0.0_f64; num_points];
    let mut mean_dists = vec![0.0_f64; num_points];
    for path in &paths {
        for i in 0..num_points {
            mean_calls[i] += path.calls[i];
            mean_dists[i] += path.dists[i];
        }
    }
    let n = paths.len().max(1) as f64;
    for i in 0..num_points {
        mean_calls[i] /= n;
        mean_dists[i] /= n;
    }

    let csv_path = "batch_output.csv";
    let mut file = File::create(csv_path)?;
    writeln!(file, "Step,Time,MeanCall,MeanDist")?;
    if let Some(first) = paths.first() {
        for i in 0..num_points {
            writeln!(
                file,
                "{},{:.2},{:.8},{:.8}",
                i, first.times[i], mean_calls[i], mean_dists[i]
            )?;
        }
    }
    println!("Per-step means written to: {}", csv_path);

    let summary = summarize(&paths);
    println!("\nBatch summary ({} paths):", summary.num_paths);
    println!("  Mean Total Called: {:.2}", summary.mean_total_called);
    println!("  Mean Total Distributed: {:.2}", summary.mean_total_distributed);
    println!("  Mean NAV: {:.2}", summary.mean_nav);
    println!(
        "  NAV p5/p50/p95: {:.2} / {:.2} / {:.2}",
        summary.nav_p5, summary.nav_p50, summary.nav_p95
    );

    Ok(())
}
