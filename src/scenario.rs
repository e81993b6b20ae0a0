//! Scenario runner for batch and Monte Carlo simulation
//!
//! Holds a base configuration once, then runs many independent paths with
//! per-path seeds. Paths share nothing but the configuration, so batches
//! parallelize freely.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::simulation::{FundCashflows, SimulationConfig, SimulationEngine};

/// Pre-configured runner for batches of simulation paths
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_config(config);
/// let paths = runner.run_paths(1000, 42)?;
/// let summary = summarize(&paths);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create a runner with default pricing parameters
    pub fn new() -> Self {
        Self {
            base_config: SimulationConfig::default(),
        }
    }

    /// Create a runner with a pre-built configuration
    pub fn with_config(base_config: SimulationConfig) -> Self {
        Self { base_config }
    }

    /// Run a single path using the base configuration's own seed
    pub fn run(&self) -> Result<FundCashflows, ModelError> {
        SimulationEngine::new(self.base_config.clone()).run()
    }

    /// Run a single path with an explicit seed
    pub fn run_seed(&self, seed: u64) -> Result<FundCashflows, ModelError> {
        let config = SimulationConfig {
            random_seed: Some(seed),
            ..self.base_config.clone()
        };
        SimulationEngine::new(config).run()
    }

    /// Run one deterministic path per seed, in parallel
    pub fn run_seeds(&self, seeds: &[u64]) -> Result<Vec<FundCashflows>, ModelError> {
        self.base_config.validate()?;
        seeds.par_iter().map(|&seed| self.run_seed(seed)).collect()
    }

    /// Run `num_paths` paths seeded `base_seed..base_seed + num_paths`
    pub fn run_paths(
        &self,
        num_paths: usize,
        base_seed: u64,
    ) -> Result<Vec<FundCashflows>, ModelError> {
        let seeds: Vec<u64> = (0..num_paths as u64).map(|i| base_seed + i).collect();
        self.run_seeds(&seeds)
    }

    /// Get reference to the base configuration for inspection
    pub fn config(&self) -> &SimulationConfig {
        &self.base_config
    }

    /// Get mutable reference to the base configuration for customization
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Distribution of outcomes across a batch of paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub num_paths: usize,
    pub mean_total_called: f64,
    pub mean_total_distributed: f64,
    pub mean_nav: f64,
    pub nav_p5: f64,
    pub nav_p50: f64,
    pub nav_p95: f64,
}

/// Aggregate a batch of paths into summary statistics.
pub fn summarize(paths: &[FundCashflows]) -> MonteCarloSummary {
    let num_paths = paths.len();
    if num_paths == 0 {
        return MonteCarloSummary {
            num_paths: 0,
            mean_total_called: 0.0,
            mean_total_distributed: 0.0,
            mean_nav: 0.0,
            nav_p5: 0.0,
            nav_p50: 0.0,
            nav_p95: 0.0,
        };
    }

    let n = num_paths as f64;
    let mean_total_called = paths
        .iter()
        .map(|p| p.calls.iter().sum::<f64>())
        .sum::<f64>()
        / n;
    let mean_total_distributed = paths
        .iter()
        .map(|p| p.dists.iter().sum::<f64>())
        .sum::<f64>()
        / n;

    let mut navs: Vec<f64> = paths.iter().map(|p| p.nav).collect();
    navs.sort_by(f64::total_cmp);
    let mean_nav = navs.iter().sum::<f64>() / n;

    MonteCarloSummary {
        num_paths,
        mean_total_called,
        mean_total_distributed,
        mean_nav,
        nav_p5: quantile(&navs, 0.05),
        nav_p50: quantile(&navs, 0.50),
        nav_p95: quantile(&navs, 0.95),
    }
}

/// Nearest-rank quantile of an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_and_determinism() {
        let runner = ScenarioRunner::new();
        let a = runner.run_paths(8, 42).unwrap();
        let b = runner.run_paths(8, 42).unwrap();
        assert_eq!(a.len(), 8);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.calls, y.calls);
            assert_eq!(x.nav, y.nav);
        }
    }

    #[test]
    fn test_every_path_conserves_capital() {
        let runner = ScenarioRunner::new();
        let paths = runner.run_paths(32, 7).unwrap();
        for path in &paths {
            assert!(path.calls.iter().sum::<f64>() <= 100.0 + 1e-9);
            assert!(path.nav >= 0.0);
        }
    }

    #[test]
    fn test_summary_quantiles_ordered() {
        let runner = ScenarioRunner::new();
        let paths = runner.run_paths(64, 1).unwrap();
        let summary = summarize(&paths);

        assert_eq!(summary.num_paths, 64);
        assert!(summary.nav_p5 <= summary.nav_p50);
        assert!(summary.nav_p50 <= summary.nav_p95);
        assert!(summary.mean_total_called > 0.0);
    }

    #[test]
    fn test_invalid_base_config_rejected() {
        let mut runner = ScenarioRunner::new();
        runner.config_mut().terms.time_step_years = 0.0;
        assert!(runner.run_paths(4, 1).is_err());
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.num_paths, 0);
        assert_eq!(summary.mean_nav, 0.0);
    }
}
