//! Fund Cashflow Engine - Stochastic cashflow simulation for private equity funds
//!
//! This library provides:
//! - Synthetic fund lifecycle generation (capital calls, distributions, NAV)
//!   via a two-factor stochastic model
//! - Forward projection of partially-realized track records onto leftover
//!   capital and distribution budgets
//! - Fund performance metrics (IRR, DPI, RVPI, TVPI)
//! - Monte Carlo batch simulation with aggregate statistics
//! - Synthetic value timeseries (geometric Brownian motion)

pub mod error;
pub mod fund;
pub mod metrics;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod simulation;
pub mod timeseries;

// Re-export commonly used types
pub use error::ModelError;
pub use fund::{CashflowRecord, FundTerms};
pub use metrics::FundMetrics;
pub use params::{CallRateParams, DistributionParams};
pub use projection::{ContinuationEngine, ProjectionConfig, ProjectionResult};
pub use scenario::ScenarioRunner;
pub use simulation::{FundCashflows, SimulationConfig, SimulationEngine};
