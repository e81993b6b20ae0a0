//! Stochastic cashflow simulation for a single fund lifecycle

mod call_rate;
mod cashflows;
mod distribution;
mod engine;
mod rng;
mod timeline;

pub use call_rate::{CallRateProcess, CallSchedule, CallWindow};
pub use cashflows::{CashflowSummary, FundCashflows};
pub use distribution::{DistributionProcess, DistributionSchedule};
pub use engine::{SimulationConfig, SimulationEngine};
pub use rng::seeded_rng;
pub use timeline::Timeline;
