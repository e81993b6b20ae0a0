//! Assembled cashflow output for a simulated fund

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::call_rate::CallSchedule;
use super::distribution::DistributionSchedule;
use super::timeline::Timeline;

/// Complete cashflow picture of one simulated fund lifecycle.
///
/// All vectors share the same length and step ordering; the struct is
/// assembled once and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundCashflows {
    /// Time in years at each point
    pub times: Vec<f64>,

    /// Calendar date at each point (ISO-8601 in serialized form)
    pub dates: Vec<NaiveDate>,

    /// Capital called at each point
    pub calls: Vec<f64>,

    /// Capital distributed at each point
    pub dists: Vec<f64>,

    /// Residual net asset value at the final date
    pub nav: f64,
}

impl FundCashflows {
    /// Merge the call and distribution schedules with their timeline.
    ///
    /// Residual NAV is whatever the fraction process left unconverged,
    /// scaled by the capital base.
    pub fn assemble(
        timeline: &Timeline,
        calls: CallSchedule,
        dists: DistributionSchedule,
        capital_base: f64,
    ) -> Self {
        let nav = dists.residual_nav(capital_base);
        Self {
            times: timeline.times().to_vec(),
            dates: timeline.dates().to_vec(),
            calls: calls.calls,
            dists: dists.dists,
            nav,
        }
    }

    pub fn summary(&self) -> CashflowSummary {
        CashflowSummary {
            num_points: self.times.len(),
            total_called: self.calls.iter().sum(),
            total_distributed: self.dists.iter().sum(),
            nav: self.nav,
        }
    }
}

/// Aggregate statistics for one simulated lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowSummary {
    pub num_points: usize,
    pub total_called: f64,
    pub total_distributed: f64,
    pub nav: f64,
}
