//! Continuation driver: re-base the model onto leftover budget and project
//! forward from the last known date
//!
//! The forward leg runs a scaled copy of the model whose committed capital is
//! the un-called remainder and whose target multiple is the un-distributed
//! remainder divided by that capital, starting its own clock at zero. This
//! deliberately discards the original process's path dependence at the
//! cutover (the rate and fraction restart from their defaults); it keeps
//! projected calls and distributions inside the leftover budget instead of
//! re-projecting as though the fund were at time zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::fund::{sorted_by_date, CashflowRecord, HistoricalSummary};
use crate::params::{
    validate_committed_capital, validate_time_step, CallRateParams, DistributionParams,
};
use crate::simulation::{
    seeded_rng, CallRateProcess, CallWindow, DistributionProcess, Timeline,
};

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
}

/// Configuration for projecting a partial track record forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Total capital the fund may call over its life
    pub committed_capital: f64,

    /// Years to project beyond the last historical date
    pub projection_years: f64,

    /// Simulation step in years
    pub time_step_years: f64,

    /// Call-rate process parameters for the forward leg
    pub call_rate: CallRateParams,

    /// Distribution process parameters; the target multiple applies to the
    /// whole fund and is re-based internally, and the lag does not apply to
    /// the forward leg (distributions may resume immediately)
    pub distribution: DistributionParams,

    /// Seed for reproducible projections
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            committed_capital: 100.0,
            projection_years: 5.0,
            time_step_years: 0.25,
            call_rate: CallRateParams::default(),
            distribution: DistributionParams::default(),
            random_seed: None,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_time_step(self.time_step_years)?;
        validate_committed_capital(self.committed_capital)?;
        self.distribution.validate()?;
        Ok(())
    }
}

/// Historical and projected cashflows concatenated in date order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub dates: Vec<NaiveDate>,
    pub calls: Vec<f64>,
    pub dists: Vec<f64>,

    /// Residual value at the projection horizon
    pub nav: f64,

    /// True when historical distributions already exceeded the target
    /// multiple; further distributions are clamped to zero in that case
    pub multiple_exceeded: bool,
}

/// Projects a fund forward from realized history.
pub struct ContinuationEngine {
    config: ProjectionConfig,
}

impl ContinuationEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project forward from `history`.
    ///
    /// An empty history degenerates to a from-scratch forward run with the
    /// full budget, starting at the default date.
    pub fn project(&self, history: &[CashflowRecord]) -> Result<ProjectionResult, ModelError> {
        self.config.validate()?;

        let config = &self.config;
        let dt = config.time_step_years;
        let committed = config.committed_capital;
        let target = config.distribution.target_multiple;

        let history = sorted_by_date(history);
        let realized = HistoricalSummary::from_sorted(&history);

        let leftover_capital = (committed - realized.called_so_far).max(0.0);
        let raw_dist_target = target * committed - realized.dist_so_far;
        let multiple_exceeded = raw_dist_target < 0.0;
        if multiple_exceeded {
            log::warn!(
                "historical distributions {:.4} already exceed the target {:.4}; \
                 projecting no further distributions",
                realized.dist_so_far,
                target * committed
            );
        }
        let leftover_dist_target = raw_dist_target.max(0.0);

        let hist_dates: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();
        let hist_calls: Vec<f64> = history.iter().map(|r| r.call).collect();
        let hist_dists: Vec<f64> = history.iter().map(|r| r.dist).collect();

        // Nothing left to call or distribute: terminal, not an error
        if leftover_capital <= 0.0 && leftover_dist_target <= 0.0 {
            return Ok(ProjectionResult {
                dates: hist_dates,
                calls: hist_calls,
                dists: hist_dists,
                nav: 0.0,
                multiple_exceeded,
            });
        }

        // Re-base the target onto the leftover budget
        let scaled_multiple = if leftover_capital > 0.0 {
            leftover_dist_target / leftover_capital
        } else {
            0.0
        };

        let start_date = realized.last_date.unwrap_or_else(default_start_date);
        let num_steps = (config.projection_years / dt).ceil() as usize;
        let timeline = Timeline::forward(start_date, num_steps, dt);

        let mut rng = seeded_rng(config.random_seed);

        let call_schedule = CallRateProcess::new(config.call_rate.clone(), dt).simulate(
            leftover_capital,
            CallWindow::OpenEnded,
            num_steps,
            &mut rng,
        );

        let forward_dist_params = DistributionParams {
            target_multiple: scaled_multiple,
            lag_years: 0.0,
            ..config.distribution.clone()
        };
        let dist_schedule = DistributionProcess::new(forward_dist_params, dt).simulate(
            leftover_capital,
            num_steps,
            &mut rng,
        );
        let nav = dist_schedule.residual_nav(leftover_capital);

        log::debug!(
            "projected {} steps from {}: leftover capital {:.4}, scaled multiple {:.4}",
            num_steps,
            start_date,
            leftover_capital,
            scaled_multiple
        );

        // The schedules carry a trailing grid point that never trades;
        // the projected leg keeps one amount per step
        let mut dates = hist_dates;
        dates.extend_from_slice(timeline.dates());
        let mut calls = hist_calls;
        calls.extend_from_slice(&call_schedule.calls[..num_steps]);
        let mut dists = hist_dists;
        dists.extend_from_slice(&dist_schedule.dists[..num_steps]);

        Ok(ProjectionResult {
            dates,
            calls,
            dists,
            nav,
            multiple_exceeded,
        })
    }
}
