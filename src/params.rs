//! Stochastic model parameters for the call and distribution processes

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Parameters of the square-root call-rate process.
///
/// The call rate `delta(t)` follows a CIR-like recurrence:
/// `d_delta = kappa * (theta - delta) * dt + sigma * sqrt(delta) * dW`,
/// reflected at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRateParams {
    /// Speed of mean reversion
    pub kappa: f64,

    /// Long-run mean call rate (dimensionless fraction of leftover capital
    /// called per year)
    pub theta: f64,

    /// Volatility of the call-rate process
    pub sigma: f64,

    /// Initial call rate; defaults to `theta` when not set
    #[serde(default)]
    pub initial_rate: Option<f64>,
}

impl CallRateParams {
    /// Starting value of the rate process.
    pub fn starting_rate(&self) -> f64 {
        self.initial_rate.unwrap_or(self.theta)
    }
}

impl Default for CallRateParams {
    fn default() -> Self {
        Self {
            kappa: 2.0,
            theta: 0.5,
            sigma: 0.3,
            initial_rate: None,
        }
    }
}

/// Parameters of the distribution-fraction process.
///
/// A fraction `M(t)` of the target multiple converges toward
/// `target_multiple` once `lag_years` have elapsed; each upward increment of
/// `M` becomes a distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Speed of convergence toward the target multiple
    pub alpha: f64,

    /// Total distributions as a multiple of committed capital
    pub target_multiple: f64,

    /// Volatility of the fraction increments
    pub sigma: f64,

    /// Years before any distributions occur
    pub lag_years: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            alpha: 0.03,
            target_multiple: 1.6,
            sigma: 0.2,
            lag_years: 2.0,
        }
    }
}

impl DistributionParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.target_multiple < 0.0 {
            return Err(ModelError::invalid(
                "target_multiple",
                format!("must be non-negative, got {}", self.target_multiple),
            ));
        }
        Ok(())
    }
}

/// Validate a time step shared by every process.
pub(crate) fn validate_time_step(dt: f64) -> Result<(), ModelError> {
    if !(dt > 0.0) {
        return Err(ModelError::invalid(
            "time_step_years",
            format!("must be positive, got {}", dt),
        ));
    }
    Ok(())
}

/// Validate a committed-capital amount.
pub(crate) fn validate_committed_capital(committed_capital: f64) -> Result<(), ModelError> {
    if committed_capital < 0.0 {
        return Err(ModelError::invalid(
            "committed_capital",
            format!("must be non-negative, got {}", committed_capital),
        ));
    }
    Ok(())
}
