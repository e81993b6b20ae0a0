//! Square-root call-rate process and capital call schedule
//!
//! The call intensity follows a CIR-like recurrence
//! `delta[i+1] = delta[i] + kappa*(theta - delta[i])*dt
//!             + sigma*sqrt(max(delta[i],0))*sqrt(dt)*z`
//! reflected at zero. Each step calls `leftover * delta[i] * dt`, clamped so
//! leftover capital never goes negative.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::params::CallRateParams;

/// When the rate process is allowed to evolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallWindow {
    /// Evolve only while `t < period` and capital remains; once the window
    /// closes the rate is frozen at zero with no re-entry. Used for full
    /// fund lifecycles.
    Commitment(f64),

    /// Evolve every step; only the call amounts are gated on leftover
    /// capital. Used for forward projections from a partial history.
    OpenEnded,
}

/// Immutable output of one call-rate simulation.
#[derive(Debug, Clone)]
pub struct CallSchedule {
    /// Rate path, one entry per timeline point (`num_steps + 1`)
    pub rates: Vec<f64>,

    /// Call amount per step; the final timeline point never calls
    pub calls: Vec<f64>,

    /// Capital remaining after all calls
    pub leftover: f64,
}

impl CallSchedule {
    pub fn total_called(&self) -> f64 {
        self.calls.iter().sum()
    }
}

/// Mean-reverting square-root process for the capital-call intensity.
#[derive(Debug, Clone)]
pub struct CallRateProcess {
    params: CallRateParams,
    dt: f64,
}

impl CallRateProcess {
    pub fn new(params: CallRateParams, dt: f64) -> Self {
        Self { params, dt }
    }

    /// One Euler step of the rate recurrence, reflected at zero.
    fn step(&self, rate: f64, z: f64) -> f64 {
        let drift = self.params.kappa * (self.params.theta - rate) * self.dt;
        let diffusion = self.params.sigma * rate.max(0.0).sqrt() * self.dt.sqrt() * z;
        (rate + drift + diffusion).max(0.0)
    }

    /// Simulate `num_steps` steps against `capital`.
    ///
    /// Draw discipline matters for reproducibility: in a commitment window a
    /// normal variate is consumed only while the window is open, while the
    /// open-ended window consumes one per step.
    pub fn simulate<R: Rng>(
        &self,
        capital: f64,
        window: CallWindow,
        num_steps: usize,
        rng: &mut R,
    ) -> CallSchedule {
        let mut rates = vec![0.0; num_steps + 1];
        let mut calls = vec![0.0; num_steps + 1];
        rates[0] = self.params.starting_rate();

        let mut leftover = capital;
        for i in 0..num_steps {
            let t = i as f64 * self.dt;
            match window {
                CallWindow::Commitment(period) => {
                    if t < period && leftover > 0.0 {
                        let z: f64 = rng.sample(StandardNormal);
                        rates[i + 1] = self.step(rates[i], z);

                        let amount = (leftover * rates[i] * self.dt).min(leftover);
                        calls[i] = amount;
                        leftover -= amount;
                    } else {
                        // Window closed or capital exhausted: frozen, no re-entry
                        rates[i + 1] = 0.0;
                    }
                }
                CallWindow::OpenEnded => {
                    let z: f64 = rng.sample(StandardNormal);
                    rates[i + 1] = self.step(rates[i], z);

                    if leftover > 0.0 {
                        let amount = (leftover * rates[i] * self.dt).min(leftover);
                        calls[i] = amount;
                        leftover -= amount;
                    }
                }
            }
        }

        CallSchedule {
            rates,
            calls,
            leftover,
        }
    }
}
