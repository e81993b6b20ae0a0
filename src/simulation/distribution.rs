//! Distribution-fraction process
//!
//! Tracks a fraction `M(t)` of the target multiple, frozen until the
//! distribution lag has elapsed and converging toward the target afterward:
//! `M[i+1] = clamp(M[i] + alpha*(target - M[i])*dt + sigma*sqrt(dt)*z,
//!                 0, target)`.
//! Each upward increment of `M` pays out against the capital base; a
//! downward stochastic move pays nothing (no clawbacks).

use rand::Rng;
use rand_distr::StandardNormal;

use crate::params::DistributionParams;

/// Immutable output of one distribution-fraction simulation.
#[derive(Debug, Clone)]
pub struct DistributionSchedule {
    /// Fraction path, one entry per timeline point (`num_steps + 1`)
    pub fractions: Vec<f64>,

    /// Distribution amount per step; the final timeline point never pays
    pub dists: Vec<f64>,

    target: f64,
}

impl DistributionSchedule {
    pub fn total_distributed(&self) -> f64 {
        self.dists.iter().sum()
    }

    /// Undistributed value remaining at the end of the horizon.
    pub fn residual_nav(&self, capital_base: f64) -> f64 {
        let final_fraction = self.fractions.last().copied().unwrap_or(0.0);
        if final_fraction < self.target {
            (self.target - final_fraction) * capital_base
        } else {
            0.0
        }
    }
}

/// Mean-reverting bounded process for the cumulative distribution fraction.
#[derive(Debug, Clone)]
pub struct DistributionProcess {
    params: DistributionParams,
    dt: f64,
}

impl DistributionProcess {
    pub fn new(params: DistributionParams, dt: f64) -> Self {
        Self { params, dt }
    }

    /// Simulate `num_steps` steps paying against `capital_base`.
    ///
    /// Before the lag no variate is drawn and the fraction carries forward
    /// unchanged; from the lag onward one variate is consumed per step.
    pub fn simulate<R: Rng>(
        &self,
        capital_base: f64,
        num_steps: usize,
        rng: &mut R,
    ) -> DistributionSchedule {
        let target = self.params.target_multiple;
        let mut fractions = vec![0.0; num_steps + 1];
        let mut dists = vec![0.0; num_steps + 1];

        for i in 0..num_steps {
            let t = i as f64 * self.dt;
            if t >= self.params.lag_years {
                let z: f64 = rng.sample(StandardNormal);
                let increment = self.params.alpha * (target - fractions[i]) * self.dt
                    + self.params.sigma * self.dt.sqrt() * z;
                let next = (fractions[i] + increment).clamp(0.0, target);
                fractions[i + 1] = next;
                dists[i] = (next - fractions[i]).max(0.0) * capital_base;
            } else {
                fractions[i + 1] = fractions[i];
            }
        }

        DistributionSchedule {
            fractions,
            dists,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::seeded_rng;
    use approx::assert_relative_eq;

    fn process(sigma: f64, lag: f64) -> DistributionProcess {
        DistributionProcess::new(
            DistributionParams {
                sigma,
                lag_years: lag,
                ..Default::default()
            },
            0.25,
        )
    }

    #[test]
    fn test_frozen_before_lag() {
        let mut rng = seeded_rng(Some(42));
        let schedule = process(0.2, 2.0).simulate(100.0, 40, &mut rng);

        // t < 2.0 for steps 0..8: fraction unchanged, nothing paid
        for i in 0..8 {
            assert_eq!(schedule.fractions[i], 0.0);
            assert_eq!(schedule.dists[i], 0.0);
        }
    }

    #[test]
    fn test_fraction_bounded_by_target() {
        for seed in 0..20 {
            let mut rng = seeded_rng(Some(seed));
            let schedule = process(0.8, 0.0).simulate(100.0, 40, &mut rng);
            assert!(schedule
                .fractions
                .iter()
                .all(|&m| (0.0..=1.6 + 1e-12).contains(&m)));
            assert!(schedule.dists.iter().all(|&d| d >= 0.0));
        }
    }

    #[test]
    fn test_payout_plus_nav_reaches_target() {
        // Telescoping: with no downward moves, paid + residual == target * base
        let mut rng = seeded_rng(Some(42));
        let schedule = process(0.0, 2.0).simulate(100.0, 40, &mut rng);
        let total = schedule.total_distributed() + schedule.residual_nav(100.0);
        assert_relative_eq!(total, 160.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_target_stays_at_zero() {
        let proc = DistributionProcess::new(
            DistributionParams {
                target_multiple: 0.0,
                lag_years: 0.0,
                ..Default::default()
            },
            0.25,
        );
        let mut rng = seeded_rng(Some(9));
        let schedule = proc.simulate(50.0, 20, &mut rng);
        assert!(schedule.fractions.iter().all(|&m| m == 0.0));
        assert_eq!(schedule.total_distributed(), 0.0);
        assert_eq!(schedule.residual_nav(50.0), 0.0);
    }

    #[test]
    fn test_downward_move_pays_nothing() {
        for seed in 0..50 {
            let mut rng = seeded_rng(Some(seed));
            let schedule = process(0.5, 0.0).simulate(100.0, 40, &mut rng);
            for i in 0..40 {
                let diff = schedule.fractions[i + 1] - schedule.fractions[i];
                if diff < 0.0 {
                    assert_eq!(schedule.dists[i], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_given_seed() {
        let run = || {
            let mut rng = seeded_rng(Some(42));
            process(0.2, 2.0).simulate(100.0, 40, &mut rng)
        };
        assert_eq!(run().fractions, run().fractions);
        assert_eq!(run().dists, run().dists);
    }
}
