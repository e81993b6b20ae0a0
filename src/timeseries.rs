//! Synthetic value paths via geometric Brownian motion
//!
//! Used to fabricate plausible NAV/price series for dashboards and test
//! fixtures: `S[i+1] = S[i] * exp((mu - sigma^2/2)*dt + sigma*sqrt(dt)*z)`.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Parameters of a geometric Brownian motion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmParams {
    /// Value at the first point
    pub initial_value: f64,

    /// Annualized drift
    pub drift: f64,

    /// Annualized volatility
    pub volatility: f64,

    /// Step size in the drift/volatility time unit
    pub dt: f64,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            initial_value: 100.0,
            drift: 0.05,
            volatility: 0.2,
            dt: 1.0,
        }
    }
}

/// Generate a GBM path of `num_points` values, initial value included.
pub fn gbm_path<R: Rng>(params: &GbmParams, num_points: usize, rng: &mut R) -> Vec<f64> {
    let mut values = Vec::with_capacity(num_points);
    if num_points == 0 {
        return values;
    }

    let drift_term = (params.drift - 0.5 * params.volatility * params.volatility) * params.dt;
    let vol_term = params.volatility * params.dt.sqrt();

    let mut current = params.initial_value;
    values.push(current);
    for _ in 1..num_points {
        let z: f64 = rng.sample(StandardNormal);
        current *= (drift_term + vol_term * z).exp();
        values.push(current);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::seeded_rng;
    use approx::assert_relative_eq;

    #[test]
    fn test_path_length_and_start() {
        let mut rng = seeded_rng(Some(42));
        let path = gbm_path(&GbmParams::default(), 100, &mut rng);
        assert_eq!(path.len(), 100);
        assert_eq!(path[0], 100.0);
    }

    #[test]
    fn test_values_stay_positive() {
        let mut rng = seeded_rng(Some(7));
        let path = gbm_path(&GbmParams::default(), 500, &mut rng);
        assert!(path.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let run = || gbm_path(&GbmParams::default(), 50, &mut seeded_rng(Some(42)));
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zero_volatility_compounds_drift() {
        let params = GbmParams {
            volatility: 0.0,
            ..Default::default()
        };
        let mut rng = seeded_rng(Some(1));
        let path = gbm_path(&params, 3, &mut rng);
        assert_relative_eq!(path[1], 100.0 * 0.05_f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(path[2], 100.0 * 0.10_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_path() {
        let mut rng = seeded_rng(Some(1));
        assert!(gbm_path(&GbmParams::default(), 0, &mut rng).is_empty());
    }
}
