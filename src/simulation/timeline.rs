//! Discrete quarterly timeline mapping step indices to dates

use chrono::{Months, NaiveDate};

/// Ordered simulation grid: `times[i] = i * dt` years, each paired with a
/// calendar date advancing a fixed number of months per step.
#[derive(Debug, Clone)]
pub struct Timeline {
    times: Vec<f64>,
    dates: Vec<NaiveDate>,
    dt: f64,
}

impl Timeline {
    /// Build a timeline of `num_steps + 1` points starting at `start_date`.
    ///
    /// The calendar stride is `round(12 * dt)` months per step (minimum one),
    /// so the canonical quarterly step lands exactly three months apart.
    pub fn new(start_date: NaiveDate, num_steps: usize, dt: f64) -> Self {
        let months_per_step = ((dt * 12.0).round() as u32).max(1);
        let times = (0..=num_steps).map(|i| i as f64 * dt).collect();
        let dates = (0..=num_steps)
            .map(|i| start_date + Months::new(months_per_step * i as u32))
            .collect();
        Self { times, dates, dt }
    }

    /// Build only the forward leg: `num_steps` points, the first one full
    /// step after `start_date` (the continuation grid shape).
    pub fn forward(start_date: NaiveDate, num_steps: usize, dt: f64) -> Self {
        let months_per_step = ((dt * 12.0).round() as u32).max(1);
        let times = (1..=num_steps).map(|i| i as f64 * dt).collect();
        let dates = (1..=num_steps)
            .map(|i| start_date + Months::new(months_per_step * i as u32))
            .collect();
        Self { times, dates, dt }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of timeline points (steps + 1 for a full grid).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
