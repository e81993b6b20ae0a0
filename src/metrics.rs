//! Fund performance metrics: IRR and capital multiples

use serde::{Deserialize, Serialize};

use crate::simulation::FundCashflows;

/// Annualized internal rate of return for a series of periodic cashflows
/// (positive = inflow to investors, negative = outflow).
///
/// Solves for the periodic rate with Newton-Raphson, falling back to
/// bisection when the derivative degenerates or the iteration fails to
/// converge, then annualizes by compounding. Returns `None` when no sign
/// change exists (no IRR is defined) and `Some(0.0)` for all-zero flows.
pub fn irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }
    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let tolerance = 1e-10;
    let max_iterations = 1000;
    let mut rate = 0.05 / periods_per_year as f64;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_with_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return irr_bisection(cashflows, periods_per_year);
        }

        let next = (rate - npv / dnpv).clamp(-0.99, 10.0);
        if (next - rate).abs() < tolerance {
            return Some(annualize(next, periods_per_year));
        }
        rate = next;
    }

    irr_bisection(cashflows, periods_per_year)
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn npv_with_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;
    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }
    (npv, dnpv)
}

fn irr_bisection(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;

    if npv_at_rate(cashflows, low) * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..1000 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid * npv_at_rate(cashflows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

/// Net investor cashflow per step: distributions minus calls, with the
/// residual NAV treated as a liquidating distribution at the final step.
pub fn net_cashflows(result: &FundCashflows) -> Vec<f64> {
    let mut flows: Vec<f64> = result
        .calls
        .iter()
        .zip(&result.dists)
        .map(|(call, dist)| dist - call)
        .collect();
    if let Some(last) = flows.last_mut() {
        *last += result.nav;
    }
    flows
}

/// Standard private equity performance measures over one cashflow set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundMetrics {
    /// Total capital called
    pub paid_in: f64,

    /// Total capital distributed
    pub distributed: f64,

    /// Residual value at the horizon
    pub nav: f64,

    /// Distributed / paid-in
    pub dpi: Option<f64>,

    /// Residual / paid-in
    pub rvpi: Option<f64>,

    /// (Distributed + residual) / paid-in
    pub tvpi: Option<f64>,

    /// Annualized IRR of the net cashflows including liquidating NAV
    pub irr: Option<f64>,
}

impl FundMetrics {
    /// Compute metrics for a simulated or realized cashflow set.
    pub fn from_cashflows(result: &FundCashflows) -> Self {
        let paid_in: f64 = result.calls.iter().sum();
        let distributed: f64 = result.dists.iter().sum();
        let nav = result.nav;

        let ratio = |num: f64| {
            if paid_in > 0.0 {
                Some(num / paid_in)
            } else {
                None
            }
        };

        let periods_per_year = periods_per_year(&result.times);
        Self {
            paid_in,
            distributed,
            nav,
            dpi: ratio(distributed),
            rvpi: ratio(nav),
            tvpi: ratio(distributed + nav),
            irr: irr(&net_cashflows(result), periods_per_year),
        }
    }
}

/// Infer the compounding frequency from the time grid (4 for quarterly).
fn periods_per_year(times: &[f64]) -> u32 {
    if times.len() >= 2 && times[1] > times[0] {
        (1.0 / (times[1] - times[0])).round().max(1.0) as u32
    } else {
        4
    }
}
