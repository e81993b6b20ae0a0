//! Fund terms and realized cashflow records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::params::{validate_committed_capital, validate_time_step};

/// Structural terms of a private equity fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundTerms {
    /// Total capital the fund may call over its life
    pub committed_capital: f64,

    /// Years during which capital may be called
    pub commitment_period_years: f64,

    /// Total modeled fund life in years
    pub fund_life_years: f64,

    /// Simulation step in years (0.25 = quarterly)
    pub time_step_years: f64,
}

impl Default for FundTerms {
    fn default() -> Self {
        Self {
            committed_capital: 100.0,
            commitment_period_years: 5.0,
            fund_life_years: 10.0,
            time_step_years: 0.25,
        }
    }
}

impl FundTerms {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_time_step(self.time_step_years)?;
        validate_committed_capital(self.committed_capital)?;
        Ok(())
    }

    /// Number of simulation steps covering the fund life.
    pub fn num_steps(&self) -> usize {
        (self.fund_life_years / self.time_step_years).ceil() as usize
    }
}

/// One realized cashflow observation: a call and/or a distribution on a date.
///
/// Dates deserialize from ISO-8601 (`YYYY-MM-DD`); an unparseable date fails
/// the whole load before any simulation state exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRecord {
    pub date: NaiveDate,

    /// Capital called on this date (non-negative)
    #[serde(default)]
    pub call: f64,

    /// Capital distributed on this date (non-negative)
    #[serde(default)]
    pub dist: f64,
}

impl CashflowRecord {
    pub fn new(date: NaiveDate, call: f64, dist: f64) -> Self {
        Self { date, call, dist }
    }

    /// Parse a record from a raw ISO date string.
    pub fn parse(date: &str, call: f64, dist: f64) -> Result<Self, ModelError> {
        let date = date
            .parse::<NaiveDate>()
            .map_err(|_| ModelError::InvalidDate(date.to_string()))?;
        Ok(Self { date, call, dist })
    }
}

/// Aggregates over a sorted slice of historical cashflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalSummary {
    pub called_so_far: f64,
    pub dist_so_far: f64,
    pub last_date: Option<NaiveDate>,
}

impl HistoricalSummary {
    /// Summarize records that are already in date order.
    pub fn from_sorted(records: &[CashflowRecord]) -> Self {
        Self {
            called_so_far: records.iter().map(|r| r.call).sum(),
            dist_so_far: records.iter().map(|r| r.dist).sum(),
            last_date: records.last().map(|r| r.date),
        }
    }
}

/// Sort records by date, returning a new vector.
pub(crate) fn sorted_by_date(records: &[CashflowRecord]) -> Vec<CashflowRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let rec = CashflowRecord::parse("2021-06-30", 10.0, 0.0).unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2021, 6, 30).unwrap());
        assert_eq!(rec.call, 10.0);
    }

    #[test]
    fn test_parse_bad_date_fails() {
        let err = CashflowRecord::parse("06/30/2021", 10.0, 0.0).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDate(_)));
    }

    #[test]
    fn test_summary_sums_and_last_date() {
        let records = vec![
            CashflowRecord::parse("2020-01-01", 25.0, 0.0).unwrap(),
            CashflowRecord::parse("2020-04-01", 15.0, 5.0).unwrap(),
        ];
        let summary = HistoricalSummary::from_sorted(&records);
        assert_eq!(summary.called_so_far, 40.0);
        assert_eq!(summary.dist_so_far, 5.0);
        assert_eq!(
            summary.last_date,
            Some(NaiveDate::from_ymd_opt(2020, 4, 1).unwrap())
        );
    }

    #[test]
    fn test_sorting_is_stable_on_date() {
        let records = vec![
            CashflowRecord::parse("2021-01-01", 1.0, 0.0).unwrap(),
            CashflowRecord::parse("2020-01-01", 2.0, 0.0).unwrap(),
        ];
        let sorted = sorted_by_date(&records);
        assert_eq!(sorted[0].call, 2.0);
        assert_eq!(sorted[1].call, 1.0);
    }

    #[test]
    fn test_default_terms_steps() {
        let terms = FundTerms::default();
        assert_eq!(terms.num_steps(), 40);
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let rec = CashflowRecord::parse("2020-01-01", 12.5, 0.0).unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        let back: CashflowRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
