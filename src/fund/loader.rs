//! Load historical cashflows from CSV or JSON

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use csv::Reader;

use super::CashflowRecord;

/// Raw CSV row matching the track-record export format
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Call")]
    call: f64,
    #[serde(rename = "Dist")]
    dist: f64,
}

impl CsvRow {
    fn to_record(self) -> anyhow::Result<CashflowRecord> {
        if self.call < 0.0 {
            bail!("negative call amount {} on {}", self.call, self.date);
        }
        if self.dist < 0.0 {
            bail!("negative distribution amount {} on {}", self.dist, self.date);
        }
        Ok(CashflowRecord::parse(&self.date, self.call, self.dist)?)
    }
}

/// Load cashflow records from a CSV file with `Date,Call,Dist` columns.
pub fn load_cashflows(path: &Path) -> anyhow::Result<Vec<CashflowRecord>> {
    let reader = Reader::from_path(path)
        .with_context(|| format!("opening cashflow file {}", path.display()))?;
    read_rows(reader)
}

/// Load cashflow records from any CSV reader (for tests and piped input).
pub fn load_cashflows_from_reader<R: Read>(reader: R) -> anyhow::Result<Vec<CashflowRecord>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: Read>(mut reader: Reader<R>) -> anyhow::Result<Vec<CashflowRecord>> {
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row.context("reading cashflow row")?;
        records.push(row.to_record()?);
    }
    log::debug!("loaded {} cashflow records", records.len());
    Ok(records)
}

/// Parse a JSON array of `{"date": "...", "call": x, "dist": y}` objects.
pub fn parse_cashflows_json(json: &str) -> anyhow::Result<Vec<CashflowRecord>> {
    serde_json::from_str(json).context("parsing cashflow JSON")
}
