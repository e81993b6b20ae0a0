//! Fund terms, cashflow records, and historical data loading

mod data;
pub mod loader;

pub use data::{CashflowRecord, FundTerms, HistoricalSummary};
pub(crate) use data::sorted_by_date;
pub use loader::{load_cashflows, load_cashflows_from_reader, parse_cashflows_json};
