//! CSV loader for rate overrides
//!
//! Expected header: `purpose,annual_rate`

use csv::Reader;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Default location of the rate table
pub const DEFAULT_RATES_PATH: &str = "data/rates.csv";

/// Raw CSV row
#[derive(Debug, Clone, Deserialize)]
pub struct RateRow {
    pub purpose: String,
    pub annual_rate: f64,
}

/// Load all rows from a CSV file
pub fn load_rate_rows(path: &Path) -> Result<Vec<RateRow>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load rows from any reader
pub fn load_rate_rows_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RateRow>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<RateRow>> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: RateRow = result?;
        rows.push(row);
    }
    Ok(rows)
}
