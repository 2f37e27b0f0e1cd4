//! Batch quote I/O
//!
//! Input columns: `amount,duration[,purpose]`. Output columns:
//! `amount,duration,purpose,annual_rate,monthly_payment,display,error`.

use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{QuoteRecord, QuoteRequest};
use crate::application::LoanPurpose;
use crate::error::Result;
use crate::quote::months_from_number;

/// Raw input row
#[derive(Debug, Deserialize)]
struct CsvRow {
    amount: Option<f64>,
    duration: Option<f64>,
    #[serde(default)]
    purpose: Option<String>,
}

impl CsvRow {
    fn to_request(self) -> Result<QuoteRequest> {
        let purpose = match self.purpose.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(text.parse::<LoanPurpose>()?),
        };

        // Blank cells are missing values and quote as "not applicable"
        Ok(QuoteRequest {
            amount: self.amount.unwrap_or(0.0),
            duration_months: months_from_number(self.duration.unwrap_or(0.0)),
            purpose,
        })
    }
}

/// Output row
#[derive(Debug, Serialize)]
struct QuoteRow {
    amount: f64,
    duration: u32,
    purpose: String,
    annual_rate: f64,
    monthly_payment: Option<i64>,
    display: String,
    error: Option<&'static str>,
}

impl From<&QuoteRecord> for QuoteRow {
    fn from(record: &QuoteRecord) -> Self {
        Self {
            amount: record.request.amount,
            duration: record.request.duration_months,
            purpose: record.request.purpose.map(|p| p.to_string()).unwrap_or_default(),
            annual_rate: record.annual_rate,
            monthly_payment: record.outcome.monthly_payment(),
            display: record.outcome.to_string(),
            error: record.outcome.message(),
        }
    }
}

/// Load quote requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<QuoteRequest>> {
    load_requests_from_reader(std::fs::File::open(path)?)
}

/// Load quote requests from any reader
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<QuoteRequest>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

/// Write quote records as CSV to a file
pub fn write_records<P: AsRef<Path>>(path: P, records: &[QuoteRecord]) -> Result<()> {
    write_records_to_writer(std::fs::File::create(path)?, records)
}

/// Write quote records as CSV to any writer
pub fn write_records_to_writer<W: std::io::Write>(writer: W, records: &[QuoteRecord]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(QuoteRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}
