//! Crate-wide error type for loading and configuration failures
//!
//! Out-of-range quote input is not an error here: the calculator reports it
//! as a value (see [`crate::quote::OutOfRange`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid annual rate {rate} for {purpose}: must be in [0, 1)")]
    InvalidRate { purpose: String, rate: f64 },

    #[error("unknown loan purpose: {0}")]
    UnknownPurpose(String),
}

pub type Result<T> = std::result::Result<T, LoanError>;
