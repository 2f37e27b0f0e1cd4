//! Annual rate policy used for indicative quotes
//!
//! The simulator quotes every purpose at a flat 3%. Products can override
//! the rate per loan purpose, either in code or from a CSV file.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::application::LoanPurpose;
use crate::error::{LoanError, Result};
use crate::quote::INDICATIVE_ANNUAL_RATE;

/// Annual rates by loan purpose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePolicy {
    /// Rate for purposes without an override
    pub default_annual_rate: f64,

    /// Per-purpose rates
    #[serde(default)]
    pub overrides: BTreeMap<LoanPurpose, f64>,
}

impl RatePolicy {
    /// Flat indicative 3% for every purpose
    pub fn indicative() -> Self {
        Self {
            default_annual_rate: INDICATIVE_ANNUAL_RATE,
            overrides: BTreeMap::new(),
        }
    }

    /// Flat policy at a given rate
    pub fn flat(annual_rate: f64) -> Result<Self> {
        check_rate("default", annual_rate)?;
        Ok(Self {
            default_annual_rate: annual_rate,
            overrides: BTreeMap::new(),
        })
    }

    /// Load overrides from `purpose,annual_rate` CSV rows.
    ///
    /// A row with purpose `default` replaces the default rate.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let rows = loader::load_rate_rows(path)?;
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<loader::RateRow>) -> Result<Self> {
        let mut policy = Self::indicative();
        for row in rows {
            if row.purpose.trim().eq_ignore_ascii_case("default") {
                check_rate("default", row.annual_rate)?;
                policy.default_annual_rate = row.annual_rate;
            } else {
                let purpose: LoanPurpose = row.purpose.parse()?;
                policy = policy.with_override(purpose, row.annual_rate)?;
            }
        }
        log::debug!(
            "rate policy: default {:.4}, {} override(s)",
            policy.default_annual_rate,
            policy.overrides.len()
        );
        Ok(policy)
    }

    /// Set the rate for one purpose
    pub fn with_override(mut self, purpose: LoanPurpose, annual_rate: f64) -> Result<Self> {
        check_rate(purpose.as_str(), annual_rate)?;
        self.overrides.insert(purpose, annual_rate);
        Ok(self)
    }

    pub fn rate_for(&self, purpose: LoanPurpose) -> f64 {
        self.overrides
            .get(&purpose)
            .copied()
            .unwrap_or(self.default_annual_rate)
    }

    /// Rate for a purpose that may not be chosen yet
    pub fn rate_for_optional(&self, purpose: Option<LoanPurpose>) -> f64 {
        purpose.map_or(self.default_annual_rate, |p| self.rate_for(p))
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self::indicative()
    }
}

fn check_rate(purpose: &str, rate: f64) -> Result<()> {
    if rate.is_finite() && (0.0..1.0).contains(&rate) {
        Ok(())
    } else {
        Err(LoanError::InvalidRate {
            purpose: purpose.to_string(),
            rate,
        })
    }
}
