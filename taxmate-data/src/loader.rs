//! CSV loading for externally supplied band tables.
//!
//! Lets a future tax year's rate schedule or repayment tiers be dropped in
//! as CSV without a code change. Parsed tables still go through
//! [`TaxYearConfig::validate`](taxmate_core::TaxYearConfig::validate)
//! before an estimator will accept them.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxmate_core::{RepaymentBand, TaxBand};
use thiserror::Error;

/// Errors that can occur when loading band table data.
#[derive(Debug, Error)]
pub enum BandTableError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),
}

impl From<csv::Error> for BandTableError {
    fn from(err: csv::Error) -> Self {
        BandTableError::CsvParse(err.to_string())
    }
}

/// A single record from an income tax band CSV file.
///
/// Columns:
/// - `min_income`: band floor
/// - `max_income`: band ceiling (empty for unbounded)
/// - `tax_rate`: marginal rate as a decimal (e.g. 0.19 for 19%)
/// - `base_tax`: cumulative tax at the band floor
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBandRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

/// A single record from a repayment tier CSV file.
///
/// Columns: `min_income`, `max_income` (empty for unbounded), `rate`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepaymentBandRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for band tables from CSV.
pub struct BandTableLoader;

impl BandTableLoader {
    /// Parses income tax bands from a CSV reader, in file order.
    pub fn parse_tax_bands<R: Read>(reader: R) -> Result<Vec<TaxBand>, BandTableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut bands = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBandRecord = result?;
            bands.push(TaxBand {
                min_income: record.min_income,
                max_income: record.max_income,
                tax_rate: record.tax_rate,
                base_tax: record.base_tax,
            });
        }

        Ok(bands)
    }

    /// Parses repayment tiers from a CSV reader, in file order.
    pub fn parse_repayment_bands<R: Read>(
        reader: R
    ) -> Result<Vec<RepaymentBand>, BandTableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut bands = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RepaymentBandRecord = result?;
            bands.push(RepaymentBand {
                min_income: record.min_income,
                max_income: record.max_income,
                rate: record.rate,
            });
        }

        Ok(bands)
    }
}
