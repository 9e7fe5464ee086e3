//! Advisory PAYG withholding estimate.
//!
//! Approximates how much tax an employer is likely to have withheld over
//! the year from a given gross income, for users who do not have their
//! payment summary handy. The approximation is a coarse band tax plus a
//! flat Medicare component above a fixed threshold.
//!
//! The figure produced here only pre-fills the "tax withheld" input of the
//! estimator. It is not a liability calculation and must always be
//! presented as an estimate, separate from the engine's final tax.

use rust_decimal::Decimal;

use crate::calculations::common::find_band;
use crate::calculations::estimator::TaxEstimateError;
use crate::models::TaxYearConfig;

/// Estimates annual PAYG withholding for a gross income.
///
/// # Errors
///
/// Returns [`TaxEstimateError`] if the withholding band table is empty or
/// does not cover `gross_income`.
pub fn estimate_withholding(
    config: &TaxYearConfig,
    gross_income: Decimal,
) -> Result<Decimal, TaxEstimateError> {
    if config.withholding.bands.is_empty() {
        return Err(TaxEstimateError::NoWithholdingBands);
    }
    if gross_income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let band = find_band(&config.withholding.bands, gross_income)
        .ok_or(TaxEstimateError::NoMatchingBand(gross_income))?;
    let band_tax = band.base_tax + (gross_income - band.min_income) * band.tax_rate;

    let medicare = if gross_income > config.withholding.medicare_threshold {
        gross_income * config.withholding.medicare_rate
    } else {
        Decimal::ZERO
    };

    Ok(band_tax + medicare)
}
