//! Versioned tax-year rule sets.
//!
//! Bracket thresholds, offset tapers, levy parameters and repayment tiers
//! are legislated per financial year, so they ship as data: one module per
//! built-in year, plus a CSV loader for band tables supplied externally.

pub mod fy2023;
pub mod loader;

use taxmate_core::TaxYearConfig;

/// Returns the built-in rule set for the given tax year, if one ships with
/// this build. Years are keyed by the calendar year the financial year ends
/// in (2023 for FY 2022-23).
pub fn config_for_year(tax_year: i32) -> Option<TaxYearConfig> {
    match tax_year {
        2023 => Some(fy2023::tax_year_config()),
        _ => None,
    }
}

/// Tax years with a built-in rule set, newest first.
pub fn builtin_years() -> Vec<i32> {
    vec![2023]
}
