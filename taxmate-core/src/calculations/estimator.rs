//! The tax estimation engine.
//!
//! Converts one [`TaxInputs`] record into a fully itemized [`TaxResult`]
//! using the rule set for a single tax year:
//!
//! | Step | Rule |
//! |------|------|
//! | 1    | Total income: sum of employment incomes plus business income |
//! | 2    | Total deductions: itemized claims plus the fixed-rate WFH claim |
//! | 3    | Taxable income: total income minus deductions, floored at zero |
//! | 4    | Gross tax from the progressive resident rate bands |
//! | 5    | Low Income Tax Offset (tapering, never negative) |
//! | 6    | Medicare levy with low-income shade-in and family thresholds |
//! | 7    | HECS-HELP compulsory repayment from the tiered schedule |
//! | 8    | Final tax: `max(0, gross - offset + levy + repayment)` |
//!
//! The engine is pure: identical inputs against the same rule set always
//! produce the identical result, and nothing here performs I/O or rounds.
//! Display rounding belongs to the report layer.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxmate_core::calculations::TaxEstimator;
//! use taxmate_core::{DeductionCategories, TaxInputs};
//!
//! # fn config() -> taxmate_core::TaxYearConfig {
//! #     use taxmate_core::*;
//! #     TaxYearConfig {
//! #         tax_year: 2023,
//! #         year_label: "2022-23".into(),
//! #         income_tax_bands: vec![
//! #             TaxBand { min_income: dec!(0), max_income: Some(dec!(18200)), tax_rate: dec!(0), base_tax: dec!(0) },
//! #             TaxBand { min_income: dec!(18200), max_income: Some(dec!(45000)), tax_rate: dec!(0.19), base_tax: dec!(0) },
//! #             TaxBand { min_income: dec!(45000), max_income: Some(dec!(120000)), tax_rate: dec!(0.325), base_tax: dec!(5092) },
//! #             TaxBand { min_income: dec!(120000), max_income: Some(dec!(180000)), tax_rate: dec!(0.37), base_tax: dec!(29467) },
//! #             TaxBand { min_income: dec!(180000), max_income: None, tax_rate: dec!(0.45), base_tax: dec!(51667) },
//! #         ],
//! #         lito_bands: vec![],
//! #         medicare: MedicareConfig {
//! #             levy_rate: dec!(0.02),
//! #             single_threshold: dec!(27222),
//! #             family_threshold: dec!(45907),
//! #             per_dependent: dec!(4216),
//! #             shade_in_ceiling_factor: dec!(1.1),
//! #         },
//! #         hecs_bands: vec![],
//! #         work_from_home_rate: dec!(0.67),
//! #         withholding: WithholdingConfig {
//! #             bands: vec![TaxBand { min_income: dec!(0), max_income: None, tax_rate: dec!(0.2), base_tax: dec!(0) }],
//! #             medicare_threshold: dec!(27222),
//! #             medicare_rate: dec!(0.02),
//! #         },
//! #     }
//! # }
//! let config = config();
//! let estimator = TaxEstimator::new(&config);
//!
//! let inputs = TaxInputs {
//!     employment_incomes: vec![dec!(75000)],
//!     business_income: dec!(0),
//!     tax_withheld: dec!(15000),
//!     deductions: DeductionCategories::default(),
//!     work_from_home_hours: dec!(0),
//!     has_hecs_debt: false,
//!     is_medicare_exempt: false,
//!     dependent_count: 0,
//! };
//!
//! let result = estimator.estimate(&inputs).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(75000));
//! assert_eq!(result.gross_tax, dec!(14842.000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{find_band, max};
use crate::models::{TaxInputs, TaxResult, TaxYearConfig};

/// Errors that can occur during estimation.
///
/// With a structurally valid rule set (see [`TaxYearConfig::validate`])
/// none of these variants are reachable for any numeric input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxEstimateError {
    /// The rule set has no income tax bands.
    #[error("no income tax bands in rule set")]
    NoIncomeTaxBands,

    /// The rule set has no withholding bands.
    #[error("no withholding bands in rule set")]
    NoWithholdingBands,

    /// No income tax band covers the given taxable income.
    #[error("no income tax band covers taxable income {0}")]
    NoMatchingBand(Decimal),
}

/// Calculator for one tax year's rule set.
///
/// Stateless apart from the borrowed configuration; a single estimator may
/// serve any number of concurrent calculations.
#[derive(Debug, Clone)]
pub struct TaxEstimator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> TaxEstimator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Runs the complete estimation and returns the itemized result.
    ///
    /// Optional deduction leaves that were never filled in count as zero;
    /// an empty employment income list totals to zero. Negative inputs are
    /// the caller's responsibility to reject.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEstimateError`] only when the rule set itself is
    /// degenerate (empty or non-contiguous income tax bands).
    pub fn estimate(
        &self,
        inputs: &TaxInputs,
    ) -> Result<TaxResult, TaxEstimateError> {
        if self.config.income_tax_bands.is_empty() {
            return Err(TaxEstimateError::NoIncomeTaxBands);
        }

        let total_employment_income = self.total_employment_income(&inputs.employment_incomes);
        let total_business_income = inputs.business_income;
        let total_income = total_employment_income + total_business_income;

        let work_from_home_deduction = self.work_from_home_deduction(inputs.work_from_home_hours);
        let total_manual_deductions = inputs.deductions.total();
        let total_deductions = total_manual_deductions + work_from_home_deduction;

        let taxable_income = self.taxable_income(total_income, total_deductions);

        let gross_tax = self.gross_tax(taxable_income)?;
        let low_income_offset = self.low_income_offset(taxable_income);
        let medicare_levy = self.medicare_levy(
            taxable_income,
            inputs.is_medicare_exempt,
            inputs.dependent_count,
        );
        let hecs_repayment = self.hecs_repayment(taxable_income, inputs.has_hecs_debt);

        let final_tax = max(
            gross_tax - low_income_offset + medicare_levy + hecs_repayment,
            Decimal::ZERO,
        );
        let refund_or_owing = inputs.tax_withheld - final_tax;
        let effective_tax_rate = if taxable_income > Decimal::ZERO {
            final_tax / taxable_income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        debug!(
            year = self.config.year_label,
            %taxable_income,
            %final_tax,
            %refund_or_owing,
            "estimate complete"
        );

        Ok(TaxResult {
            total_employment_income,
            total_business_income,
            total_income,
            work_from_home_deduction,
            total_manual_deductions,
            total_deductions,
            taxable_income,
            gross_tax,
            low_income_offset,
            medicare_levy,
            hecs_repayment,
            final_tax,
            refund_or_owing,
            effective_tax_rate,
        })
    }

    /// Sums per-job gross incomes; an empty list is simply zero.
    fn total_employment_income(
        &self,
        incomes: &[Decimal],
    ) -> Decimal {
        incomes.iter().copied().sum()
    }

    /// Fixed-rate shortcut method claim.
    fn work_from_home_deduction(
        &self,
        hours: Decimal,
    ) -> Decimal {
        hours * self.config.work_from_home_rate
    }

    /// Taxable income never goes below zero, no matter how large the claims.
    fn taxable_income(
        &self,
        total_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        max(total_income - total_deductions, Decimal::ZERO)
    }

    /// Progressive tax from the resident rate bands: the matching band's
    /// base amount plus its marginal rate on income above the band floor.
    fn gross_tax(
        &self,
        taxable_income: Decimal,
    ) -> Result<Decimal, TaxEstimateError> {
        if taxable_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let band = find_band(&self.config.income_tax_bands, taxable_income)
            .ok_or(TaxEstimateError::NoMatchingBand(taxable_income))?;

        let marginal_income = taxable_income - band.min_income;
        Ok(band.base_tax + marginal_income * band.tax_rate)
    }

    /// Low Income Tax Offset: full amount up to the first threshold, then
    /// tapering away. Incomes past the last band get nothing, and the taper
    /// never drives the offset negative.
    fn low_income_offset(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let Some(band) = find_band(&self.config.lito_bands, taxable_income) else {
            return Decimal::ZERO;
        };

        let tapered = band.base_offset - (taxable_income - band.min_income) * band.taper_rate;
        max(tapered, Decimal::ZERO)
    }

    /// Medicare levy with the low-income shade-in.
    ///
    /// The threshold switches to the family schedule as soon as there is at
    /// least one dependant. Between the threshold and 110% of it the full
    /// levy phases in linearly; above that it is a flat percentage of the
    /// whole taxable income.
    fn medicare_levy(
        &self,
        taxable_income: Decimal,
        is_exempt: bool,
        dependent_count: u32,
    ) -> Decimal {
        if is_exempt {
            return Decimal::ZERO;
        }

        let medicare = &self.config.medicare;
        let threshold = if dependent_count > 0 {
            medicare.family_threshold + Decimal::from(dependent_count) * medicare.per_dependent
        } else {
            medicare.single_threshold
        };

        if taxable_income <= threshold {
            return Decimal::ZERO;
        }

        let full_levy = taxable_income * medicare.levy_rate;
        let shade_in_ceiling = threshold * medicare.shade_in_ceiling_factor;
        if taxable_income <= shade_in_ceiling {
            // Divide last so the phase-in is exact at the ceiling.
            full_levy * (taxable_income - threshold) / (shade_in_ceiling - threshold)
        } else {
            full_levy
        }
    }

    /// HECS-HELP compulsory repayment: the matching tier's rate applied to
    /// the whole taxable income. No debt, or income below the first tier,
    /// means no repayment.
    fn hecs_repayment(
        &self,
        taxable_income: Decimal,
        has_hecs_debt: bool,
    ) -> Decimal {
        if !has_hecs_debt {
            return Decimal::ZERO;
        }

        match find_band(&self.config.hecs_bands, taxable_income) {
            Some(band) => taxable_income * band.rate,
            None => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{
        DeductionCategories, MedicareConfig, OffsetBand, RepaymentBand, TaxBand,
        WithholdingConfig, WorkRelatedDeductions,
    };

    use super::*;

    fn fy2023_config() -> TaxYearConfig {
        let income_tax_bands = vec![
            TaxBand {
                min_income: dec!(0),
                max_income: Some(dec!(18200)),
                tax_rate: dec!(0),
                base_tax: dec!(0),
            },
            TaxBand {
                min_income: dec!(18200),
                max_income: Some(dec!(45000)),
                tax_rate: dec!(0.19),
                base_tax: dec!(0),
            },
            TaxBand {
                min_income: dec!(45000),
                max_income: Some(dec!(120000)),
                tax_rate: dec!(0.325),
                base_tax: dec!(5092),
            },
            TaxBand {
                min_income: dec!(120000),
                max_income: Some(dec!(180000)),
                tax_rate: dec!(0.37),
                base_tax: dec!(29467),
            },
            TaxBand {
                min_income: dec!(180000),
                max_income: None,
                tax_rate: dec!(0.45),
                base_tax: dec!(51667),
            },
        ];

        TaxYearConfig {
            tax_year: 2023,
            year_label: "2022-23".to_string(),
            withholding: WithholdingConfig {
                bands: income_tax_bands.clone(),
                medicare_threshold: dec!(27222),
                medicare_rate: dec!(0.02),
            },
            income_tax_bands,
            lito_bands: vec![
                OffsetBand {
                    min_income: dec!(0),
                    max_income: Some(dec!(37500)),
                    base_offset: dec!(700),
                    taper_rate: dec!(0),
                },
                OffsetBand {
                    min_income: dec!(37500),
                    max_income: Some(dec!(45000)),
                    base_offset: dec!(700),
                    taper_rate: dec!(0.05),
                },
                OffsetBand {
                    min_income: dec!(45000),
                    max_income: Some(dec!(66667)),
                    base_offset: dec!(325),
                    taper_rate: dec!(0.015),
                },
            ],
            medicare: MedicareConfig {
                levy_rate: dec!(0.02),
                single_threshold: dec!(27222),
                family_threshold: dec!(45907),
                per_dependent: dec!(4216),
                shade_in_ceiling_factor: dec!(1.1),
            },
            hecs_bands: vec![
                RepaymentBand { min_income: dec!(51000), max_income: Some(dec!(59999)), rate: dec!(0.01) },
                RepaymentBand { min_income: dec!(60000), max_income: Some(dec!(67999)), rate: dec!(0.02) },
                RepaymentBand { min_income: dec!(68000), max_income: Some(dec!(71999)), rate: dec!(0.025) },
                RepaymentBand { min_income: dec!(72000), max_income: Some(dec!(78999)), rate: dec!(0.03) },
                RepaymentBand { min_income: dec!(79000), max_income: Some(dec!(88999)), rate: dec!(0.035) },
                RepaymentBand { min_income: dec!(89000), max_income: Some(dec!(97999)), rate: dec!(0.04) },
                RepaymentBand { min_income: dec!(98000), max_income: Some(dec!(109999)), rate: dec!(0.045) },
                RepaymentBand { min_income: dec!(110000), max_income: Some(dec!(124999)), rate: dec!(0.05) },
                RepaymentBand { min_income: dec!(125000), max_income: Some(dec!(139999)), rate: dec!(0.055) },
                RepaymentBand { min_income: dec!(140000), max_income: Some(dec!(151999)), rate: dec!(0.06) },
                RepaymentBand { min_income: dec!(152000), max_income: None, rate: dec!(0.065) },
            ],
            work_from_home_rate: dec!(0.67),
        }
    }

    fn basic_inputs() -> TaxInputs {
        TaxInputs {
            employment_incomes: vec![dec!(75000)],
            business_income: dec!(0),
            tax_withheld: dec!(15000),
            deductions: DeductionCategories::default(),
            work_from_home_hours: dec!(0),
            has_hecs_debt: false,
            is_medicare_exempt: false,
            dependent_count: 0,
        }
    }

    // =========================================================================
    // gross_tax tests
    // =========================================================================

    #[test]
    fn gross_tax_is_zero_at_tax_free_threshold() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.gross_tax(dec!(18200)), Ok(dec!(0)));
    }

    #[test]
    fn gross_tax_is_zero_for_zero_income() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.gross_tax(dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn gross_tax_is_continuous_at_band_boundaries() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.gross_tax(dec!(45000)), Ok(dec!(5092.00)));
        assert_eq!(estimator.gross_tax(dec!(120000)), Ok(dec!(29467.000)));
        assert_eq!(estimator.gross_tax(dec!(180000)), Ok(dec!(51667.00)));
    }

    #[test]
    fn gross_tax_second_band() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // (30000 - 18200) × 0.19 = 2242
        assert_eq!(estimator.gross_tax(dec!(30000)), Ok(dec!(2242.00)));
    }

    #[test]
    fn gross_tax_top_band() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // 51667 + (250000 - 180000) × 0.45 = 83167
        assert_eq!(estimator.gross_tax(dec!(250000)), Ok(dec!(83167.00)));
    }

    #[test]
    fn gross_tax_is_non_decreasing() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        let samples = [
            dec!(0),
            dec!(18200),
            dec!(18201),
            dec!(44999),
            dec!(45000),
            dec!(100000),
            dec!(120000),
            dec!(180000),
            dec!(500000),
        ];
        let mut previous = Decimal::ZERO;
        for income in samples {
            let tax = estimator.gross_tax(income).unwrap();
            assert!(tax >= previous, "tax decreased at income {income}");
            previous = tax;
        }
    }

    // =========================================================================
    // low_income_offset tests
    // =========================================================================

    #[test]
    fn lito_full_amount_below_first_threshold() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.low_income_offset(dec!(0)), dec!(700));
        assert_eq!(estimator.low_income_offset(dec!(37500)), dec!(700));
    }

    #[test]
    fn lito_first_taper() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // 700 - (40000 - 37500) × 0.05 = 575
        assert_eq!(estimator.low_income_offset(dec!(40000)), dec!(575.00));
        assert_eq!(estimator.low_income_offset(dec!(45000)), dec!(325.00));
    }

    #[test]
    fn lito_second_taper() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // 325 - (60000 - 45000) × 0.015 = 100
        assert_eq!(estimator.low_income_offset(dec!(60000)), dec!(100.000));
    }

    #[test]
    fn lito_is_zero_above_final_threshold() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.low_income_offset(dec!(66668)), dec!(0));
        assert_eq!(estimator.low_income_offset(dec!(100000)), dec!(0));
    }

    #[test]
    fn lito_is_non_increasing() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        let samples = [
            dec!(0),
            dec!(37500),
            dec!(37501),
            dec!(45000),
            dec!(45001),
            dec!(66667),
            dec!(66668),
            dec!(80000),
        ];
        let mut previous = dec!(700);
        for income in samples {
            let offset = estimator.low_income_offset(income);
            assert!(offset <= previous, "offset increased at income {income}");
            assert!(offset >= Decimal::ZERO, "offset negative at income {income}");
            previous = offset;
        }
    }

    // =========================================================================
    // medicare_levy tests
    // =========================================================================

    #[test]
    fn medicare_levy_is_zero_when_exempt() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.medicare_levy(dec!(100000), true, 0), dec!(0));
    }

    #[test]
    fn medicare_levy_is_zero_at_or_below_threshold() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.medicare_levy(dec!(27222), false, 0), dec!(0));
        assert_eq!(estimator.medicare_levy(dec!(20000), false, 0), dec!(0));
    }

    #[test]
    fn medicare_levy_is_full_rate_above_shade_in_band() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // 75000 > 27222 × 1.1, so the full 2% applies.
        assert_eq!(estimator.medicare_levy(dec!(75000), false, 0), dec!(1500.00));
    }

    #[test]
    fn medicare_levy_is_continuous_at_shade_in_boundaries() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // Just above the threshold the levy is still close to zero.
        let near_threshold = estimator.medicare_levy(dec!(27222.01), false, 0);
        assert!(near_threshold > Decimal::ZERO);
        assert!(near_threshold < dec!(0.01));

        // At the shade-in ceiling the phased levy meets the flat levy exactly.
        let ceiling = dec!(29944.2); // 27222 × 1.1
        let at_ceiling = estimator.medicare_levy(ceiling, false, 0);
        assert_eq!(at_ceiling, ceiling * dec!(0.02));
    }

    #[test]
    fn medicare_levy_phases_in_within_shade_band() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        let levy = estimator.medicare_levy(dec!(28500), false, 0);

        assert!(levy > Decimal::ZERO);
        assert!(levy < dec!(28500) * dec!(0.02));
    }

    #[test]
    fn medicare_levy_uses_family_threshold_with_dependants() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // Two dependants: threshold = 45907 + 2 × 4216 = 54339.
        assert_eq!(estimator.medicare_levy(dec!(54339), false, 2), dec!(0));
        // The same income is levied for a single taxpayer.
        assert!(estimator.medicare_levy(dec!(54339), false, 0) > Decimal::ZERO);
    }

    // =========================================================================
    // hecs_repayment tests
    // =========================================================================

    #[test]
    fn hecs_is_zero_without_debt() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.hecs_repayment(dec!(90000), false), dec!(0));
    }

    #[test]
    fn hecs_is_zero_below_first_tier() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.hecs_repayment(dec!(50999), true), dec!(0));
    }

    #[test]
    fn hecs_first_tier_boundary() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.hecs_repayment(dec!(51000), true), dec!(510.00));
    }

    #[test]
    fn hecs_top_tier() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        assert_eq!(estimator.hecs_repayment(dec!(200000), true), dec!(13000.000));
    }

    #[test]
    fn hecs_mid_tier() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        // 90000 sits in the 4% tier.
        assert_eq!(estimator.hecs_repayment(dec!(90000), true), dec!(3600.00));
    }

    // =========================================================================
    // estimate (integration) tests
    // =========================================================================

    #[test]
    fn estimate_single_job_above_all_thresholds() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let inputs = basic_inputs();

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(result.taxable_income, dec!(75000));
        // 5092 + 30000 × 0.325 = 14842
        assert_eq!(result.gross_tax, dec!(14842.000));
        assert_eq!(result.low_income_offset, dec!(0));
        assert_eq!(result.medicare_levy, dec!(1500.00));
        assert_eq!(result.hecs_repayment, dec!(0));
        assert_eq!(result.final_tax, dec!(16342.000));
        // 15000 withheld leaves 1342 owing.
        assert_eq!(result.refund_or_owing, dec!(-1342.000));
    }

    #[test]
    fn estimate_low_income_is_fully_offset() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.employment_incomes = vec![dec!(10000)];
        inputs.tax_withheld = dec!(800);

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(result.taxable_income, dec!(10000));
        assert_eq!(result.gross_tax, dec!(0));
        assert_eq!(result.low_income_offset, dec!(700));
        assert_eq!(result.medicare_levy, dec!(0));
        // The offset can never push final tax below zero.
        assert_eq!(result.final_tax, dec!(0));
        assert_eq!(result.refund_or_owing, dec!(800));
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    #[test]
    fn estimate_work_from_home_hours_reduce_taxable_income() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.work_from_home_hours = dec!(400);

        let result = estimator.estimate(&inputs).unwrap();

        // 400 × 0.67 = 268
        assert_eq!(result.work_from_home_deduction, dec!(268.00));
        assert_eq!(result.total_deductions, dec!(268.00));
        assert_eq!(result.taxable_income, dec!(74732.00));
    }

    #[test]
    fn estimate_sums_multiple_jobs_and_business_income() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.employment_incomes = vec![dec!(40000), dec!(20000.50)];
        inputs.business_income = dec!(9999.50);

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(result.total_employment_income, dec!(60000.50));
        assert_eq!(result.total_business_income, dec!(9999.50));
        assert_eq!(result.total_income, dec!(70000.00));
    }

    #[test]
    fn estimate_empty_income_list_totals_zero() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.employment_incomes = vec![];
        inputs.tax_withheld = dec!(0);

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(result.total_income, dec!(0));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.final_tax, dec!(0));
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    #[test]
    fn estimate_deductions_cannot_push_taxable_income_negative() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.employment_incomes = vec![dec!(5000)];
        inputs.deductions.work_related = WorkRelatedDeductions {
            tools_equipment: Some(dec!(9000)),
            ..Default::default()
        };

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.final_tax, dec!(0));
    }

    #[test]
    fn estimate_includes_hecs_for_debt_holders() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.has_hecs_debt = true;

        let result = estimator.estimate(&inputs).unwrap();

        // 75000 sits in the 3% tier.
        assert_eq!(result.hecs_repayment, dec!(2250.00));
        assert_eq!(result.final_tax, dec!(18592.000));
    }

    #[test]
    fn estimate_is_deterministic() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let mut inputs = basic_inputs();
        inputs.has_hecs_debt = true;
        inputs.work_from_home_hours = dec!(120);

        let first = estimator.estimate(&inputs).unwrap();
        let second = estimator.estimate(&inputs).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn estimate_effective_rate_uses_taxable_income() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);
        let inputs = basic_inputs();

        let result = estimator.estimate(&inputs).unwrap();

        assert_eq!(
            result.effective_tax_rate,
            result.final_tax / result.taxable_income * dec!(100)
        );
    }

    #[test]
    fn estimate_rejects_empty_rule_set() {
        let mut config = fy2023_config();
        config.income_tax_bands.clear();
        let estimator = TaxEstimator::new(&config);
        let inputs = basic_inputs();

        assert_eq!(
            estimator.estimate(&inputs),
            Err(TaxEstimateError::NoIncomeTaxBands)
        );
    }

    #[test]
    fn estimate_final_tax_never_negative_across_income_range() {
        let config = fy2023_config();
        let estimator = TaxEstimator::new(&config);

        for income in [
            dec!(0),
            dec!(1),
            dec!(18200),
            dec!(27222),
            dec!(37500),
            dec!(45000),
            dec!(51000),
            dec!(66667),
            dec!(120000),
            dec!(180000),
            dec!(500000),
        ] {
            let mut inputs = basic_inputs();
            inputs.employment_incomes = vec![income];
            inputs.has_hecs_debt = true;

            let result = estimator.estimate(&inputs).unwrap();

            assert!(
                result.final_tax >= Decimal::ZERO,
                "final tax negative at income {income}"
            );
        }
    }
}
