//! Built-in rule set for the 2022-23 Australian financial year.
//!
//! Sources: resident income tax rate schedule, Low Income Tax Offset
//! tapers, Medicare levy low-income thresholds, HECS-HELP compulsory
//! repayment tiers and the 67c/hour working-from-home fixed rate as they
//! applied for FY 2022-23. Figures are estimates for planning, not a
//! filing reference.

use rust_decimal_macros::dec;
use taxmate_core::{
    MedicareConfig, OffsetBand, RepaymentBand, TaxBand, TaxYearConfig, WithholdingConfig,
};

/// The complete FY 2022-23 rule set.
pub fn tax_year_config() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2023,
        year_label: "2022-23".to_string(),
        income_tax_bands: income_tax_bands(),
        lito_bands: lito_bands(),
        medicare: MedicareConfig {
            levy_rate: dec!(0.02),
            single_threshold: dec!(27222),
            family_threshold: dec!(45907),
            per_dependent: dec!(4216),
            shade_in_ceiling_factor: dec!(1.1),
        },
        hecs_bands: hecs_bands(),
        work_from_home_rate: dec!(0.67),
        withholding: WithholdingConfig {
            // The withholding pre-fill uses the same five resident bands as
            // a coarse approximation of the annualized PAYG schedules.
            bands: income_tax_bands(),
            medicare_threshold: dec!(27222),
            medicare_rate: dec!(0.02),
        },
    }
}

fn income_tax_bands() -> Vec<TaxBand> {
    vec![
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
    ]
}

fn lito_bands() -> Vec<OffsetBand> {
    vec![
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
    ]
}

fn hecs_bands() -> Vec<RepaymentBand> {
    vec![
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
    ]
}
