//! Presentation helpers for estimation results.
//!
//! The engine carries full-precision decimals; everything user-facing is
//! rounded here and only here, so repeated calculations stay reproducible.

use rust_decimal::Decimal;

use crate::models::TaxResult;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoint away from zero), the standard financial convention.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with thousands separators, e.g. `$1,234.50`.
/// Negative amounts render as `-$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let cents = format!("{frac:0<2}");

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("{sign}${grouped}.{cents}")
}

/// Renders a result as an itemized plain-text summary for terminal output.
pub fn render_summary(
    result: &TaxResult,
    year_label: &str,
) -> String {
    let mut lines = Vec::new();
    let mut row = |label: &str, value: Decimal| {
        lines.push(format!("{label:<28}{:>14}", format_currency(value)));
    };

    row("Employment income", result.total_employment_income);
    row("Business income", result.total_business_income);
    row("Total income", result.total_income);
    row("Itemized deductions", result.total_manual_deductions);
    row("Working-from-home claim", result.work_from_home_deduction);
    row("Total deductions", result.total_deductions);
    row("Taxable income", result.taxable_income);
    row("Gross tax", result.gross_tax);
    row("Low income tax offset", result.low_income_offset);
    row("Medicare levy", result.medicare_levy);
    row("HECS-HELP repayment", result.hecs_repayment);
    row("Total tax payable", result.final_tax);

    let outcome = if result.refund_or_owing >= Decimal::ZERO {
        format!(
            "{:<28}{:>14}",
            "Estimated refund",
            format_currency(result.refund_or_owing)
        )
    } else {
        format!(
            "{:<28}{:>14}",
            "Estimated amount owing",
            format_currency(-result.refund_or_owing)
        )
    };

    let header = format!("Tax estimate for {year_label}");
    let rule = "-".repeat(42);

    format!(
        "{header}\n{rule}\n{}\n{rule}\n{outcome}\nEffective tax rate: {}%\n",
        lines.join("\n"),
        round_half_up(result.effective_tax_rate)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_result() -> TaxResult {
        TaxResult {
            total_employment_income: dec!(75000),
            total_business_income: dec!(0),
            total_income: dec!(75000),
            work_from_home_deduction: dec!(0),
            total_manual_deductions: dec!(0),
            total_deductions: dec!(0),
            taxable_income: dec!(75000),
            gross_tax: dec!(14842),
            low_income_offset: dec!(0),
            medicare_levy: dec!(1500),
            hecs_repayment: dec!(0),
            final_tax: dec!(16342),
            refund_or_owing: dec!(-1342),
            effective_tax_rate: dec!(21.789333),
        }
    }

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(123.45)), dec!(123.45));
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.5)), "$1,234,567.50");
    }

    #[test]
    fn format_currency_pads_cents() {
        assert_eq!(format_currency(dec!(42)), "$42.00");
    }

    #[test]
    fn format_currency_handles_zero() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn format_currency_handles_negative_amounts() {
        assert_eq!(format_currency(dec!(-1342)), "-$1,342.00");
    }

    #[test]
    fn format_currency_rounds_to_cents() {
        assert_eq!(format_currency(dec!(99.999)), "$100.00");
    }

    // =========================================================================
    // render_summary tests
    // =========================================================================

    #[test]
    fn render_summary_itemizes_all_components() {
        let summary = render_summary(&sample_result(), "2022-23");

        assert!(summary.contains("Tax estimate for 2022-23"));
        assert!(summary.contains("Taxable income"));
        assert!(summary.contains("$75,000.00"));
        assert!(summary.contains("Medicare levy"));
        assert!(summary.contains("$16,342.00"));
    }

    #[test]
    fn render_summary_labels_amount_owing() {
        let summary = render_summary(&sample_result(), "2022-23");

        assert!(summary.contains("Estimated amount owing"));
        assert!(summary.contains("$1,342.00"));
        assert!(!summary.contains("Estimated refund"));
    }

    #[test]
    fn render_summary_labels_refund() {
        let mut result = sample_result();
        result.refund_or_owing = dec!(500);

        let summary = render_summary(&result, "2022-23");

        assert!(summary.contains("Estimated refund"));
    }

    #[test]
    fn render_summary_rounds_effective_rate() {
        let summary = render_summary(&sample_result(), "2022-23");

        assert!(summary.contains("Effective tax rate: 21.79%"));
    }
}
