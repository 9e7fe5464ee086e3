//! Shared helpers for the rule calculations.

use rust_decimal::Decimal;

use crate::models::IncomeBand;

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Finds the first band whose inclusive range contains `income`.
///
/// Tables must be ordered ascending by `min_income`; adjacent bands may
/// share a boundary value, in which case the lower band wins. Returns
/// `None` when no band matches (income below the first tier, or inside a
/// gap between tiers).
pub fn find_band<B: IncomeBand>(
    bands: &[B],
    income: Decimal,
) -> Option<&B> {
    bands.iter().find(|b| b.contains(income))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::RepaymentBand;

    use super::*;

    fn tiers() -> Vec<RepaymentBand> {
        vec![
            RepaymentBand {
                min_income: dec!(51000),
                max_income: Some(dec!(59999)),
                rate: dec!(0.01),
            },
            RepaymentBand {
                min_income: dec!(60000),
                max_income: None,
                rate: dec!(0.02),
            },
        ]
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_values() {
        assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
    }

    #[test]
    fn find_band_returns_first_match() {
        let bands = tiers();

        let found = find_band(&bands, dec!(51000)).unwrap();

        assert_eq!(found.rate, dec!(0.01));
    }

    #[test]
    fn find_band_returns_none_below_first_tier() {
        let bands = tiers();

        assert!(find_band(&bands, dec!(50999)).is_none());
    }

    #[test]
    fn find_band_returns_none_inside_gap() {
        let bands = tiers();

        // 59999 < income < 60000 falls between the tiers.
        assert!(find_band(&bands, dec!(59999.50)).is_none());
    }

    #[test]
    fn find_band_matches_unbounded_tail() {
        let bands = tiers();

        let found = find_band(&bands, dec!(1000000)).unwrap();

        assert_eq!(found.rate, dec!(0.02));
    }
}
