//! Parsing of `--deduction CATEGORY.SUBCATEGORY=AMOUNT` flags into the
//! fixed-shape deduction record the engine consumes.

use anyhow::{Context, Result, bail, ensure};
use rust_decimal::Decimal;
use taxmate_core::DeductionCategories;

const VALID_KEYS: &[&str] = &[
    "work_related.vehicle",
    "work_related.travel",
    "work_related.clothing_laundry",
    "work_related.tools_equipment",
    "work_related.phone_internet",
    "work_related.other",
    "self_education.course_fees",
    "self_education.textbooks",
    "self_education.stationery",
    "self_education.other",
    "donations.registered_charities",
    "donations.other",
    "other.tax_affairs_cost",
    "other.income_protection",
    "other.personal_super",
    "other.other",
];

/// Builds a [`DeductionCategories`] from repeated flag values. Repeating
/// the same key accumulates into that leaf.
pub fn parse_deductions(specs: &[String]) -> Result<DeductionCategories> {
    let mut deductions = DeductionCategories::default();

    for spec in specs {
        let (key, amount) = spec
            .split_once('=')
            .with_context(|| format!("deduction '{spec}' is not CATEGORY.SUBCATEGORY=AMOUNT"))?;
        let amount: Decimal = amount
            .trim()
            .parse()
            .with_context(|| format!("deduction '{spec}' has a non-numeric amount"))?;
        ensure!(
            amount >= Decimal::ZERO,
            "deduction '{spec}' must not be negative"
        );

        let slot = leaf_slot(&mut deductions, key.trim())?;
        *slot = Some(slot.unwrap_or_default() + amount);
    }

    Ok(deductions)
}

fn leaf_slot<'a>(
    deductions: &'a mut DeductionCategories,
    key: &str,
) -> Result<&'a mut Option<Decimal>> {
    let d = deductions;
    let slot = match key {
        "work_related.vehicle" => &mut d.work_related.vehicle,
        "work_related.travel" => &mut d.work_related.travel,
        "work_related.clothing_laundry" => &mut d.work_related.clothing_laundry,
        "work_related.tools_equipment" => &mut d.work_related.tools_equipment,
        "work_related.phone_internet" => &mut d.work_related.phone_internet,
        "work_related.other" => &mut d.work_related.other,
        "self_education.course_fees" => &mut d.self_education.course_fees,
        "self_education.textbooks" => &mut d.self_education.textbooks,
        "self_education.stationery" => &mut d.self_education.stationery,
        "self_education.other" => &mut d.self_education.other,
        "donations.registered_charities" => &mut d.donations.registered_charities,
        "donations.other" => &mut d.donations.other,
        "other.tax_affairs_cost" => &mut d.other.tax_affairs_cost,
        "other.income_protection" => &mut d.other.income_protection,
        "other.personal_super" => &mut d.other.personal_super,
        "other.other" => &mut d.other.other,
        unknown => bail!(
            "unknown deduction '{unknown}'; valid keys: {}",
            VALID_KEYS.join(", ")
        ),
    };
    Ok(slot)
}
