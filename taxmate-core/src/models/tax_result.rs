use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fully itemized outcome of one estimation run.
///
/// Every amount is carried at full `Decimal` precision; rounding for
/// display happens in the report layer, never here. All fields are
/// non-negative except [`refund_or_owing`](Self::refund_or_owing), which is
/// positive for a refund and negative for an amount owing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub total_employment_income: Decimal,
    pub total_business_income: Decimal,
    pub total_income: Decimal,

    /// Fixed-rate shortcut claim: hours × the per-hour rate for the year.
    pub work_from_home_deduction: Decimal,
    /// Sum of every itemized deduction leaf.
    pub total_manual_deductions: Decimal,
    pub total_deductions: Decimal,

    /// `max(0, total_income - total_deductions)`.
    pub taxable_income: Decimal,

    /// Tax from the progressive resident rate bands, before offsets.
    pub gross_tax: Decimal,
    /// Low Income Tax Offset applied against gross tax.
    pub low_income_offset: Decimal,
    pub medicare_levy: Decimal,
    pub hecs_repayment: Decimal,

    /// `max(0, gross_tax - low_income_offset + medicare_levy + hecs_repayment)`.
    pub final_tax: Decimal,
    /// `tax_withheld - final_tax`; positive means refund, negative means owing.
    pub refund_or_owing: Decimal,
    /// `final_tax / taxable_income × 100`, or zero when taxable income is zero.
    pub effective_tax_rate: Decimal,
}
