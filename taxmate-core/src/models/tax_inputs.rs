use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the estimation engine needs for one calculation.
///
/// Values arrive already parsed to numeric types; the input collector is
/// responsible for rejecting negative amounts before building this record.
/// Optional deduction leaves that were never filled in sum as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInputs {
    /// Gross income per job, in order entered. An empty list totals to zero.
    pub employment_incomes: Vec<Decimal>,

    /// Self-employment / contractor income.
    pub business_income: Decimal,

    /// PAYG tax already withheld across all jobs.
    pub tax_withheld: Decimal,

    /// Itemized deduction claims, grouped by ATO category.
    pub deductions: DeductionCategories,

    /// Hours worked from home, claimed under the fixed-rate shortcut method.
    pub work_from_home_hours: Decimal,

    /// Whether the taxpayer has an outstanding HECS-HELP debt.
    pub has_hecs_debt: bool,

    /// Whether the taxpayer holds a Medicare levy exemption.
    pub is_medicare_exempt: bool,

    /// Number of dependants, used for the family Medicare levy threshold.
    pub dependent_count: u32,
}

/// Deduction claims with a fixed shape: one struct per ATO category, one
/// optional amount per subcategory. A `None` leaf means "not claimed" and
/// contributes nothing to the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionCategories {
    pub work_related: WorkRelatedDeductions,
    pub self_education: SelfEducationDeductions,
    pub donations: DonationDeductions,
    pub other: OtherDeductions,
}

impl DeductionCategories {
    /// Sum of every claimed leaf across all four categories.
    pub fn total(&self) -> Decimal {
        self.work_related.total()
            + self.self_education.total()
            + self.donations.total()
            + self.other.total()
    }

    /// Every claimed leaf amount, in declaration order. Lets callers
    /// inspect individual claims (e.g. to reject a negative leaf that a
    /// summed total would hide).
    pub fn claimed_amounts(&self) -> Vec<Decimal> {
        let w = &self.work_related;
        let s = &self.self_education;
        let d = &self.donations;
        let o = &self.other;
        [
            w.vehicle,
            w.travel,
            w.clothing_laundry,
            w.tools_equipment,
            w.phone_internet,
            w.other,
            s.course_fees,
            s.textbooks,
            s.stationery,
            s.other,
            d.registered_charities,
            d.other,
            o.tax_affairs_cost,
            o.income_protection,
            o.personal_super,
            o.other,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkRelatedDeductions {
    pub vehicle: Option<Decimal>,
    pub travel: Option<Decimal>,
    pub clothing_laundry: Option<Decimal>,
    pub tools_equipment: Option<Decimal>,
    pub phone_internet: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl WorkRelatedDeductions {
    pub fn total(&self) -> Decimal {
        [
            self.vehicle,
            self.travel,
            self.clothing_laundry,
            self.tools_equipment,
            self.phone_internet,
            self.other,
        ]
        .into_iter()
        .flatten()
        .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfEducationDeductions {
    pub course_fees: Option<Decimal>,
    pub textbooks: Option<Decimal>,
    pub stationery: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl SelfEducationDeductions {
    pub fn total(&self) -> Decimal {
        [self.course_fees, self.textbooks, self.stationery, self.other]
            .into_iter()
            .flatten()
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationDeductions {
    pub registered_charities: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl DonationDeductions {
    pub fn total(&self) -> Decimal {
        [self.registered_charities, self.other]
            .into_iter()
            .flatten()
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherDeductions {
    pub tax_affairs_cost: Option<Decimal>,
    pub income_protection: Option<Decimal>,
    pub personal_super: Option<Decimal>,
    pub other: Option<Decimal>,
}

impl OtherDeductions {
    pub fn total(&self) -> Decimal {
        [
            self.tax_affairs_cost,
            self.income_protection,
            self.personal_super,
            self.other,
        ]
        .into_iter()
        .flatten()
        .sum()
    }
}
