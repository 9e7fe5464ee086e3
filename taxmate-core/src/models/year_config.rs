use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A band of income with inclusive bounds.
///
/// All rule tables (rate bands, offset tapers, repayment tiers) share the
/// same lookup: bands are ordered by `min_income` and the first band
/// containing the income wins. `max_income` of `None` means unbounded above.
pub trait IncomeBand {
    fn min_income(&self) -> Decimal;
    fn max_income(&self) -> Option<Decimal>;

    fn contains(&self, income: Decimal) -> bool {
        income >= self.min_income()
            && self.max_income().is_none_or(|max| income <= max)
    }
}

/// One marginal income tax band: tax = `base_tax + (x - min_income) × tax_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl IncomeBand for TaxBand {
    fn min_income(&self) -> Decimal {
        self.min_income
    }
    fn max_income(&self) -> Option<Decimal> {
        self.max_income
    }
}

/// One step of a tapering offset: offset = `base_offset - (x - min_income) × taper_rate`,
/// floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetBand {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub base_offset: Decimal,
    pub taper_rate: Decimal,
}

impl IncomeBand for OffsetBand {
    fn min_income(&self) -> Decimal {
        self.min_income
    }
    fn max_income(&self) -> Option<Decimal> {
        self.max_income
    }
}

/// One compulsory repayment tier: repayment = `x × rate` on the whole income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentBand {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl IncomeBand for RepaymentBand {
    fn min_income(&self) -> Decimal {
        self.min_income
    }
    fn max_income(&self) -> Option<Decimal> {
        self.max_income
    }
}

/// Medicare levy parameters for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicareConfig {
    /// Full levy rate applied above the shade-in band (2% for 2022-23).
    pub levy_rate: Decimal,
    /// Low-income threshold for a single taxpayer with no dependants.
    pub single_threshold: Decimal,
    /// Base family threshold, used whenever `dependent_count > 0`.
    pub family_threshold: Decimal,
    /// Added to the family threshold per dependant.
    pub per_dependent: Decimal,
    /// The levy phases in linearly between the threshold and
    /// `threshold × shade_in_ceiling_factor` (1.1 for 2022-23).
    pub shade_in_ceiling_factor: Decimal,
}

/// Parameters for the advisory PAYG withholding estimate.
///
/// This is a coarse approximation used only to pre-fill the "tax withheld"
/// input when the user does not know the real figure. It is never part of
/// the authoritative liability calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingConfig {
    pub bands: Vec<TaxBand>,
    /// Flat Medicare add-on applies above this gross income.
    pub medicare_threshold: Decimal,
    pub medicare_rate: Decimal,
}

/// Errors reported by [`TaxYearConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    #[error("{0} band table is empty")]
    EmptyBandTable(&'static str),

    #[error("{0} band table is not ordered by minimum income")]
    UnorderedBands(&'static str),

    #[error("{0} band table has a bounded final band")]
    BoundedFinalBand(&'static str),

    #[error("{0} band table has a gap between adjacent bands")]
    GapBetweenBands(&'static str),

    #[error("{0} band table contains a negative rate")]
    NegativeRate(&'static str),
}

/// The complete rule set for one named tax year.
///
/// Bracket, offset, levy and repayment thresholds are legislated per year,
/// so they live in data rather than code. The engine borrows one of these
/// and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// Year the financial year ends in (2023 for FY 2022-23).
    pub tax_year: i32,
    /// Human-readable label, e.g. "2022-23".
    pub year_label: String,

    pub income_tax_bands: Vec<TaxBand>,
    pub lito_bands: Vec<OffsetBand>,
    pub medicare: MedicareConfig,
    /// HECS-HELP compulsory repayment tiers. Incomes below the first tier
    /// repay nothing; gaps between tiers also resolve to zero.
    pub hecs_bands: Vec<RepaymentBand>,

    /// Fixed-rate shortcut method, dollars per hour worked from home.
    pub work_from_home_rate: Decimal,

    pub withholding: WithholdingConfig,
}

impl TaxYearConfig {
    /// Checks the structural soundness of every band table.
    ///
    /// # Errors
    ///
    /// Returns [`TaxYearConfigError`] if:
    /// - the income tax or withholding table is empty
    /// - any table is not sorted ascending by `min_income`
    /// - the income tax or withholding table's final band is bounded
    /// - the income tax or withholding table leaves a gap between
    ///   adjacent bands (repayment tiers may have gaps)
    /// - any rate is negative
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        check_tax_bands("income tax", &self.income_tax_bands)?;
        check_tax_bands("withholding", &self.withholding.bands)?;

        check_ordered(
            "low income offset",
            self.lito_bands.iter().map(|b| b.min_income),
        )?;
        if self.lito_bands.iter().any(|b| b.taper_rate < Decimal::ZERO) {
            return Err(TaxYearConfigError::NegativeRate("low income offset"));
        }

        check_ordered("repayment", self.hecs_bands.iter().map(|b| b.min_income))?;
        if self.hecs_bands.iter().any(|b| b.rate < Decimal::ZERO) {
            return Err(TaxYearConfigError::NegativeRate("repayment"));
        }

        Ok(())
    }
}

fn check_tax_bands(table: &'static str, bands: &[TaxBand]) -> Result<(), TaxYearConfigError> {
    let Some(last) = bands.last() else {
        return Err(TaxYearConfigError::EmptyBandTable(table));
    };
    if last.max_income.is_some() {
        return Err(TaxYearConfigError::BoundedFinalBand(table));
    }
    if bands.iter().any(|b| b.tax_rate < Decimal::ZERO) {
        return Err(TaxYearConfigError::NegativeRate(table));
    }
    for pair in bands.windows(2) {
        // A band must start at or below its predecessor's ceiling, so every
        // income above the table floor falls into some band.
        if pair[0].max_income.is_some_and(|max| pair[1].min_income > max) {
            return Err(TaxYearConfigError::GapBetweenBands(table));
        }
    }
    check_ordered(table, bands.iter().map(|b| b.min_income))
}

fn check_ordered(
    table: &'static str,
    mins: impl Iterator<Item = Decimal>,
) -> Result<(), TaxYearConfigError> {
    let mut previous: Option<Decimal> = None;
    for min in mins {
        if previous.is_some_and(|p| p > min) {
            return Err(TaxYearConfigError::UnorderedBands(table));
        }
        previous = Some(min);
    }
    Ok(())
}
