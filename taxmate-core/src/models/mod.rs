mod saved_estimate;
mod tax_inputs;
mod tax_result;
mod year_config;

pub use saved_estimate::{NewSavedEstimate, SavedEstimate};
pub use tax_inputs::{
    DeductionCategories, DonationDeductions, OtherDeductions, SelfEducationDeductions, TaxInputs,
    WorkRelatedDeductions,
};
pub use tax_result::TaxResult;
pub use year_config::{
    IncomeBand, MedicareConfig, OffsetBand, RepaymentBand, TaxBand, TaxYearConfig,
    TaxYearConfigError, WithholdingConfig,
};
