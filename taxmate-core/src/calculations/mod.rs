//! Tax rule calculations for the Australian resident estimate.
//!
//! The estimator itself lives in [`estimator`]; the advisory PAYG
//! withholding approximation is kept apart in [`withholding`] so it can
//! never be confused with the authoritative liability figures.

pub mod common;
pub mod estimator;
pub mod withholding;

pub use estimator::{TaxEstimateError, TaxEstimator};
pub use withholding::estimate_withholding;
