use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TaxInputs, TaxResult};

/// A named, persisted estimation run: the inputs the user entered together
/// with the result the engine produced from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEstimate {
    pub id: i64,
    pub name: String,
    pub tax_year: i32,
    pub inputs: TaxInputs,
    pub result: TaxResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new saved estimates (no id or timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSavedEstimate {
    pub name: String,
    pub tax_year: i32,
    pub inputs: TaxInputs,
    pub result: TaxResult,
}
