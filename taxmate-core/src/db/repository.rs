use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSavedEstimate, SavedEstimate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence for saved estimates. The engine never calls this; only the
/// surrounding application saves and recalls results.
#[async_trait]
pub trait EstimateStore: Send + Sync {
    async fn save_estimate(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, StoreError>;

    async fn get_estimate(&self, id: i64) -> Result<SavedEstimate, StoreError>;

    async fn rename_estimate(
        &self,
        id: i64,
        name: &str,
    ) -> Result<(), StoreError>;

    async fn delete_estimate(&self, id: i64) -> Result<(), StoreError>;

    /// Lists saved estimates, newest first, optionally restricted to one
    /// tax year.
    async fn list_estimates(
        &self,
        tax_year: Option<i32>,
    ) -> Result<Vec<SavedEstimate>, StoreError>;
}
