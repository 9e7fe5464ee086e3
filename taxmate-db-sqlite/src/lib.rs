mod factory;

pub use factory::SqliteStoreFactory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, sqlite::SqlitePool};
use taxmate_core::{EstimateStore, NewSavedEstimate, SavedEstimate, StoreError, TaxInputs, TaxResult};

pub struct SqliteEstimateStore {
    pool: SqlitePool,
}

impl SqliteEstimateStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct SavedEstimateRow {
    id: i64,
    name: String,
    tax_year: i32,
    inputs_json: String,
    result_json: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SavedEstimateRow> for SavedEstimate {
    type Error = StoreError;

    fn try_from(row: SavedEstimateRow) -> Result<Self, Self::Error> {
        let inputs: TaxInputs = serde_json::from_str(&row.inputs_json)
            .map_err(|e| StoreError::Serialization(format!("inputs for record {}: {}", row.id, e)))?;
        let result: TaxResult = serde_json::from_str(&row.result_json)
            .map_err(|e| StoreError::Serialization(format!("result for record {}: {}", row.id, e)))?;

        Ok(SavedEstimate {
            id: row.id,
            name: row.name,
            tax_year: row.tax_year,
            inputs,
            result,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    // SQLite stores timestamps in various formats, try common ones
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl EstimateStore for SqliteEstimateStore {
    async fn save_estimate(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, StoreError> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let inputs_json = to_json(&estimate.inputs)?;
        let result_json = to_json(&estimate.result)?;

        let result = sqlx::query(
            "INSERT INTO saved_estimates (name, tax_year, inputs_json, result_json, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&estimate.name)
        .bind(estimate.tax_year)
        .bind(&inputs_json)
        .bind(&result_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, name = estimate.name, "saved estimate");
        self.get_estimate(id).await
    }

    async fn get_estimate(&self, id: i64) -> Result<SavedEstimate, StoreError> {
        let row: SavedEstimateRow = sqlx::query_as(
            "SELECT id, name, tax_year, inputs_json, result_json, created_at, updated_at
             FROM saved_estimates WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        row.try_into()
    }

    async fn rename_estimate(
        &self,
        id: i64,
        name: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            "UPDATE saved_estimates SET name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_estimate(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM saved_estimates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn list_estimates(
        &self,
        tax_year: Option<i32>,
    ) -> Result<Vec<SavedEstimate>, StoreError> {
        let rows: Vec<SavedEstimateRow> = match tax_year {
            Some(year) => {
                sqlx::query_as(
                    "SELECT id, name, tax_year, inputs_json, result_json, created_at, updated_at
                     FROM saved_estimates WHERE tax_year = ? ORDER BY updated_at DESC, id DESC",
                )
                .bind(year)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, name, tax_year, inputs_json, result_json, created_at, updated_at
                     FROM saved_estimates ORDER BY updated_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}
