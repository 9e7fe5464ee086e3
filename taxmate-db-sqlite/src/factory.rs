use async_trait::async_trait;
use taxmate_core::{DbConfig, EstimateStore, StoreError, StoreFactory};

use crate::SqliteEstimateStore;

/// SQLite backend factory. Register with a
/// [`StoreRegistry`](taxmate_core::StoreRegistry) at startup.
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens (or creates) the database file named by the connection string
    /// and runs pending migrations. `:memory:` yields a fresh in-memory
    /// database.
    async fn create(&self, config: &DbConfig) -> Result<Box<dyn EstimateStore>, StoreError> {
        let url = if config.connection_string == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", config.connection_string)
        };

        let store = SqliteEstimateStore::new(&url).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use taxmate_core::StoreRegistry;

    use super::*;

    #[tokio::test]
    async fn factory_creates_working_in_memory_store() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(SqliteStoreFactory));

        let store = registry
            .create(&DbConfig::default())
            .await
            .expect("Should create sqlite store");

        // Migrations ran; an empty store lists nothing.
        let estimates = store.list_estimates(None).await.expect("Should list");
        assert!(estimates.is_empty());
    }
}
