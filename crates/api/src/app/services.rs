//! Infrastructure wiring: one store shared by the lifecycle, report and import services.

use std::sync::Arc;

use toolcrib_infra::{
    import::Importer,
    lifecycle::LifecycleManager,
    reports::ReportGenerator,
    store::{InMemoryInventoryStore, InventoryStore, SqliteInventoryStore, StoreResult},
};
use toolcrib_inventory::LifecyclePolicy;

use crate::config::{AppConfig, StorageBackend};

/// Shared handles used by every route (inserted as an axum `Extension`).
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn InventoryStore>,
    pub lifecycle: LifecycleManager,
    pub reports: ReportGenerator,
    pub importer: Importer,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>, policy: LifecyclePolicy) -> Self {
        Self {
            lifecycle: LifecycleManager::new(store.clone(), policy),
            reports: ReportGenerator::new(store.clone()),
            importer: Importer::new(store.clone()),
            store,
        }
    }

    /// Services over a fresh in-memory store.
    pub fn in_memory(policy: LifecyclePolicy) -> Self {
        Self::new(Arc::new(InMemoryInventoryStore::new()), policy)
    }
}

/// Build services from configuration, opening the configured store.
pub async fn build_services(config: &AppConfig) -> StoreResult<AppServices> {
    let store: Arc<dyn InventoryStore> = match config.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            Arc::new(InMemoryInventoryStore::new())
        }
        StorageBackend::Sqlite => {
            let store =
                SqliteInventoryStore::connect(&config.database.url, config.database.max_connections)
                    .await?;
            tracing::info!(url = %config.database.url, "sqlite store ready");
            Arc::new(store)
        }
    };

    Ok(AppServices::new(store, config.lifecycle))
}
