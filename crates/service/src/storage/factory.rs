use std::sync::Arc;

use configs::{AppConfig, StorageMode};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::{
    database::DatabaseStorageProvider, file::FileStorageProvider, memory::InMemoryStorageProvider,
    provider::StorageProvider,
};

/// Binds the configured [`StorageMode`] to one provider for the life of the process.
#[derive(Clone)]
pub struct StorageProviderFactory {
    mode: StorageMode,
    provider: Arc<dyn StorageProvider>,
}

impl StorageProviderFactory {
    /// Wrap an existing provider. Its `kind()` must match `mode`.
    pub fn new(mode: StorageMode, provider: Arc<dyn StorageProvider>) -> Result<Self, ServiceError> {
        if provider.kind() != mode {
            return Err(ServiceError::Config(format!(
                "storage mode is {mode} but the provider is a {} provider",
                provider.kind()
            )));
        }
        Ok(Self { mode, provider })
    }

    /// Build the provider named by `[maintenance].storage_mode`.
    pub async fn from_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        let mode = cfg.maintenance.storage_mode;
        let provider: Arc<dyn StorageProvider> = match mode {
            StorageMode::Database => {
                Arc::new(DatabaseStorageProvider::connect(&cfg.database, cfg.storage.record_key.clone()).await?)
            }
            StorageMode::File => Arc::new(FileStorageProvider::new(&cfg.storage.file_path)),
            StorageMode::InMemory => Arc::new(InMemoryStorageProvider::new()),
        };
        info!(mode = %mode, "storage provider selected");
        Self::new(mode, provider)
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.mode
    }

    pub fn get_provider(&self) -> Arc<dyn StorageProvider> {
        Arc::clone(&self.provider)
    }
}
