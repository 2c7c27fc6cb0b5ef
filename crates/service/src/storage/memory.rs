use std::sync::Arc;

use async_trait::async_trait;
use configs::StorageMode;
use models::MaintenanceModeStatus;
use tokio::sync::RwLock;

use crate::errors::StorageError;
use crate::storage::provider::StorageProvider;

/// Process-local storage. Clones share the same cell, so a clone can play the
/// part of another writer in tests.
#[derive(Clone, Default)]
pub struct InMemoryStorageProvider {
    cell: Arc<RwLock<Option<MaintenanceModeStatus>>>,
}

impl InMemoryStorageProvider {
    pub fn new() -> Self { Self::default() }

    /// Start with `status` already persisted.
    pub fn with_status(status: MaintenanceModeStatus) -> Self {
        Self { cell: Arc::new(RwLock::new(Some(status))) }
    }

    /// Drop whatever was saved, as if the backend were brand new.
    pub async fn clear(&self) {
        *self.cell.write().await = None;
    }
}

#[async_trait]
impl StorageProvider for InMemoryStorageProvider {
    fn kind(&self) -> StorageMode { StorageMode::InMemory }

    async fn read(&self) -> Result<Option<MaintenanceModeStatus>, StorageError> {
        Ok(self.cell.read().await.clone())
    }

    async fn save(&self, status: &MaintenanceModeStatus) -> Result<(), StorageError> {
        *self.cell.write().await = Some(status.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_until_saved() -> Result<(), anyhow::Error> {
        let store = InMemoryStorageProvider::new();
        assert!(store.read().await?.is_none());

        let status = MaintenanceModeStatus { is_content_frozen: true, ..Default::default() };
        store.save(&status).await?;
        assert_eq!(store.read().await?, Some(status));

        store.clear().await;
        assert!(store.read().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_the_cell() -> Result<(), anyhow::Error> {
        let a = InMemoryStorageProvider::new();
        let b = a.clone();
        let status = MaintenanceModeStatus { is_in_maintenance_mode: true, ..Default::default() };
        b.save(&status).await?;
        assert_eq!(a.read().await?, Some(status));
        Ok(())
    }
}
