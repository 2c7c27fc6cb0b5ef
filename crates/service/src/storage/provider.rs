use async_trait::async_trait;
use configs::StorageMode;
use models::MaintenanceModeStatus;

use crate::errors::StorageError;

/// Trait abstraction for maintenance status persistence.
/// Implementations can be database-backed, file-backed, or process-local.
///
/// A `save` must be visible to every later `read` on the same backend.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Backend kind, used by the factory to check it was wired to the right mode.
    fn kind(&self) -> StorageMode;

    /// The persisted status, or `None` when nothing has been saved yet.
    async fn read(&self) -> Result<Option<MaintenanceModeStatus>, StorageError>;

    /// Persist the full status, replacing any previous value.
    async fn save(&self, status: &MaintenanceModeStatus) -> Result<(), StorageError>;
}
