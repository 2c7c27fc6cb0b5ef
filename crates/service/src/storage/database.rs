use async_trait::async_trait;
use configs::{DatabaseConfig, StorageMode};
use migration::MigratorTrait;
use models::{errors::ModelError, maintenance_status, MaintenanceModeStatus};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{ServiceError, StorageError};
use crate::storage::provider::StorageProvider;

/// SeaORM-backed provider: one row of `maintenance_mode_status` per record key.
///
/// Every instance of the application pointed at the same database shares the
/// row, which is why the service re-reads it on each status check.
pub struct DatabaseStorageProvider {
    db: DatabaseConnection,
    record_key: String,
}

impl DatabaseStorageProvider {
    pub fn new(db: DatabaseConnection, record_key: impl Into<String>) -> Result<Self, ServiceError> {
        let record_key = record_key.into();
        maintenance_status::validate_key(&record_key)?;
        Ok(Self { db, record_key })
    }

    /// Open a pool from `[database]` and bring the schema up to date.
    pub async fn connect(cfg: &DatabaseConfig, record_key: impl Into<String>) -> Result<Self, ServiceError> {
        let db = models::db::connect_with_config(cfg)
            .await
            .map_err(|e| StorageError::unavailable(format!("connect: {e}")))?;
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StorageError::unavailable(format!("migrate: {e}")))?;
        let provider = Self::new(db, record_key)?;
        info!(record_key = %provider.record_key, "database status storage ready");
        Ok(provider)
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn read_error(e: ModelError) -> StorageError {
    match e {
        ModelError::Serialization(msg) => StorageError::BackendCorrupt(msg),
        other => StorageError::BackendUnavailable(other.to_string()),
    }
}

fn write_error(e: ModelError) -> StorageError {
    let msg = e.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("database is locked") || lower.contains("could not serialize") || lower.contains("deadlock") {
        StorageError::WriteConflict(msg)
    } else {
        StorageError::BackendUnavailable(msg)
    }
}

#[async_trait]
impl StorageProvider for DatabaseStorageProvider {
    fn kind(&self) -> StorageMode { StorageMode::Database }

    async fn read(&self) -> Result<Option<MaintenanceModeStatus>, StorageError> {
        let row = maintenance_status::find(&self.db, &self.record_key).await.map_err(read_error)?;
        row.map(|r| r.status()).transpose().map_err(read_error)
    }

    async fn save(&self, status: &MaintenanceModeStatus) -> Result<(), StorageError> {
        maintenance_status::upsert(&self.db, &self.record_key, status).await.map_err(write_error)
    }
}
