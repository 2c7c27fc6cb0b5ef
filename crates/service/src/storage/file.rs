use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use configs::StorageMode;
use models::MaintenanceModeStatus;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

use crate::errors::StorageError;
use crate::storage::provider::StorageProvider;

/// JSON file-backed status store.
///
/// Saves go to a sibling temp file that is renamed over the target, so a
/// reader sees either the old document or the new one, never a torn write.
/// A missing or blank file reads as "nothing persisted yet".
#[derive(Clone)]
pub struct FileStorageProvider {
    file_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorageProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Arc::new(Mutex::new(())) }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "maintenance_mode.json".into());
        self.file_path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl StorageProvider for FileStorageProvider {
    fn kind(&self) -> StorageMode { StorageMode::File }

    async fn read(&self) -> Result<Option<MaintenanceModeStatus>, StorageError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::unavailable(format!("read {}: {e}", self.file_path.display())))
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        MaintenanceModeStatus::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::corrupt(format!("{}: {e}", self.file_path.display())))
    }

    async fn save(&self, status: &MaintenanceModeStatus) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        common::env::ensure_parent_dir(&self.file_path)
            .await
            .map_err(|e| StorageError::unavailable(e.to_string()))?;

        let data = serde_json::to_vec_pretty(status).map_err(|e| StorageError::corrupt(e.to_string()))?;
        let tmp = self.temp_path();
        // contents must be on disk before the rename makes them visible
        if let Err(e) = write_synced(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::unavailable(format!("write {}: {e}", tmp.display())));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::unavailable(format!("replace {}: {e}", self.file_path.display())));
        }
        debug!(path = %self.file_path.display(), "status file written");
        Ok(())
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::StatusSettings;
    use uuid::Uuid;

    fn tmp_file() -> PathBuf {
        std::env::temp_dir().join(format!("maintenance_status_{}", Uuid::new_v4())).join("status.json")
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() -> Result<(), anyhow::Error> {
        let store = FileStorageProvider::new(tmp_file());
        assert!(store.read().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_creates_directories_and_round_trips() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        let store = FileStorageProvider::new(&path);
        let mut status = MaintenanceModeStatus { is_in_maintenance_mode: true, ..Default::default() };
        status.settings = StatusSettings { template_name: Some("Down".into()), ..Default::default() };

        store.save(&status).await?;
        assert_eq!(store.read().await?, Some(status.clone()));

        // a second provider on the same path sees the same record
        let reopened = FileStorageProvider::new(&path);
        assert_eq!(reopened.read().await?, Some(status));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        fs::create_dir_all(path.parent().unwrap()).await?;
        fs::write(&path, b"{\"isInMaintenanceMode\": tru").await?;

        let err = FileStorageProvider::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StorageError::BackendCorrupt(_)));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn blank_file_reads_as_none() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        fs::create_dir_all(path.parent().unwrap()).await?;
        fs::write(&path, b"  \n").await?;

        assert!(FileStorageProvider::new(&path).read().await?.is_none());

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn overwrite_leaves_no_temp_files() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        let store = FileStorageProvider::new(&path);
        store.save(&MaintenanceModeStatus::default()).await?;
        store.save(&MaintenanceModeStatus { is_content_frozen: true, ..Default::default() }).await?;

        let mut entries = fs::read_dir(path.parent().unwrap()).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["status.json".to_string()]);
        assert!(store.read().await?.unwrap().is_content_frozen);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn written_file_holds_the_whole_document() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        let store = FileStorageProvider::new(&path);
        let status = MaintenanceModeStatus { is_in_maintenance_mode: true, is_content_frozen: true, ..Default::default() };
        store.save(&status).await?;

        let bytes = std::fs::read(&path)?;
        assert_eq!(bytes, serde_json::to_vec_pretty(&status)?);
        assert_eq!(MaintenanceModeStatus::from_slice(&bytes)?, status);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_unavailable() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        fs::create_dir_all(&path).await?;

        let err = FileStorageProvider::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StorageError::BackendUnavailable(_)));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
