//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;
use tracing::{debug, warn};

/// Ensure the directory holding `file_path` exists, creating it if needed.
pub async fn ensure_parent_dir(file_path: &Path) -> anyhow::Result<()> {
    let Some(parent) = file_path.parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "data directory missing; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    debug!(dir = %parent.display(), "data directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("maintenance_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("status.json");
        ensure_parent_dir(&file).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_fine() -> anyhow::Result<()> {
        ensure_parent_dir(Path::new("status.json")).await?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_directory_is_created_verbatim() -> anyhow::Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = std::env::temp_dir().join(format!("maintenance_env_{}", uuid::Uuid::new_v4()));
        let dir = root.join(OsStr::from_bytes(b"data-\xff"));
        ensure_parent_dir(&dir.join("status.json")).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());

        // nothing was created under a lossy replacement name
        let lossy = root.join(dir.file_name().unwrap().to_string_lossy().as_ref());
        assert!(tokio::fs::metadata(&lossy).await.is_err());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
