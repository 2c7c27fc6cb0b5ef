use std::sync::Arc;

use configs::{MaintenanceModeSettings, StorageMode};
use models::{MaintenanceModeStatus, StatusSettings};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::storage::{StorageProvider, StorageProviderFactory};

/// Tracks the maintenance status for one process and persists every change.
///
/// The static override from configuration is folded into the tracked status
/// at load time. It stays in force, including over fresh database reads,
/// until a runtime toggle replaces it.
pub struct MaintenanceModeService {
    settings: MaintenanceModeSettings,
    factory: StorageProviderFactory,
    tracked: Mutex<Tracked>,
}

struct Tracked {
    status: MaintenanceModeStatus,
    override_active: bool,
}

impl MaintenanceModeService {
    /// Read the persisted status once, apply the static override and build
    /// the service around the result.
    ///
    /// Never fails: an empty or unreachable backend leaves the defaults in place.
    pub async fn load(settings: MaintenanceModeSettings, factory: StorageProviderFactory) -> Self {
        if settings.storage_mode != factory.storage_mode() {
            warn!(
                configured = %settings.storage_mode,
                active = %factory.storage_mode(),
                "storage mode in settings differs from the active provider; using the provider's"
            );
        }
        if settings.is_content_frozen && !settings.is_in_maintenance_mode {
            warn!("static content freeze is ignored unless maintenance mode is also set in configuration");
        }

        let persisted = match factory.get_provider().read().await {
            Ok(Some(persisted)) => {
                debug!(
                    maintenance = persisted.is_in_maintenance_mode,
                    frozen = persisted.is_content_frozen,
                    "loaded persisted status"
                );
                persisted
            }
            Ok(None) => {
                info!(mode = %factory.storage_mode(), "no persisted status; starting from defaults");
                MaintenanceModeStatus::default()
            }
            Err(e) => {
                warn!(mode = %factory.storage_mode(), error = %e, "cannot read persisted status; starting from defaults");
                MaintenanceModeStatus::default()
            }
        };

        let override_active = settings.is_in_maintenance_mode;
        if override_active {
            info!(
                event = "static_override",
                frozen = settings.is_content_frozen,
                "maintenance mode forced on by configuration"
            );
        }
        let status = apply_override(&settings, persisted, override_active);
        Self { settings, factory, tracked: Mutex::new(Tracked { status, override_active }) }
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.factory.storage_mode()
    }

    pub fn storage_provider(&self) -> Arc<dyn StorageProvider> {
        self.factory.get_provider()
    }

    pub fn static_settings(&self) -> &MaintenanceModeSettings {
        &self.settings
    }

    /// Current status.
    ///
    /// In `Database` mode the record is re-read on every call because other
    /// instances may have changed it; if the backend has nothing, the last
    /// known value is used. Other modes answer from memory.
    pub async fn status(&self) -> Result<MaintenanceModeStatus, ServiceError> {
        let mut tracked = self.tracked.lock().await;
        if self.storage_mode() == StorageMode::Database {
            if let Some(fresh) = self.storage_provider().read().await? {
                tracked.status = apply_override(&self.settings, fresh, tracked.override_active);
            }
        }
        Ok(tracked.status.clone())
    }

    /// The tracked status as this process last saw it, without touching storage.
    pub async fn tracked_status(&self) -> MaintenanceModeStatus {
        self.tracked.lock().await.status.clone()
    }

    /// Whether the static override still shapes the tracked status.
    pub async fn is_override_active(&self) -> bool {
        self.tracked.lock().await.override_active
    }

    pub async fn is_in_maintenance_mode(&self) -> Result<bool, ServiceError> {
        Ok(self.status().await?.is_in_maintenance_mode)
    }

    pub async fn is_content_frozen(&self) -> Result<bool, ServiceError> {
        Ok(self.status().await?.is_content_frozen)
    }

    /// Turn maintenance mode on or off. A call that matches the tracked flag
    /// does nothing and writes nothing.
    pub async fn toggle_maintenance_mode(&self, on: bool) -> Result<(), ServiceError> {
        self.commit("maintenance_mode", true, |status| {
            if status.is_in_maintenance_mode == on {
                return false;
            }
            status.is_in_maintenance_mode = on;
            status.using_web_config = false;
            true
        })
        .await
    }

    /// Freeze or unfreeze content. Same no-op rule as [`Self::toggle_maintenance_mode`].
    pub async fn toggle_content_freeze(&self, on: bool) -> Result<(), ServiceError> {
        self.commit("content_freeze", true, |status| {
            if status.is_content_frozen == on {
                return false;
            }
            status.is_content_frozen = on;
            status.using_web_config = false;
            true
        })
        .await
    }

    /// Replace the display settings and persist.
    pub async fn save_settings(&self, settings: StatusSettings) -> Result<(), ServiceError> {
        self.commit("settings", false, move |status| {
            status.settings = settings;
            true
        })
        .await
    }

    /// Apply `change` to a copy of the tracked status, persist the copy, and
    /// only then make it the tracked value. The lock is held throughout so
    /// concurrent mutations cannot interleave between save and commit.
    /// A successful toggle ends the static override.
    async fn commit<F>(&self, what: &'static str, is_toggle: bool, change: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut MaintenanceModeStatus) -> bool,
    {
        let mut tracked = self.tracked.lock().await;
        let mut next = tracked.status.clone();
        if !change(&mut next) {
            debug!(change = what, "already in requested state; nothing to save");
            return Ok(());
        }

        if let Err(e) = self.storage_provider().save(&next).await {
            warn!(change = what, mode = %self.storage_mode(), error = %e, "persisting status failed; keeping previous state");
            return Err(e.into());
        }
        tracked.status = next;
        if is_toggle && tracked.override_active {
            tracked.override_active = false;
            info!(event = "static_override_replaced", change = what, "runtime toggle replaced the configured override");
        }
        info!(
            event = "status_changed",
            change = what,
            maintenance = tracked.status.is_in_maintenance_mode,
            frozen = tracked.status.is_content_frozen,
            "maintenance status saved"
        );
        Ok(())
    }
}

/// The override only ever forces maintenance on; when it does, its freeze
/// flag replaces the persisted one as well.
fn apply_override(
    settings: &MaintenanceModeSettings,
    mut status: MaintenanceModeStatus,
    active: bool,
) -> MaintenanceModeStatus {
    if !active || !settings.is_in_maintenance_mode {
        return status;
    }
    status.is_in_maintenance_mode = true;
    status.is_content_frozen = settings.is_content_frozen;
    status.using_web_config = true;
    status
}
