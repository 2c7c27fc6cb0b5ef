//! Maintenance status record.
//!
//! The whole record is the unit exchanged with storage: backends read and
//! write it as one JSON document, never field by field.

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Content shown to end users while the site is in maintenance mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceModeViewModel {
    pub page_title: String,
    pub title: String,
    pub text: String,
}

/// Display settings persisted alongside the toggle flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSettings {
    pub view_model: MaintenanceModeViewModel,
    /// Render `template_name` instead of the built-in page.
    pub use_template: bool,
    pub template_name: Option<String>,
    pub allow_back_office_users_through: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceModeStatus {
    pub is_in_maintenance_mode: bool,
    pub is_content_frozen: bool,
    /// Set when the flags come from the static configuration override.
    pub using_web_config: bool,
    pub settings: StatusSettings,
}

impl MaintenanceModeStatus {
    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string(self).map_err(|e| ModelError::Serialization(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        serde_json::from_str(raw).map_err(|e| ModelError::Serialization(e.to_string()))
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, ModelError> {
        serde_json::from_slice(raw).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}
