use anyhow::Result;
use serde::{Deserialize, Deserializer};
use anyhow::anyhow;
use std::{fmt, path::Path, str::FromStr};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub maintenance: MaintenanceModeSettings,
    #[serde(default)]
    pub storage: FileStorageConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Which backend persists the maintenance status record.
///
/// The mode also decides the consistency policy: `Database` deployments are
/// assumed to run several instances and re-read the record on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageMode {
    Database,
    #[default]
    File,
    InMemory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Database => "database",
            StorageMode::File => "file",
            StorageMode::InMemory => "in_memory",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "database" | "db" => Ok(StorageMode::Database),
            "file" | "filesystem" | "file_system" => Ok(StorageMode::File),
            "in_memory" | "inmemory" | "memory" => Ok(StorageMode::InMemory),
            other => Err(anyhow!("unknown storage mode `{other}`; expected database, file or in_memory")),
        }
    }
}

impl<'de> Deserialize<'de> for StorageMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Static override supplied at process start. Immutable for the process lifetime.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct MaintenanceModeSettings {
    #[serde(default)]
    pub is_in_maintenance_mode: bool,
    #[serde(default)]
    pub is_content_frozen: bool,
    #[serde(default)]
    pub storage_mode: StorageMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileStorageConfig {
    #[serde(default = "default_file_path")]
    pub file_path: String,
    #[serde(default = "default_record_key")]
    pub record_key: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self { file_path: default_file_path(), record_key: default_record_key() }
    }
}

fn default_file_path() -> String { "data/maintenance_mode.json".into() }
fn default_record_key() -> String { "default".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.maintenance.normalize_from_env()?;
        self.storage.normalize_from_env();
        self.database.normalize_from_env();
        match self.maintenance.storage_mode {
            StorageMode::Database => self.database.validate()?,
            StorageMode::File => self.storage.validate()?,
            StorageMode::InMemory => {}
        }
        Ok(())
    }
}

impl MaintenanceModeSettings {
    /// Environment variables win over the file so operators can flip the
    /// override without editing config.
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("MAINTENANCE_MODE") {
            self.is_in_maintenance_mode = parse_flag("MAINTENANCE_MODE", &v)?;
        }
        if let Ok(v) = std::env::var("CONTENT_FROZEN") {
            self.is_content_frozen = parse_flag("CONTENT_FROZEN", &v)?;
        }
        if let Ok(v) = std::env::var("MAINTENANCE_STORAGE_MODE") {
            self.storage_mode = v.parse()?;
        }
        Ok(())
    }
}

impl FileStorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("MAINTENANCE_FILE_PATH") {
            self.file_path = path;
        }
        if self.record_key.trim().is_empty() {
            self.record_key = default_record_key();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.trim().is_empty() {
            return Err(anyhow!("storage.file_path is empty; required when storage_mode = file"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // fall back to DATABASE_URL when the file leaves it blank
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be a positive number of seconds"));
        }
        Ok(())
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{name}: expected a boolean, got `{other}`")),
    }
}
