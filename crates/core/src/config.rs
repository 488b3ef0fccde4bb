//! Application configuration loaded from file and environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::repository::JsonFileRepository;

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "videojuegos";
/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `VIDEOJUEGOS_STORAGE=file`.
pub const ENV_PREFIX: &str = "VIDEOJUEGOS";

const DEFAULT_CONFIG: &str = r#"# Storage backend: "memory" keeps games for the current run only,
# "file" persists them to `data_file`.
storage = "memory"

# data_file = "/path/to/videojuegos.json"
"#;

/// Which repository adapter backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Games live only for the current process.
    #[default]
    Memory,
    /// Games persist to a JSON catalogue file.
    File,
}

/// Runtime settings for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Repository adapter to use.
    pub storage: StorageKind,
    /// Catalogue file used when `storage = "file"`.
    pub data_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            data_file: JsonFileRepository::default_path(),
        }
    }
}

impl AppConfig {
    /// Load from the default config file plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional on disk) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("storage", "memory")?
            .set_default(
                "data_file",
                defaults.data_file.to_string_lossy().into_owned(),
            )?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("failed to deserialize configuration")
    }
}

/// Default configuration file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(config_path())
}

/// Write the default configuration to `path` if it is missing.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "default configuration written");
    Ok(())
}
