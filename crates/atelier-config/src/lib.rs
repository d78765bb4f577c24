//! atelier-config: the application configuration collaborator.
//!
//! A single flat JSON object stored at a fixed path under the base
//! application-data directory, read and written through the file access
//! layer. A missing file on first [`ConfigService::initialize`] is replaced
//! by persisted defaults; every other failure mode is reported distinctly
//! (unreadable file, malformed JSON, schema violation).

mod model;

pub use model::{base_app_data_dir, AppConfig};

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use atelier_store::{FileContent, FileError, FileService};

/// The application identifier; names the app-data directory.
pub const APP_ID: &str = "atelier-desktop-app";

/// Name of the configuration file inside the base app-data directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Failures surfaced by [`ConfigService`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file \"{0}\"")]
    Read(String),

    /// The config file is not well-formed JSON.
    #[error("received invalid value from disk, must be a JSON object")]
    Parse(#[source] serde_json::Error),

    /// The config file is well-formed JSON but violates the schema.
    #[error("received invalid app config from disk")]
    Validation(#[source] serde_json::Error),

    /// Settings were accessed before [`ConfigService::initialize`].
    #[error("config has not been initialized")]
    NotInitialized,

    /// Persisting the config through the file layer failed.
    #[error("failed to persist config")]
    Store(#[from] FileError),
}

/// Loads, serves, and persists the application configuration.
///
/// Construct once at process start with the shared [`FileService`] and
/// inject into consumers.
pub struct ConfigService {
    files: Arc<FileService>,
    config_path: String,
    state: RwLock<Option<AppConfig>>,
}

impl ConfigService {
    /// Create a service storing its file at the default location,
    /// `<base app-data dir>/config.json`.
    pub fn new(files: Arc<FileService>) -> Self {
        Self::with_config_path(files, atelier_store::path::join(&base_app_data_dir(), CONFIG_FILE_NAME))
    }

    /// Create a service storing its file at an explicit location.
    pub fn with_config_path(files: Arc<FileService>, config_path: String) -> Self {
        Self {
            files,
            config_path,
            state: RwLock::new(None),
        }
    }

    /// Where the configuration file lives.
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// Load the configuration from disk, falling back to persisted
    /// defaults when no config file exists yet.
    pub async fn initialize(&self) -> Result<(), ConfigError> {
        let config = self.read_config_from_file().await?;
        *self.state.write().await = Some(config);
        Ok(())
    }

    /// A snapshot of the current configuration.
    pub async fn config(&self) -> Result<AppConfig, ConfigError> {
        self.state
            .read()
            .await
            .clone()
            .ok_or(ConfigError::NotInitialized)
    }

    /// Mutate the configuration and persist the result.
    pub async fn update(&self, mutate: impl FnOnce(&mut AppConfig)) -> Result<(), ConfigError> {
        let mut guard = self.state.write().await;
        let config = guard.as_mut().ok_or(ConfigError::NotInitialized)?;
        mutate(config);
        let snapshot = config.clone();
        self.persist(&snapshot).await
    }

    async fn read_config_from_file(&self) -> Result<AppConfig, ConfigError> {
        let raw = match self.files.read(&self.config_path).await {
            Ok(FileContent::Text(raw)) => raw,
            Ok(FileContent::Binary(_)) => {
                return Err(ConfigError::Read(self.config_path.clone()));
            }
            Err(_) => {
                if !matches!(self.files.exists(&self.config_path).await, Ok(true)) {
                    tracing::info!(path = %self.config_path, "no config file found, writing defaults");
                    let defaults = AppConfig::default();
                    self.persist(&defaults).await?;
                    return Ok(defaults);
                }
                return Err(ConfigError::Read(self.config_path.clone()));
            }
        };

        let value: serde_json::Value = serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
        serde_json::from_value(value).map_err(ConfigError::Validation)
    }

    async fn persist(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.files
            .write(&self.config_path, to_pretty_json(config)?)
            .await?;
        Ok(())
    }
}

/// Serialize as pretty-printed JSON with four-space indentation, the
/// format the config file is stored in.
fn to_pretty_json(config: &AppConfig) -> Result<String, ConfigError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config.serialize(&mut serializer).map_err(ConfigError::Parse)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
