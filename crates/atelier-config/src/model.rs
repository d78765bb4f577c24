//! The application configuration model.

use serde::{Deserialize, Serialize};

use crate::APP_ID;

/// The flat application configuration object, stored as a single JSON
/// file under the base application-data directory.
///
/// Deserialization is strict: unknown fields and missing fields are both
/// schema violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// The name of the application.
    pub app_name: String,

    /// ID of the application.
    pub app_id: String,

    /// Directory where application data is kept. Most other paths build
    /// upon this one, except for `system_downloads_directory_path`.
    pub base_app_data_directory_path: String,

    /// Directory where assets can be found: images, scripts, translations.
    pub assets_directory_path: String,

    /// Directory where files are kept while they are in flight; finished
    /// downloads move out of here into their final directory.
    pub temp_files_directory_path: String,

    /// Directory where files downloaded through the app are kept.
    pub downloads_directory_path: String,

    /// Directory where the system itself places downloaded files.
    pub system_downloads_directory_path: String,

    /// Directory holding cached files.
    pub cache_directory_path: String,

    /// Directory where log files are stored.
    pub logs_directory_path: String,

    /// The locale for translations.
    pub locale: String,

    /// Port on which the websocket connects to the browser frontend.
    pub websocket_port: u16,

    /// Storage allocated for the cache, as a number with a `GB`, `MB`, or
    /// `KB` suffix.
    pub cache_size: String,

    /// Interval for automatic cache cleanup, as a number with an `ms`,
    /// `s`, `d`, `m`, or `y` suffix, or the keyword `never`.
    pub cache_auto_clean_interval: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home = home_dir();
        let base = base_app_data_dir();
        Self {
            app_name: "Atelier Desktop App".to_string(),
            app_id: APP_ID.to_string(),
            assets_directory_path: join(&working_dir(), "assets"),
            temp_files_directory_path: join(&base, "temp"),
            downloads_directory_path: join(&join(&home, "Documents"), APP_ID),
            system_downloads_directory_path: join(&home, "Downloads"),
            cache_directory_path: join(&base, "cache"),
            logs_directory_path: join(&base, "logs"),
            base_app_data_directory_path: base,
            locale: "enUS".to_string(),
            websocket_port: 5895,
            cache_size: "3GB".to_string(),
            cache_auto_clean_interval: "30d".to_string(),
        }
    }
}

/// The platform-local application-data directory for this app.
///
/// `~/AppData/Local/<app-id>` on Windows, `~/Library/Application
/// Support/<app-id>` on macOS, `~/.local/share/<app-id>` elsewhere.
pub fn base_app_data_dir() -> String {
    let data_local = directories::BaseDirs::new()
        .map(|dirs| dirs.data_local_dir().to_string_lossy().into_owned())
        .unwrap_or_else(|| join(&home_dir(), ".local/share"));
    join(&data_local, APP_ID)
}

fn home_dir() -> String {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

fn working_dir() -> String {
    std::env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_else(|_| ".".to_string())
}

fn join(directory: &str, name: &str) -> String {
    atelier_store::path::join(directory, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hang_off_the_base_directory() {
        let config = AppConfig::default();

        assert_eq!(config.app_id, APP_ID);
        assert!(config.temp_files_directory_path.starts_with(&config.base_app_data_directory_path));
        assert!(config.cache_directory_path.starts_with(&config.base_app_data_directory_path));
        assert!(config.logs_directory_path.starts_with(&config.base_app_data_directory_path));
        assert!(config.base_app_data_directory_path.ends_with(APP_ID));
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        assert!(json.contains("\"appName\""));
        assert!(json.contains("\"baseAppDataDirectoryPath\""));
        assert!(json.contains("\"websocketPort\":5895"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let mut value = serde_json::to_value(AppConfig::default()).unwrap();
        value["surprise"] = serde_json::json!(true);

        assert!(serde_json::from_value::<AppConfig>(value).is_err());
    }

    #[test]
    fn rejects_an_incomplete_object() {
        let value = serde_json::json!({
            "baseAppDataDirectoryPath": "somewhere",
            "locale": "enUS",
        });

        assert!(serde_json::from_value::<AppConfig>(value).is_err());
    }

    #[test]
    fn rejects_an_out_of_range_port() {
        let mut value = serde_json::to_value(AppConfig::default()).unwrap();
        value["websocketPort"] = serde_json::json!(70000);

        assert!(serde_json::from_value::<AppConfig>(value).is_err());
    }
}
