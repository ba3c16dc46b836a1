//! Application configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment:
//!
//! - `SUPABASE_URL` sets `storage.url` and selects the PostgREST backend
//! - `SUPABASE_SERVICE_ROLE_KEY` (or `SUPABASE_ANON_KEY`) sets `storage.api_key`
//! - `DATAGATE_PORT` sets `server.port`

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::rest_api::DEFAULT_TABLE;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which storage backend serves the data endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgrest,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `path` (defaults if the file does not exist), apply
    /// environment overrides, and validate.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse the JSON file at `path`; a missing file yields defaults
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = non_empty("SUPABASE_URL") {
            self.storage.url = url;
            self.storage.backend = StorageBackend::Postgrest;
        }
        if let Some(key) =
            non_empty("SUPABASE_SERVICE_ROLE_KEY").or_else(|| non_empty("SUPABASE_ANON_KEY"))
        {
            self.storage.api_key = key;
        }
        if let Some(port) = non_empty("DATAGATE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.table.is_empty() {
            return Err(ConfigError::Invalid("storage.table must not be empty".into()));
        }
        if self.storage.backend == StorageBackend::Postgrest {
            if self.storage.url.is_empty() {
                return Err(ConfigError::Invalid(
                    "storage.url is required for the postgrest backend".into(),
                ));
            }
            if self.storage.api_key.is_empty() {
                return Err(ConfigError::Invalid(
                    "storage.api_key is required for the postgrest backend".into(),
                ));
            }
        }
        if !self.server.base_path_is_valid() {
            return Err(ConfigError::Invalid(format!(
                "server.base_path must be empty or start with '/' and not end with '/': {:?}",
                self.server.base_path
            )));
        }
        Ok(())
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.storage.api_key.is_empty() {
            copy.storage.api_key = "***".to_string();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.table, "user_data");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "server": {{"port": 8081, "base_path": "/api"}},
                "storage": {{"backend": "postgrest", "url": "https://x.supabase.co", "api_key": "k"}},
                "logging": {{"json": true}}
            }}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.base_path, "/api");
        assert_eq!(config.storage.backend, StorageBackend::Postgrest);
        assert_eq!(config.storage.table, "user_data");
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("DATAGATE_PORT", "4000"),
        ]));

        assert_eq!(config.storage.backend, StorageBackend::Postgrest);
        assert_eq!(config.storage.url, "https://x.supabase.co");
        assert_eq!(config.storage.api_key, "anon");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_service_role_key_preferred() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));
        assert_eq!(config.storage.api_key, "service");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_unparsable_port_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("DATAGATE_PORT", "high")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_postgrest_requires_credentials() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgrest;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.storage.url = "https://x.supabase.co".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.storage.api_key = "k".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_path() {
        let mut config = AppConfig::default();
        config.server.base_path = "api/".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_redacted() {
        let mut config = AppConfig::default();
        config.storage.api_key = "secret".into();
        assert_eq!(config.redacted().storage.api_key, "***");
        assert_eq!(config.storage.api_key, "secret");
    }
}
