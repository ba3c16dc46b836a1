//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, mount path and
//! CORS settings.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix the data routes are mounted under (default: none)
    #[serde(default)]
    pub base_path: String,

    /// CORS allowed origins (default: empty, meaning any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `base_path` is empty or a rooted path without trailing slash
    pub fn base_path_is_valid(&self) -> bool {
        self.base_path.is_empty()
            || (self.base_path.starts_with('/') && !self.base_path.ends_with('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.base_path.is_empty());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_deserialize() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_base_path_validity() {
        let mut config = HttpServerConfig::default();
        assert!(config.base_path_is_valid());

        config.base_path = "/api".to_string();
        assert!(config.base_path_is_valid());

        config.base_path = "api".to_string();
        assert!(!config.base_path_is_valid());

        config.base_path = "/api/".to_string();
        assert!(!config.base_path_is_valid());

        config.base_path = "/".to_string();
        assert!(!config.base_path_is_valid());
    }
}
