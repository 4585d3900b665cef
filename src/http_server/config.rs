//! Listener settings for the table API
//!
//! Lives under the `http` key of the gridbase config file. Every field is
//! optional:
//!
//! ```json
//! { "http": { "host": "127.0.0.1", "port": 8480, "cors_origins": ["https://app.example"] } }
//! ```

use serde::{Deserialize, Serialize};

/// Port served when the config names none
pub const DEFAULT_PORT: u16 = 8480;

/// Where the table API listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,

    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin, so a published
    /// workbook can be called from any page.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Default listener on another port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` to bind
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_open() {
        let config = HttpServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_socket_addr() {
        assert_eq!(HttpServerConfig::with_port(9000).socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: HttpServerConfig =
            serde_json::from_str(r#"{"cors_origins": ["https://app.example"]}"#).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.allows_any_origin());
    }
}
