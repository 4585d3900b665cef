//! Configuration file
//!
//! ```json
//! {
//!   "workbook": "./workbook.json",
//!   "default_table": "Sheet1",
//!   "data_encoding": "stringified",
//!   "http": { "host": "0.0.0.0", "port": 8480, "cors_origins": [] }
//! }
//! ```
//!
//! Only `workbook` is required. A relative workbook path is taken relative
//! to the directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DataEncoding;
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workbook file (required)
    pub workbook: PathBuf,

    /// Table used when a request names none (default: first table)
    #[serde(default)]
    pub default_table: Option<String>,

    /// Placement of success payloads (default: "stringified")
    #[serde(default)]
    pub data_encoding: DataEncoding,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if config.workbook.is_relative() {
            if let Some(dir) = path.parent() {
                config.workbook = dir.join(&config.workbook);
            }
        }

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.workbook.as_os_str().is_empty() {
            return Err(CliError::config_error("workbook must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if matches!(self.default_table.as_deref(), Some("")) {
            return Err(CliError::config_error(
                "default_table must be omitted or non-empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("gridbase.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_minimal_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"workbook": "book.json"}"#);
        let config = Config::load(&path).unwrap();

        assert_eq!(config.workbook, tmp.path().join("book.json"));
        assert_eq!(config.default_table, None);
        assert_eq!(config.data_encoding, DataEncoding::Stringified);
        assert_eq!(config.http, HttpServerConfig::default());
    }

    #[test]
    fn test_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"{
                "workbook": "/var/lib/gridbase/book.json",
                "default_table": "Orders",
                "data_encoding": "nested",
                "http": {"port": 8080, "cors_origins": []}
            }"#,
        );
        let config = Config::load(&path).unwrap();

        assert_eq!(config.workbook, PathBuf::from("/var/lib/gridbase/book.json"));
        assert_eq!(config.default_table.as_deref(), Some("Orders"));
        assert_eq!(config.data_encoding, DataEncoding::Nested);
        assert_eq!(config.http.port, 8080);
        assert!(config.http.cors_origins.is_empty());
    }

    #[test]
    fn test_invalid_configs() {
        let tmp = TempDir::new().unwrap();
        for body in [
            r#"{}"#,
            r#"{"workbook": ""}"#,
            r#"{"workbook": "b.json", "http": {"port": 0}}"#,
            r#"{"workbook": "b.json", "default_table": ""}"#,
            r#"{"workbook": "b.json", "data_encoding": "xml"}"#,
        ] {
            let path = write_config(&tmp, body);
            let err = Config::load(&path).unwrap_err();
            assert_eq!(err.code_str(), "GRID_CLI_CONFIG_ERROR", "{}", body);
        }
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::load(&tmp.path().join("absent.json")).is_err());
    }
}
