//! # Application Configuration
//!
//! Settings are read from a single YAML file. Every field has a default, so
//! the file may be partial or absent altogether.
//!
//! ## Lookup Order
//!
//! 1. The path in the `SOCIETY_DUES_CONFIG` environment variable
//! 2. `society_dues.yaml` in the working directory, if it exists
//! 3. Built-in defaults
//!
//! ## YAML Format
//!
//! ```yaml
//! server:
//!   host: "0.0.0.0"
//!   port: 3000
//!   allowed_origin: "http://localhost:8080"
//! storage:
//!   payments_file: "data/payments.csv"
//! export:
//!   directory: "exports"
//! due_table:
//!   warning_after_days: 30
//!   critical_after_days: 90
//!   date_format: month_day_year
//! log_filter: "info,society_dues=debug"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::DueTableConfig;

pub const CONFIG_PATH_ENV: &str = "SOCIETY_DUES_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "society_dues.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub due_table: DueTableConfig,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// CSV export of payment rows; `None` starts with an empty in-memory store
    /// that is filled through the payments API
    pub payments_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// When set, every due export is also saved here
    pub directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            export: ExportConfig::default(),
            due_table: DueTableConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))
    }
}

impl AppConfig {
    /// Load configuration following the documented lookup order
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let config: AppConfig = if yaml_content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(yaml_content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.due_table.validate()?;
        self.server.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateFormat;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.payments_file, None);
        assert_eq!(config.export.directory, None);
        assert_eq!(config.due_table.warning_after_days, 30);
        assert_eq!(config.due_table.critical_after_days, 90);
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            "server:\n  port: 8088\ndue_table:\n  date_format: iso\n",
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.due_table.date_format, DateFormat::Iso);
        assert_eq!(config.due_table.critical_after_days, 90);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_thresholds_are_rejected() {
        let result = AppConfig::from_yaml(
            "due_table:\n  warning_after_days: 100\n  critical_after_days: 90\n",
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Warning threshold"), "{}", message);
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let result = AppConfig::from_yaml("server:\n  host: \"not an address\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("society_dues.yaml");
        fs::write(
            &path,
            "storage:\n  payments_file: /srv/dues/payments.csv\nexport:\n  directory: /srv/dues/exports\nlog_filter: debug\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(
            config.storage.payments_file,
            Some(PathBuf::from("/srv/dues/payments.csv"))
        );
        assert_eq!(config.export.directory, Some(PathBuf::from("/srv/dues/exports")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8080);
    }
}
