//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file (any format the `config` crate recognizes by extension), then
//! `ORDERFLOW_`-prefixed environment variables with `__` between nested
//! keys, e.g. `ORDERFLOW_STORE__TYPE=file`.

use crate::store::{FileStore, MemoryStore, OrderStore, StoreFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderflowConfig {
    /// Storage configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OrderflowConfig {
    /// Load configuration from built-in defaults, `path` and the environment.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with_defaults(&OrderflowConfig::default(), path)
    }

    /// Load configuration layered over `defaults` instead of the built-in ones.
    pub fn load_with_defaults(
        defaults: &OrderflowConfig,
        path: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(defaults)?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ORDERFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-memory storage (lost on exit)
    #[default]
    Memory,

    /// Single-file storage
    File {
        path: PathBuf,

        #[serde(default)]
        format: StoreFormat,
    },
}

impl StoreConfig {
    /// Construct the configured backend.
    pub fn open(&self) -> Box<dyn OrderStore> {
        match self {
            StoreConfig::Memory => Box::new(MemoryStore::new()),
            StoreConfig::File { path, format } => Box::new(FileStore::new(path.clone(), *format)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrderflowConfig::default();
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = OrderflowConfig::load(None).unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_file_store_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderflow.toml");
        std::fs::write(
            &path,
            r#"
[store]
type = "file"
path = "/var/lib/orderflow/orders.bin"
format = "binary"

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();

        let config = OrderflowConfig::load(path.to_str()).unwrap();

        assert_eq!(
            config.store,
            StoreConfig::File {
                path: PathBuf::from("/var/lib/orderflow/orders.bin"),
                format: StoreFormat::Binary,
            }
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_file_overrides_caller_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderflow.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        let defaults = OrderflowConfig {
            store: StoreConfig::File {
                path: PathBuf::from("orders.json"),
                format: StoreFormat::Json,
            },
            ..OrderflowConfig::default()
        };

        let config = OrderflowConfig::load_with_defaults(&defaults, path.to_str()).unwrap();

        assert_eq!(config.store, defaults.store);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_store_config_deserializes_from_json() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"type":"file","path":"orders.json"}"#).unwrap();

        assert_eq!(
            config,
            StoreConfig::File {
                path: PathBuf::from("orders.json"),
                format: StoreFormat::Json,
            }
        );
    }
}
