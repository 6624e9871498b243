//! Global configuration types for imgshare.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.imgshare/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Explicit sqlx database URL. Defaults to `imgshare.db` in the data directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Bridge tracing spans to the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            log_filter: default_log_filter(),
            enable_otel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert!(config.database_url.is_none());
        assert_eq!(config.log_filter, "info");
        assert!(!config.enable_otel);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
database_url = "sqlite::memory:"
log_filter = "debug,sqlx=warn"
enable_otel = true
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.log_filter, "debug,sqlx=warn");
        assert!(config.enable_otel);
    }
}
