//! Configuration for Parts Interchange Buddy
//!
//! Resolution order:
//!   1. explicit `--config <FILE>`
//!   2. `<config_dir>/interchange/config.yaml` if it exists
//!   3. built-in defaults
//!
//! `INTERCHANGE_HOST` / `INTERCHANGE_PORT` override whatever was loaded.

mod dataset;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use dataset::{DataFile, Dataset};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported data file format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error(transparent)]
    Catalog(#[from] interchange_core::Error),
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterchangeConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// File this config was read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Newest model year offered. Defaults to the current year.
    pub newest_year: Option<i32>,
    pub year_span: u32,
    /// YAML or JSON file replacing the built-in tables.
    pub data_file: Option<PathBuf>,
}

impl Default for InterchangeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            catalog: CatalogConfig::default(),
            log_filter: "interchange=info,tower_http=info".to_string(),
            source: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            newest_year: None,
            year_span: interchange_core::DEFAULT_YEAR_SPAN,
            data_file: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl InterchangeConfig {
    /// Default config location (~/.config/interchange/config.yaml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("interchange").join("config.yaml"))
    }

    /// Load using the resolution order above, then apply env overrides.
    ///
    /// Runs before logging is set up, so it emits nothing; callers log
    /// [`source`](Self::source) once a subscriber is installed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply `INTERCHANGE_HOST` / `INTERCHANGE_PORT` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("INTERCHANGE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("INTERCHANGE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        Ok(())
    }

    /// Catalog and interchange table selected by this config.
    pub fn load_dataset(&self) -> Result<Dataset> {
        Dataset::load(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("interchange_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = InterchangeConfig::default();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.catalog.year_span, 35);
        assert!(config.catalog.newest_year.is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let path = temp_file("config.yaml", "server:\n  port: 8080\ncatalog:\n  newest_year: 2024\n");
        let config = InterchangeConfig::from_file(&path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.catalog.newest_year, Some(2024));
        assert_eq!(config.log_filter, "interchange=info,tower_http=info");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn bad_yaml_is_reported() {
        let path = temp_file("config.yaml", "server: [unclosed");
        let err = InterchangeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn explicit_file_is_recorded_as_source() {
        let path = temp_file("config.yaml", "log_filter: debug\n");
        let config = InterchangeConfig::load(Some(&path)).unwrap();
        assert_eq!(config.source, Some(path.clone()));
        assert_eq!(config.log_filter, "debug");
        assert!(InterchangeConfig::default().source.is_none());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = InterchangeConfig::load(Some(Path::new("/nonexistent/interchange.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = [("INTERCHANGE_HOST", "0.0.0.0"), ("INTERCHANGE_PORT", "5000")]
            .into_iter()
            .collect();
        let mut config = InterchangeConfig::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn env_rejects_bad_port() {
        let mut config = InterchangeConfig::default();
        let err = config
            .apply_env(|k| (k == "INTERCHANGE_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "http"));
    }
}
