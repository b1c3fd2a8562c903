//! Store configuration loading.
//!
//! Configuration is plain YAML mapped onto [`StoreConfig`]. Nothing is read
//! from the environment.

pub mod schema;

pub use schema::{RefreshPolicy, StoreConfig};

use crate::error::{HolidayError, Result};
use std::fs;
use std::path::{Path, PathBuf};

impl StoreConfig {
    /// Parse a configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, PathBuf::from("<inline>"))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path.to_path_buf())
    }

    fn parse(yaml: &str, path: PathBuf) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| HolidayError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if let Err(e) = config.cache_ttl() {
            return Err(HolidayError::ConfigParseError {
                path,
                message: format!("invalid cache_ttl '{}': {}", config.cache_ttl, e),
            });
        }

        if config.timeout == 0 {
            return Err(HolidayError::ConfigParseError {
                path,
                message: "timeout must be at least one second".into(),
            });
        }

        Ok(config)
    }
}
