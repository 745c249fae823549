//! Runtime configuration for a [`Db`](crate::db::Db).
//!
//! Configuration is optional; `DbConfig::default()` is what `Db::new` uses.
//! When loaded from TOML every key may be omitted.

use crate::{
    db::store::MAX_ROW_BYTES,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: io::Error,
    },

    #[error("failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Config, err.to_string())
    }
}

///
/// DbConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// Sessions opened from the `Db` start with debug logging enabled.
    pub debug: bool,

    /// Record executor events into the global metrics state.
    pub metrics: bool,

    /// Largest encoded row the store accepts.
    pub max_row_bytes: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            debug: false,
            metrics: true,
            max_row_bytes: MAX_ROW_BYTES,
        }
    }
}

impl DbConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&source).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Like [`DbConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { path, source }) if source.kind() == io::ErrorKind::NotFound => {
                log::warn!("config '{path}' not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_row_bytes == 0 || self.max_row_bytes > MAX_ROW_BYTES {
            return Err(ConfigError::Invalid {
                field: "max_row_bytes",
                message: format!("must be between 1 and {MAX_ROW_BYTES}"),
            });
        }

        Ok(())
    }
}

///
/// TESTS
///
