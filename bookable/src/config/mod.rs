//! Configuration system for bookable.
//!
//! This module provides hierarchical configuration with support for:
//! - A YAML user configuration file (`~/.bookable/config.yaml`)
//! - Environment variable overrides (`BOOKABLE_*`)
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`BOOKABLE_*`)
//! 3. User config (`~/.bookable/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use bookable::config::{Config, ConfigBuilder};
//! use std::path::PathBuf;
//!
//! let custom = Config {
//!     data_dir: Some(PathBuf::from("/srv/bookable")),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.data_dir, Some(PathBuf::from("/srv/bookable")));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::default_data_dir;
use crate::error::{Error, Result};

/// Default lock wait in seconds when nothing else configures it.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Configuration values for the bookable store.
///
/// Every field is optional so partial configurations from different sources
/// can be merged; [`Config::merged_over`] implements the precedence, and the
/// accessor methods apply the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// How long to wait on the store's write lock before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Whether a missing data directory is created on first use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
}

impl Config {
    /// Merges `self` over `lower`: fields set in `self` win, unset fields
    /// fall through.
    #[must_use]
    pub fn merged_over(self, lower: Self) -> Self {
        Self {
            data_dir: self.data_dir.or(lower.data_dir),
            maximum_lock_wait_seconds: self
                .maximum_lock_wait_seconds
                .or(lower.maximum_lock_wait_seconds),
            auto_init: self.auto_init.or(lower.auto_init),
        }
    }

    /// Reads overrides from `BOOKABLE_*` environment variables.
    ///
    /// Recognized variables: `BOOKABLE_DATA_DIR`,
    /// `BOOKABLE_MAX_LOCK_WAIT`, `BOOKABLE_DISABLE_AUTOINIT`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable is set but unparseable.
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("BOOKABLE_DATA_DIR").ok().map(PathBuf::from);

        let maximum_lock_wait_seconds = match std::env::var("BOOKABLE_MAX_LOCK_WAIT") {
            Ok(value) => Some(value.parse::<u64>().map_err(|_| Error::Validation {
                field: "BOOKABLE_MAX_LOCK_WAIT".into(),
                message: format!("expected a number of seconds, got '{value}'"),
            })?),
            Err(_) => None,
        };

        let auto_init = match std::env::var("BOOKABLE_DISABLE_AUTOINIT") {
            Ok(value) if value == "1" || value.eq_ignore_ascii_case("true") => Some(false),
            _ => None,
        };

        Ok(Self {
            data_dir,
            maximum_lock_wait_seconds,
            auto_init,
        })
    }

    /// Loads a partial configuration from a YAML file, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Returns the effective lock wait duration.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns whether a missing data directory is created on first use.
    #[must_use]
    pub fn auto_init(&self) -> bool {
        self.auto_init.unwrap_or(true)
    }

    /// Resolves the effective data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home
    /// directory cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero lock wait.
    pub fn validate(&self) -> Result<()> {
        if self.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "lock wait must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

/// Builder assembling a [`Config`] from its sources in precedence order.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    skip_files: bool,
    skip_env: bool,
    config_path: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the user configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Reads the configuration file from an explicit path instead of
    /// `~/.bookable/config.yaml`.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Applies programmatic overrides, which win over every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds and validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the merged result is
    /// invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let path = match self.config_path {
                Some(path) => path,
                None => default_data_dir()?.join("config.yaml"),
            };
            if let Some(file_config) = Config::load_file(&path)? {
                config = file_config.merged_over(config);
            }
        }

        if !self.skip_env {
            config = Config::from_env()?.merged_over(config);
        }

        if let Some(overrides) = self.overrides {
            config = overrides.merged_over(config);
        }

        config.validate()?;
        Ok(config)
    }
}
