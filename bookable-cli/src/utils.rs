//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, argument parsing,
//! and output formatting.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::error::CliError;
use bookable::{Config, ConfigBuilder, Database, DatabaseConfig};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        data_dir: global.data_dir.clone(),
        maximum_lock_wait_seconds: global.busy_timeout.map(u64::from),
        auto_init: if global.disable_autoinit {
            Some(false)
        } else {
            None
        },
    };

    ConfigBuilder::new()
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options and configuration.
///
/// Priority: global option > config > the library's env/home resolution.
fn resolve_database_path(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join("bookable.db"));
    }
    if let Some(ref data_dir) = config.data_dir {
        return Ok(data_dir.join("bookable.db"));
    }

    bookable::database::resolve_database_path().map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global, config)?;

    if !db_path.exists() && (global.disable_autoinit || !config.auto_init()) {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.lock_wait());
    Database::open(db_config).map_err(CliError::from)
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArguments(format!("invalid date '{value}' (use YYYY-MM-DD)")))
}

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(value: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CliError::InvalidArguments(format!("invalid time '{value}' (use HH:MM)")))
}

/// Parse an instant in RFC 3339 form (e.g. `2025-06-01T10:00:00Z`).
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            CliError::InvalidArguments(format!(
                "invalid instant '{value}' (use RFC 3339, e.g. 2025-06-01T10:00:00Z)"
            ))
        })
}

/// Parse a non-negative decimal amount.
pub fn parse_amount(value: &str) -> Result<Decimal, CliError> {
    let amount: Decimal = value
        .parse()
        .map_err(|_| CliError::InvalidArguments(format!("invalid amount '{value}'")))?;
    if amount.is_sign_negative() {
        return Err(CliError::InvalidArguments(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(amount)
}

/// Format an instant for display.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-06-01").is_ok());
        assert!(parse_date("06/01/2025").is_err());
    }

    #[test]
    fn test_parse_time_both_forms() {
        assert_eq!(
            parse_time("10:30").unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("10:30:15").unwrap(),
            NaiveTime::from_hms_opt(10, 30, 15).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_parse_instant() {
        let dt = parse_instant("2025-06-01T10:00:00Z").unwrap();
        assert_eq!(format_timestamp(dt), "2025-06-01 10:00:00");
        assert!(parse_instant("2025-06-01").is_err());
    }

    #[test]
    fn test_resolve_database_path_precedence() {
        let global = GlobalOptions {
            verbose: false,
            quiet: false,
            data_dir: Some(PathBuf::from("/flag/dir")),
            busy_timeout: None,
            disable_autoinit: false,
        };
        let config = Config {
            data_dir: Some(PathBuf::from("/config/dir")),
            maximum_lock_wait_seconds: None,
            auto_init: None,
        };
        assert_eq!(
            resolve_database_path(&global, &config).unwrap(),
            PathBuf::from("/flag/dir/bookable.db")
        );

        let global = GlobalOptions {
            data_dir: None,
            ..global
        };
        assert_eq!(
            resolve_database_path(&global, &config).unwrap(),
            PathBuf::from("/config/dir/bookable.db")
        );

        // with neither set, resolution falls through to the library
        std::env::set_var("BOOKABLE_DATA_DIR", "/env/dir");
        let config = Config {
            data_dir: None,
            ..config
        };
        assert_eq!(
            resolve_database_path(&global, &config).unwrap(),
            PathBuf::from("/env/dir/bookable.db")
        );
        std::env::remove_var("BOOKABLE_DATA_DIR");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("25.50").unwrap(), Decimal::new(2550, 2));
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("lots").is_err());
    }
}
