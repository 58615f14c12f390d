//! Database layer for persistent storage of listings, slots, bookings, and
//! schedule entries.
//!
//! This module provides a SQLite-based storage layer with connection
//! management, schema versioning, and CRUD operations. Every
//! read-check-write unit in the engine runs inside one IMMEDIATE
//! transaction obtained from [`Database::begin_immediate`], so SQLite's
//! write lock serializes concurrent writers.
//!
//! # Examples
//!
//! ```no_run
//! use bookable::database::{Database, DatabaseConfig};
//!
//! // Open a database
//! let mut db = Database::open(DatabaseConfig::new("/tmp/bookable.db")).unwrap();
//!
//! // Seed a host and a listing
//! let host = db.insert_user("marta").unwrap();
//! let listing = db.insert_listing(host, "Kayak tour", false).unwrap();
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
