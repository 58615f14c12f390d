//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test
//! modules.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::ids::{ListingId, SlotId, UserId};
use crate::slot::{NewSlot, PriceRule};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts a user and returns its id.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_user(db: &mut Database, name: &str) -> UserId {
    db.insert_user(name).unwrap()
}

/// Inserts a listing for the host and returns its id.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_listing(db: &mut Database, host_id: UserId, moderated: bool) -> ListingId {
    db.insert_listing(host_id, "Test listing", moderated).unwrap()
}

/// Inserts a single-guest slot at the given date and hours.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_private_slot(
    db: &mut Database,
    listing_id: ListingId,
    date: &str,
    start_hour: u32,
    end_hour: u32,
) -> SlotId {
    let slot = NewSlot::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        PriceRule::private(Decimal::new(10000, 2)).unwrap(),
    )
    .unwrap();
    db.insert_slot(listing_id, &slot).unwrap()
}

/// Inserts a group slot with the given capacity at the given date and hours.
///
/// # Panics
///
/// Panics on any failure; acceptable in test code.
pub fn seed_group_slot(
    db: &mut Database,
    listing_id: ListingId,
    date: &str,
    start_hour: u32,
    end_hour: u32,
    capacity: u32,
) -> SlotId {
    let slot = NewSlot::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        PriceRule::group(Decimal::new(2500, 2), capacity).unwrap(),
    )
    .unwrap();
    db.insert_slot(listing_id, &slot).unwrap()
}
