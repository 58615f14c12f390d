//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the bookable library.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use bookable::database::{Database, DatabaseConfig};
use bookable::ids::{ListingId, SlotId, UserId};
use bookable::{NewSlot, PriceRule};

/// A test database together with the temporary directory that owns its
/// file. Keep the directory alive for as long as the database is used.
#[allow(dead_code)]
pub struct TestStore {
    pub db: Database,
    pub dir: TempDir,
}

/// Opens a fresh database in a temporary directory.
///
/// # Panics
///
/// Panics if the directory or database cannot be created. This is
/// acceptable in test code where we want to fail fast.
#[allow(dead_code)]
pub fn open_test_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    TestStore { db, dir }
}

/// Returns the database file path inside a test directory.
#[allow(dead_code)]
pub fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("test.db")
}

/// A fixed instant used as "now" so tests are deterministic.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// A UTC instant on the fixture date.
#[allow(dead_code)]
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
}

/// Seeds a user.
#[allow(dead_code)]
pub fn seed_user(db: &mut Database, name: &str) -> UserId {
    db.insert_user(name).unwrap()
}

/// Seeds a listing for the host.
#[allow(dead_code)]
pub fn seed_listing(db: &mut Database, host: UserId, moderated: bool) -> ListingId {
    db.insert_listing(host, "Test listing", moderated).unwrap()
}

/// Seeds a single-guest slot on the fixture date.
#[allow(dead_code)]
pub fn seed_private_slot(
    db: &mut Database,
    listing: ListingId,
    start_hour: u32,
    end_hour: u32,
    price_cents: i64,
) -> SlotId {
    let slot = NewSlot::new(
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        PriceRule::private(Decimal::new(price_cents, 2)).unwrap(),
    )
    .unwrap();
    db.insert_slot(listing, &slot).unwrap()
}

/// Seeds a group slot on the fixture date.
#[allow(dead_code)]
pub fn seed_group_slot(
    db: &mut Database,
    listing: ListingId,
    start_hour: u32,
    end_hour: u32,
    per_guest_cents: i64,
    capacity: u32,
) -> SlotId {
    let slot = NewSlot::new(
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        PriceRule::group(Decimal::new(per_guest_cents, 2), capacity).unwrap(),
    )
    .unwrap();
    db.insert_slot(listing, &slot).unwrap()
}
