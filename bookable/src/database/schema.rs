//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the bookable reservation store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the users table.
///
/// Guests and hosts share one table; a user becomes a host by owning
/// a listing.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )";

/// SQL statement to create the listings table.
///
/// `moderated` controls the initial booking status: bookings of a moderated
/// listing start as pending and await host approval.
pub const CREATE_LISTINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS listings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        host_id INTEGER NOT NULL REFERENCES users(id),
        title TEXT NOT NULL,
        moderated INTEGER NOT NULL DEFAULT 0
    )";

/// SQL statement to create the slots table.
///
/// Dates and times-of-day are stored as ISO-8601 text so the half-open
/// window comparisons work lexicographically. `price_mode` is either
/// 'private' (flat `amount`, capacity fixed at 1) or 'group' (`amount`
/// is per guest and `capacity` is at least 2); prices are stored as
/// exact decimal text.
pub const CREATE_SLOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS slots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        listing_id INTEGER NOT NULL REFERENCES listings(id),
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        price_mode TEXT NOT NULL,
        amount TEXT NOT NULL,
        capacity INTEGER NOT NULL
    )";

/// SQL statement to create the bookings table.
///
/// `status` holds the canonical lowercase status name and `created_at` is
/// Unix epoch seconds. `total_price` is exact decimal text.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        slot_id INTEGER NOT NULL REFERENCES slots(id),
        guests INTEGER NOT NULL,
        total_price TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the schedule entries table.
///
/// Entry instants are Unix epoch seconds (UTC); the interval is half-open.
pub const CREATE_SCHEDULE_ENTRIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS schedule_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        host_id INTEGER NOT NULL REFERENCES users(id),
        title TEXT NOT NULL,
        description TEXT,
        start_time INTEGER NOT NULL,
        end_time INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create an index over bookings by slot and status.
///
/// This index backs the capacity ledger query, which sums confirmed guests
/// per slot.
pub const CREATE_BOOKINGS_SLOT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_slot_status ON bookings(slot_id, status)";

/// SQL statement to create an index over bookings by user.
pub const CREATE_BOOKINGS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings(user_id)";

/// SQL statement to create an index over slots by listing and date.
pub const CREATE_SLOTS_LISTING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_slots_listing_date ON slots(listing_id, date)";

/// SQL statement to create an index over schedule entries by host and start.
pub const CREATE_ENTRIES_HOST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_entries_host_start ON schedule_entries(host_id, start_time)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a booking.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (user_id, slot_id, guests, total_price, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

/// SQL statement to insert a schedule entry.
pub const INSERT_SCHEDULE_ENTRY: &str = r"
    INSERT INTO schedule_entries
    (host_id, title, description, start_time, end_time, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
