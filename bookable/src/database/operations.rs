//! Database CRUD operations for users, listings, slots, bookings, and
//! schedule entries.
//!
//! Read operations are associated functions over a borrowed connection so
//! they compose inside an open transaction; mutations that stand alone take
//! `&mut self` and run in their own IMMEDIATE transaction.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, TransactionBehavior};
use rust_decimal::Decimal;

use crate::booking::{Booking, BookingStatus};
use crate::error::{Error, Result};
use crate::ids::{BookingId, EntryId, ListingId, SlotId, UserId};
use crate::schedule::ScheduleEntry;
use crate::slot::{Listing, NewSlot, PriceRule, Slot};

use super::connection::Database;
use super::schema::{INSERT_BOOKING, INSERT_SCHEDULE_ENTRY};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Converts a UTC instant to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a UTC instant.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(0, secs)
    })
}

fn parse_date(text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_time(text: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_decimal(text: &str) -> rusqlite::Result<Decimal> {
    text.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a slot from a database row.
///
/// Expects row fields in this order: id, `listing_id`, `host_id`, date,
/// `start_time`, `end_time`, `price_mode`, amount, capacity
fn row_to_slot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Slot> {
    let id: SlotId = row.get(0)?;
    let listing_id: ListingId = row.get(1)?;
    let host_id: UserId = row.get(2)?;
    let date: String = row.get(3)?;
    let start_time: String = row.get(4)?;
    let end_time: String = row.get(5)?;
    let price_mode: String = row.get(6)?;
    let amount: String = row.get(7)?;
    let capacity: u32 = row.get(8)?;

    let amount = parse_decimal(&amount)?;
    let price_rule = match price_mode.as_str() {
        "private" => PriceRule::private(amount),
        "group" => PriceRule::group(amount, capacity),
        other => {
            return Err(rusqlite::Error::ToSqlConversionFailure(Box::new(
                crate::error::ValidationError::new(
                    "price_mode",
                    format!("unknown price mode '{other}'"),
                ),
            )))
        }
    }
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Slot {
        id,
        listing_id,
        host_id,
        date: parse_date(&date)?,
        start_time: parse_time(&start_time)?,
        end_time: parse_time(&end_time)?,
        price_rule,
    })
}

/// Helper function to deserialize a booking from a database row.
///
/// Expects row fields in this order: id, `user_id`, `slot_id`, guests,
/// `total_price`, status, `created_at`
fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: BookingId = row.get(0)?;
    let user_id: UserId = row.get(1)?;
    let slot_id: SlotId = row.get(2)?;
    let guests: u32 = row.get(3)?;
    let total_price: String = row.get(4)?;
    let status: BookingStatus = row.get(5)?;
    let created_secs: i64 = row.get(6)?;

    Booking::builder(user_id, slot_id, guests)
        .id(id)
        .total_price(parse_decimal(&total_price)?)
        .status(status)
        .created_at(unix_secs_to_datetime(created_secs)?)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a schedule entry from a database row.
///
/// Expects row fields in this order: id, `host_id`, title, description,
/// `start_time`, `end_time`, `created_at`, `updated_at`
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScheduleEntry> {
    let id: EntryId = row.get(0)?;
    let host_id: UserId = row.get(1)?;
    let title: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let start_secs: i64 = row.get(4)?;
    let end_secs: i64 = row.get(5)?;
    let created_secs: i64 = row.get(6)?;
    let updated_secs: i64 = row.get(7)?;

    ScheduleEntry::builder(
        host_id,
        title,
        unix_secs_to_datetime(start_secs)?,
        unix_secs_to_datetime(end_secs)?,
    )
    .id(id)
    .description(description)
    .created_at(unix_secs_to_datetime(created_secs)?)
    .updated_at(unix_secs_to_datetime(updated_secs)?)
    .build()
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

// SQL statements for CRUD operations
const INSERT_USER: &str = "INSERT INTO users (name) VALUES (?)";

const USER_EXISTS: &str = "SELECT COUNT(*) FROM users WHERE id = ?";

const INSERT_LISTING: &str = "INSERT INTO listings (host_id, title, moderated) VALUES (?, ?, ?)";

const SELECT_LISTING: &str = "SELECT id, host_id, title, moderated FROM listings WHERE id = ?";

const INSERT_SLOT: &str = r"
    INSERT INTO slots (listing_id, date, start_time, end_time, price_mode, amount, capacity)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_SLOT: &str = r"
    SELECT s.id, s.listing_id, l.host_id, s.date, s.start_time, s.end_time,
           s.price_mode, s.amount, s.capacity
    FROM slots s
    JOIN listings l ON l.id = s.listing_id
    WHERE s.id = ?
";

const SELECT_SLOTS_BY_HOST_AND_RANGE: &str = r"
    SELECT s.id, s.listing_id, l.host_id, s.date, s.start_time, s.end_time,
           s.price_mode, s.amount, s.capacity
    FROM slots s
    JOIN listings l ON l.id = s.listing_id
    WHERE l.host_id = ? AND s.date >= ? AND s.date <= ?
    ORDER BY s.date, s.start_time
";

const SELECT_SLOTS_BY_LISTING: &str = r"
    SELECT s.id, s.listing_id, l.host_id, s.date, s.start_time, s.end_time,
           s.price_mode, s.amount, s.capacity
    FROM slots s
    JOIN listings l ON l.id = s.listing_id
    WHERE s.listing_id = ?
    ORDER BY s.date, s.start_time
";

const SLOT_HAS_CONFIRMED_BOOKINGS: &str =
    "SELECT COUNT(*) FROM bookings WHERE slot_id = ? AND status = 'confirmed'";

const DELETE_SLOTS_BY_LISTING: &str = "DELETE FROM slots WHERE listing_id = ?";

const CONFIRMED_GUESTS_FOR_SLOT: &str = r"
    SELECT COALESCE(SUM(guests), 0)
    FROM bookings
    WHERE slot_id = ? AND status = 'confirmed'
";

const SELECT_BOOKING: &str = r"
    SELECT id, user_id, slot_id, guests, total_price, status, created_at
    FROM bookings
    WHERE id = ?
";

const UPDATE_BOOKING_STATUS: &str = "UPDATE bookings SET status = ? WHERE id = ?";

const LIST_BOOKINGS_BY_USER: &str = r"
    SELECT id, user_id, slot_id, guests, total_price, status, created_at
    FROM bookings
    WHERE user_id = ?
    ORDER BY created_at DESC, id DESC
";

const LIST_BOOKINGS_BY_HOST_AND_STATUS: &str = r"
    SELECT b.id, b.user_id, b.slot_id, b.guests, b.total_price, b.status, b.created_at
    FROM bookings b
    JOIN slots s ON s.id = b.slot_id
    JOIN listings l ON l.id = s.listing_id
    WHERE l.host_id = ? AND b.status = ?
    ORDER BY b.created_at DESC, b.id DESC
";

const SELECT_ENTRY: &str = r"
    SELECT id, host_id, title, description, start_time, end_time, created_at, updated_at
    FROM schedule_entries
    WHERE id = ?
";

const SELECT_ENTRY_FOR_HOST: &str = r"
    SELECT id, host_id, title, description, start_time, end_time, created_at, updated_at
    FROM schedule_entries
    WHERE id = ? AND host_id = ?
";

const FIND_OVERLAPPING_ENTRIES: &str = r"
    SELECT id, host_id, title, description, start_time, end_time, created_at, updated_at
    FROM schedule_entries
    WHERE host_id = ? AND start_time < ? AND end_time > ?
    ORDER BY start_time
";

const FIND_OVERLAPPING_ENTRIES_EXCLUDING: &str = r"
    SELECT id, host_id, title, description, start_time, end_time, created_at, updated_at
    FROM schedule_entries
    WHERE host_id = ? AND start_time < ? AND end_time > ? AND id != ?
    ORDER BY start_time
";

const UPDATE_ENTRY: &str = r"
    UPDATE schedule_entries
    SET title = ?, description = ?, start_time = ?, end_time = ?, updated_at = ?
    WHERE id = ? AND host_id = ?
";

const DELETE_ENTRY: &str = "DELETE FROM schedule_entries WHERE id = ? AND host_id = ?";

const LIST_ENTRIES_BY_HOST_AND_RANGE: &str = r"
    SELECT id, host_id, title, description, start_time, end_time, created_at, updated_at
    FROM schedule_entries
    WHERE host_id = ? AND start_time < ? AND end_time > ?
    ORDER BY start_time
";

impl Database {
    /// Creates a user and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty after trimming, or the insert
    /// fails (names are unique).
    pub fn insert_user(&mut self, name: &str) -> Result<UserId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name".into(),
                message: "name must be non-empty after trimming whitespace".into(),
            });
        }

        let tx = self.begin_immediate()?;
        tx.execute(INSERT_USER, params![name])?;
        let id = UserId::new(tx.last_insert_rowid());
        tx.commit()?;
        Ok(id)
    }

    /// Checks whether a user row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_exists(conn: &Connection, user_id: UserId) -> Result<bool> {
        let count: i64 = conn.query_row(USER_EXISTS, params![user_id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Creates a listing owned by `host_id` and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the host does not exist, or a
    /// validation error for an empty title.
    pub fn insert_listing(
        &mut self,
        host_id: UserId,
        title: &str,
        moderated: bool,
    ) -> Result<ListingId> {
        let title = Listing::validate_title(title)?;

        let tx = self.begin_immediate()?;
        if !Self::user_exists(&tx, host_id)? {
            return Err(Error::NotFound {
                resource: format!("user {host_id}"),
            });
        }
        tx.execute(INSERT_LISTING, params![host_id, title, moderated])?;
        let id = ListingId::new(tx.last_insert_rowid());
        tx.commit()?;
        Ok(id)
    }

    /// Retrieves a listing by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_listing(conn: &Connection, listing_id: ListingId) -> Result<Option<Listing>> {
        match conn.query_row(SELECT_LISTING, params![listing_id], |row| {
            Ok(Listing {
                id: row.get(0)?,
                host_id: row.get(1)?,
                title: row.get(2)?,
                moderated: row.get(3)?,
            })
        }) {
            Ok(listing) => Ok(Some(listing)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a slot under the given listing and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the listing does not exist.
    pub fn insert_slot(&mut self, listing_id: ListingId, slot: &NewSlot) -> Result<SlotId> {
        let tx = self.begin_immediate()?;
        if Self::get_listing(&tx, listing_id)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("listing {listing_id}"),
            });
        }
        let id = Self::insert_slot_in_tx(&tx, listing_id, slot)?;
        tx.commit()?;
        Ok(id)
    }

    fn insert_slot_in_tx(
        conn: &Connection,
        listing_id: ListingId,
        slot: &NewSlot,
    ) -> Result<SlotId> {
        let (mode, amount) = match &slot.price_rule {
            PriceRule::Private { price } => ("private", price),
            PriceRule::Group { per_guest, .. } => ("group", per_guest),
        };
        conn.execute(
            INSERT_SLOT,
            params![
                listing_id,
                slot.date.format(DATE_FORMAT).to_string(),
                slot.start_time.format(TIME_FORMAT).to_string(),
                slot.end_time.format(TIME_FORMAT).to_string(),
                mode,
                amount.to_string(),
                slot.price_rule.capacity(),
            ],
        )?;
        Ok(SlotId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a slot by id, with the owning host joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_slot(conn: &Connection, slot_id: SlotId) -> Result<Option<Slot>> {
        match conn.query_row(SELECT_SLOT, params![slot_id], row_to_slot) {
            Ok(slot) => Ok(Some(slot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists a host's slots within an inclusive date range, ordered by date
    /// and start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots_by_host_and_date_range(
        conn: &Connection,
        host_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Slot>> {
        let mut stmt = conn.prepare(SELECT_SLOTS_BY_HOST_AND_RANGE)?;
        let rows = stmt.query_map(
            params![
                host_id,
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string()
            ],
            row_to_slot,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Lists all slots of a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots_by_listing(conn: &Connection, listing_id: ListingId) -> Result<Vec<Slot>> {
        let mut stmt = conn.prepare(SELECT_SLOTS_BY_LISTING)?;
        let rows = stmt.query_map(params![listing_id], row_to_slot)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Checks whether any confirmed booking pins the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slot_has_confirmed_bookings(conn: &Connection, slot_id: SlotId) -> Result<bool> {
        let count: i64 =
            conn.query_row(SLOT_HAS_CONFIRMED_BOOKINGS, params![slot_id], |row| {
                row.get(0)
            })?;
        Ok(count > 0)
    }

    /// Replaces all slots of a listing atomically.
    ///
    /// A slot with a confirmed booking pins the whole replacement: the
    /// operation fails with [`Error::SlotHasBookings`] and nothing changes.
    /// Pending and cancelled bookings do not pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown listing,
    /// [`Error::SlotHasBookings`] if any existing slot has a confirmed
    /// booking, or a database error.
    pub fn replace_listing_slots(
        &mut self,
        listing_id: ListingId,
        slots: &[NewSlot],
    ) -> Result<Vec<SlotId>> {
        let tx = self.begin_immediate()?;

        if Self::get_listing(&tx, listing_id)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("listing {listing_id}"),
            });
        }

        for existing in Self::list_slots_by_listing(&tx, listing_id)? {
            if Self::slot_has_confirmed_bookings(&tx, existing.id)? {
                return Err(Error::SlotHasBookings {
                    slot_id: existing.id,
                });
            }
        }

        tx.execute(DELETE_SLOTS_BY_LISTING, params![listing_id])?;

        let mut ids = Vec::with_capacity(slots.len());
        for slot in slots {
            ids.push(Self::insert_slot_in_tx(&tx, listing_id, slot)?);
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Sums confirmed guests for one slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn confirmed_guests_for_slot(conn: &Connection, slot_id: SlotId) -> Result<u32> {
        let total: u32 =
            conn.query_row(CONFIRMED_GUESTS_FOR_SLOT, params![slot_id], |row| {
                row.get(0)
            })?;
        Ok(total)
    }

    /// Sums confirmed guests per slot over the given slots.
    ///
    /// One GROUP BY query; slots with no confirmed bookings are absent from
    /// the result (treat absence as zero).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sum_confirmed_guests(
        conn: &Connection,
        slot_ids: &[SlotId],
    ) -> Result<HashMap<SlotId, u32>> {
        if slot_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; slot_ids.len()].join(", ");
        let sql = format!(
            "SELECT slot_id, SUM(guests) FROM bookings \
             WHERE status = 'confirmed' AND slot_id IN ({placeholders}) \
             GROUP BY slot_id"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(slot_ids.iter()), |row| {
            let slot_id: SlotId = row.get(0)?;
            let guests: u32 = row.get(1)?;
            Ok((slot_id, guests))
        })?;

        let mut totals = HashMap::new();
        for row in rows {
            let (slot_id, guests) = row?;
            totals.insert(slot_id, guests);
        }
        Ok(totals)
    }

    /// Inserts a booking and returns the assigned id.
    ///
    /// Intended for use inside an open transaction; the engine wraps the
    /// capacity check and this insert in one IMMEDIATE transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_booking(conn: &Connection, booking: &Booking) -> Result<BookingId> {
        conn.execute(
            INSERT_BOOKING,
            params![
                booking.user_id(),
                booking.slot_id(),
                booking.guests(),
                booking.total_price().to_string(),
                booking.status(),
                datetime_to_unix_secs(booking.created_at()),
            ],
        )?;
        Ok(BookingId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_booking(conn: &Connection, booking_id: BookingId) -> Result<Option<Booking>> {
        match conn.query_row(SELECT_BOOKING, params![booking_id], row_to_booking) {
            Ok(booking) => Ok(Some(booking)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Updates a booking's status.
    ///
    /// Does not check transition legality; the engine does that before
    /// calling, inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no row was updated.
    pub fn update_booking_status(
        conn: &Connection,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<()> {
        let updated = conn.execute(UPDATE_BOOKING_STATUS, params![status, booking_id])?;
        if updated == 0 {
            return Err(Error::NotFound {
                resource: format!("booking {booking_id}"),
            });
        }
        Ok(())
    }

    /// Lists a user's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_by_user(conn: &Connection, user_id: UserId) -> Result<Vec<Booking>> {
        let mut stmt = conn.prepare(LIST_BOOKINGS_BY_USER)?;
        let rows = stmt.query_map(params![user_id], row_to_booking)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Lists bookings against a host's listings with the given status,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_by_host_and_status(
        conn: &Connection,
        host_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<Booking>> {
        let mut stmt = conn.prepare(LIST_BOOKINGS_BY_HOST_AND_STATUS)?;
        let rows = stmt.query_map(params![host_id, status], row_to_booking)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Inserts a schedule entry and returns the assigned id.
    ///
    /// Intended for use inside an open transaction; the schedule checker
    /// wraps the conflict search and this insert in one IMMEDIATE
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_entry(conn: &Connection, entry: &ScheduleEntry) -> Result<EntryId> {
        conn.execute(
            INSERT_SCHEDULE_ENTRY,
            params![
                entry.host_id(),
                entry.title(),
                entry.description(),
                datetime_to_unix_secs(entry.start_time()),
                datetime_to_unix_secs(entry.end_time()),
                datetime_to_unix_secs(entry.created_at()),
                datetime_to_unix_secs(entry.updated_at()),
            ],
        )?;
        Ok(EntryId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a schedule entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_entry(conn: &Connection, entry_id: EntryId) -> Result<Option<ScheduleEntry>> {
        match conn.query_row(SELECT_ENTRY, params![entry_id], row_to_entry) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves a schedule entry only if it belongs to the given host.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    pub fn get_entry_for_host(
        conn: &Connection,
        entry_id: EntryId,
        host_id: UserId,
    ) -> Result<Option<ScheduleEntry>> {
        match conn.query_row(SELECT_ENTRY_FOR_HOST, params![entry_id, host_id], row_to_entry) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds a host's entries overlapping the half-open interval
    /// `[start, end)`, optionally excluding one entry (for updates).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping_entries(
        conn: &Connection,
        host_id: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<EntryId>,
    ) -> Result<Vec<ScheduleEntry>> {
        let start_secs = datetime_to_unix_secs(start);
        let end_secs = datetime_to_unix_secs(end);

        let rows = match exclude {
            Some(excluded) => {
                let mut stmt = conn.prepare(FIND_OVERLAPPING_ENTRIES_EXCLUDING)?;
                let rows = stmt.query_map(
                    params![host_id, end_secs, start_secs, excluded],
                    row_to_entry,
                )?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(FIND_OVERLAPPING_ENTRIES)?;
                let rows =
                    stmt.query_map(params![host_id, end_secs, start_secs], row_to_entry)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(rows)
    }

    /// Persists changes to an existing entry, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the entry has no id, or
    /// [`Error::NotFound`] if no row matched the id and host.
    pub fn update_entry(conn: &Connection, entry: &ScheduleEntry) -> Result<()> {
        let id = entry.id().ok_or_else(|| Error::Validation {
            field: "id".into(),
            message: "entry must be persisted before it can be updated".into(),
        })?;

        let updated = conn.execute(
            UPDATE_ENTRY,
            params![
                entry.title(),
                entry.description(),
                datetime_to_unix_secs(entry.start_time()),
                datetime_to_unix_secs(entry.end_time()),
                datetime_to_unix_secs(entry.updated_at()),
                id,
                entry.host_id(),
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound {
                resource: format!("schedule entry {id}"),
            });
        }
        Ok(())
    }

    /// Deletes an entry, scoped to its owner. Returns `true` if a row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_entry(conn: &Connection, entry_id: EntryId, host_id: UserId) -> Result<bool> {
        let deleted = conn.execute(DELETE_ENTRY, params![entry_id, host_id])?;
        Ok(deleted > 0)
    }

    /// Lists a host's entries intersecting `[from, to)`, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_entries_by_host_and_range(
        conn: &Connection,
        host_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ScheduleEntry>> {
        let mut stmt = conn.prepare(LIST_ENTRIES_BY_HOST_AND_RANGE)?;
        let rows = stmt.query_map(
            params![
                host_id,
                datetime_to_unix_secs(to),
                datetime_to_unix_secs(from)
            ],
            row_to_entry,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, seed_group_slot, seed_listing, seed_private_slot, seed_user,
    };
    use chrono::TimeZone;

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_insert_user_and_exists() {
        let mut db = create_test_database();
        let id = db.insert_user("alice").unwrap();

        assert!(Database::user_exists(db.connection(), id).unwrap());
        assert!(!Database::user_exists(db.connection(), UserId::new(999)).unwrap());
    }

    #[test]
    fn test_insert_user_rejects_blank_name() {
        let mut db = create_test_database();
        assert!(db.insert_user("   ").is_err());
    }

    #[test]
    fn test_insert_listing_requires_host() {
        let mut db = create_test_database();
        let result = db.insert_listing(UserId::new(42), "Kayak tour", false);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_listing_round_trip() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");
        let listing_id = db.insert_listing(host, "Kayak tour", true).unwrap();

        let listing = Database::get_listing(db.connection(), listing_id)
            .unwrap()
            .unwrap();
        assert_eq!(listing.host_id, host);
        assert_eq!(listing.title, "Kayak tour");
        assert!(listing.moderated);
    }

    #[test]
    fn test_slot_round_trip() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot_id = seed_group_slot(&mut db, listing, "2025-06-01", 10, 12, 8);

        let slot = Database::get_slot(db.connection(), slot_id).unwrap().unwrap();
        assert_eq!(slot.listing_id, listing);
        assert_eq!(slot.host_id, host);
        assert_eq!(slot.capacity(), 8);
        assert_eq!(
            slot.date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_list_slots_by_host_and_date_range() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        seed_private_slot(&mut db, listing, "2025-06-01", 10, 12);
        seed_private_slot(&mut db, listing, "2025-06-03", 10, 12);
        seed_private_slot(&mut db, listing, "2025-06-10", 10, 12);

        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let slots =
            Database::list_slots_by_host_and_date_range(db.connection(), host, from, to).unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_booking_round_trip_and_capacity_sum() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot = seed_group_slot(&mut db, listing, "2025-06-01", 10, 12, 10);

        let booking = Booking::builder(guest, slot, 3)
            .total_price(Decimal::new(7500, 2))
            .status(BookingStatus::Confirmed)
            .created_at(dt(9, 0))
            .build()
            .unwrap();
        let id = Database::insert_booking(db.connection(), &booking).unwrap();

        let stored = Database::get_booking(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.guests(), 3);
        assert_eq!(stored.total_price(), Decimal::new(7500, 2));
        assert_eq!(stored.status(), BookingStatus::Confirmed);

        let totals = Database::sum_confirmed_guests(db.connection(), &[slot]).unwrap();
        assert_eq!(totals.get(&slot), Some(&3));
    }

    #[test]
    fn test_sum_confirmed_guests_ignores_pending_and_cancelled() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot = seed_group_slot(&mut db, listing, "2025-06-01", 10, 12, 10);

        for status in [BookingStatus::Pending, BookingStatus::Cancelled] {
            let booking = Booking::builder(guest, slot, 5)
                .status(status)
                .created_at(dt(9, 0))
                .build()
                .unwrap();
            Database::insert_booking(db.connection(), &booking).unwrap();
        }

        let totals = Database::sum_confirmed_guests(db.connection(), &[slot]).unwrap();
        assert!(totals.is_empty());
        assert_eq!(
            Database::confirmed_guests_for_slot(db.connection(), slot).unwrap(),
            0
        );
    }

    #[test]
    fn test_update_booking_status() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, true);
        let slot = seed_private_slot(&mut db, listing, "2025-06-01", 10, 12);

        let booking = Booking::builder(guest, slot, 1)
            .created_at(dt(9, 0))
            .build()
            .unwrap();
        let id = Database::insert_booking(db.connection(), &booking).unwrap();

        Database::update_booking_status(db.connection(), id, BookingStatus::Confirmed).unwrap();
        let stored = Database::get_booking(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.status(), BookingStatus::Confirmed);

        let missing = Database::update_booking_status(
            db.connection(),
            BookingId::new(999),
            BookingStatus::Cancelled,
        );
        assert!(matches!(missing, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_list_bookings_by_user_newest_first() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot = seed_group_slot(&mut db, listing, "2025-06-01", 10, 12, 10);

        for (hour, guests) in [(8, 1), (9, 2), (10, 3)] {
            let booking = Booking::builder(guest, slot, guests)
                .status(BookingStatus::Confirmed)
                .created_at(dt(hour, 0))
                .build()
                .unwrap();
            Database::insert_booking(db.connection(), &booking).unwrap();
        }

        let bookings = Database::list_bookings_by_user(db.connection(), guest).unwrap();
        assert_eq!(bookings.len(), 3);
        assert_eq!(bookings[0].guests(), 3);
        assert_eq!(bookings[2].guests(), 1);
    }

    #[test]
    fn test_list_bookings_by_host_and_status() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let other_host = seed_user(&mut db, "other");
        let listing = seed_listing(&mut db, host, true);
        let other_listing = seed_listing(&mut db, other_host, true);
        let slot = seed_private_slot(&mut db, listing, "2025-06-01", 10, 12);
        let other_slot = seed_private_slot(&mut db, other_listing, "2025-06-01", 10, 12);

        for target in [slot, other_slot] {
            let booking = Booking::builder(guest, target, 1)
                .created_at(dt(9, 0))
                .build()
                .unwrap();
            Database::insert_booking(db.connection(), &booking).unwrap();
        }

        let pending =
            Database::list_bookings_by_host_and_status(db.connection(), host, BookingStatus::Pending)
                .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].slot_id(), slot);
    }

    #[test]
    fn test_replace_listing_slots_refused_under_confirmed_booking() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot = seed_private_slot(&mut db, listing, "2025-06-01", 10, 12);

        let booking = Booking::builder(guest, slot, 1)
            .status(BookingStatus::Confirmed)
            .created_at(dt(9, 0))
            .build()
            .unwrap();
        Database::insert_booking(db.connection(), &booking).unwrap();

        let replacement = NewSlot::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            PriceRule::private(Decimal::new(5000, 2)).unwrap(),
        )
        .unwrap();

        let result = db.replace_listing_slots(listing, &[replacement]);
        assert!(matches!(result, Err(Error::SlotHasBookings { slot_id }) if slot_id == slot));

        // the original slot survived
        assert!(Database::get_slot(db.connection(), slot).unwrap().is_some());
    }

    #[test]
    fn test_replace_listing_slots_allowed_under_cancelled_booking() {
        let mut db = create_test_database();
        let guest = seed_user(&mut db, "guest");
        let host = seed_user(&mut db, "host");
        let listing = seed_listing(&mut db, host, false);
        let slot = seed_private_slot(&mut db, listing, "2025-06-01", 10, 12);

        let booking = Booking::builder(guest, slot, 1)
            .status(BookingStatus::Cancelled)
            .created_at(dt(9, 0))
            .build()
            .unwrap();
        Database::insert_booking(db.connection(), &booking).unwrap();

        let replacement = NewSlot::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            PriceRule::private(Decimal::new(5000, 2)).unwrap(),
        )
        .unwrap();

        let ids = db.replace_listing_slots(listing, &[replacement]).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(Database::get_slot(db.connection(), slot).unwrap().is_none());
    }

    #[test]
    fn test_entry_round_trip() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");

        let entry = ScheduleEntry::builder(host, "Dentist", dt(10, 0), dt(11, 0))
            .description(Some("Annual checkup".to_string()))
            .created_at(dt(8, 0))
            .updated_at(dt(8, 0))
            .build()
            .unwrap();
        let id = Database::insert_entry(db.connection(), &entry).unwrap();

        let stored = Database::get_entry(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.title(), "Dentist");
        assert_eq!(stored.description(), Some("Annual checkup"));
        assert_eq!(stored.start_time(), dt(10, 0));

        // host scoping
        assert!(Database::get_entry_for_host(db.connection(), id, host)
            .unwrap()
            .is_some());
        assert!(
            Database::get_entry_for_host(db.connection(), id, UserId::new(999))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_find_overlapping_entries() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");

        let entry = ScheduleEntry::builder(host, "Gym", dt(10, 0), dt(12, 0))
            .created_at(dt(8, 0))
            .updated_at(dt(8, 0))
            .build()
            .unwrap();
        let id = Database::insert_entry(db.connection(), &entry).unwrap();

        let overlapping =
            Database::find_overlapping_entries(db.connection(), host, dt(11, 0), dt(13, 0), None)
                .unwrap();
        assert_eq!(overlapping.len(), 1);

        // touching intervals do not overlap
        let touching =
            Database::find_overlapping_entries(db.connection(), host, dt(12, 0), dt(13, 0), None)
                .unwrap();
        assert!(touching.is_empty());

        // excluding the entry itself finds nothing
        let excluded = Database::find_overlapping_entries(
            db.connection(),
            host,
            dt(11, 0),
            dt(13, 0),
            Some(id),
        )
        .unwrap();
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_update_and_delete_entry() {
        let mut db = create_test_database();
        let host = seed_user(&mut db, "host");

        let entry = ScheduleEntry::builder(host, "Gym", dt(10, 0), dt(12, 0))
            .created_at(dt(8, 0))
            .updated_at(dt(8, 0))
            .build()
            .unwrap();
        let id = Database::insert_entry(db.connection(), &entry).unwrap();

        let updated = ScheduleEntry::builder(host, "Gym session", dt(14, 0), dt(15, 0))
            .id(id)
            .created_at(dt(8, 0))
            .updated_at(dt(13, 0))
            .build()
            .unwrap();
        Database::update_entry(db.connection(), &updated).unwrap();

        let stored = Database::get_entry(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.title(), "Gym session");
        assert_eq!(stored.start_time(), dt(14, 0));

        // wrong host deletes nothing
        assert!(!Database::delete_entry(db.connection(), id, UserId::new(999)).unwrap());
        assert!(Database::delete_entry(db.connection(), id, host).unwrap());
        assert!(Database::get_entry(db.connection(), id).unwrap().is_none());
    }
}
