//! Personal schedule conflict checking and entry management.
//!
//! A host's time is claimed by two kinds of things: their personal schedule
//! entries and the bookable slots of their listings. A new or moved entry
//! must not overlap either. Every mutation wraps the conflict search and the
//! write in one IMMEDIATE transaction, so two racing entries for the same
//! window cannot both commit.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{EntryId, UserId};
use crate::interval;
use crate::schedule::{validate_entry_times, ScheduleEntry};

/// Finds the first thing on the host's calendar overlapping `[start, end)`.
///
/// Checks personal entries first, then the host's bookable slots. The
/// optional exclusion only applies to the personal-entry search (an entry
/// being moved must not conflict with itself).
fn find_conflict(
    conn: &Connection,
    host_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<EntryId>,
) -> Result<Option<String>> {
    let entries = Database::find_overlapping_entries(conn, host_id, start, end, exclude)?;
    if let Some(entry) = entries.first() {
        return Ok(Some(format!("overlaps entry '{}'", entry.title())));
    }

    // Slot windows are naive date + time-of-day; interpret them as UTC, the
    // same convention the entries use.
    let slots = Database::list_slots_by_host_and_date_range(
        conn,
        host_id,
        start.date_naive(),
        end.date_naive(),
    )?;
    for slot in &slots {
        let slot_start = slot.date.and_time(slot.start_time).and_utc();
        let slot_end = slot.date.and_time(slot.end_time).and_utc();
        if interval::overlaps(slot_start, slot_end, start, end) {
            return Ok(Some(format!(
                "overlaps bookable slot {} on {}",
                slot.id, slot.date
            )));
        }
    }

    Ok(None)
}

/// Validates a window for a brand-new entry.
///
/// Duration rules are checked first, then overlap against the host's
/// personal entries and bookable slots.
///
/// # Errors
///
/// - [`Error::Validation`] if the window violates the duration rules
/// - [`Error::ScheduleConflict`] naming the conflicting item
pub fn validate_new_entry(
    conn: &Connection,
    host_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<()> {
    validate_entry_times(start, end)?;
    match find_conflict(conn, host_id, start, end, None)? {
        Some(details) => Err(Error::ScheduleConflict { details }),
        None => Ok(()),
    }
}

/// Validates a window for moving an existing entry.
///
/// Identical to [`validate_new_entry`] except the entry being moved is
/// excluded from the personal-entry search.
///
/// # Errors
///
/// See [`validate_new_entry`].
pub fn validate_updated_entry(
    conn: &Connection,
    host_id: UserId,
    entry_id: EntryId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<()> {
    validate_entry_times(start, end)?;
    match find_conflict(conn, host_id, start, end, Some(entry_id))? {
        Some(details) => Err(Error::ScheduleConflict { details }),
        None => Ok(()),
    }
}

/// Reports whether the host's calendar is free over `[start, end)`.
///
/// Non-throwing variant of the overlap check: duration rules are not
/// applied, only occupancy.
///
/// # Errors
///
/// Returns an error only if the underlying queries fail.
pub fn is_time_slot_free(
    conn: &Connection,
    host_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<bool> {
    Ok(find_conflict(conn, host_id, start, end, None)?.is_none())
}

/// Creates a schedule entry after checking the window is valid and free.
///
/// `now` becomes both the creation and modification timestamp.
///
/// # Errors
///
/// - [`Error::NotFound`] if the host does not exist
/// - [`Error::Validation`] for duration or title violations
/// - [`Error::ScheduleConflict`] if the window is occupied
/// - [`Error::LockTimeout`] if the write lock could not be taken in time
pub fn create_entry(
    db: &mut Database,
    host_id: UserId,
    title: &str,
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ScheduleEntry> {
    let tx = db.begin_immediate()?;

    if !Database::user_exists(&tx, host_id)? {
        return Err(Error::NotFound {
            resource: format!("user {host_id}"),
        });
    }

    validate_new_entry(&tx, host_id, start, end)?;

    let entry = ScheduleEntry::builder(host_id, title, start, end)
        .description(description)
        .created_at(now)
        .updated_at(now)
        .build()?;
    let id = Database::insert_entry(&tx, &entry)?;
    tx.commit()?;

    Ok(entry.with_id(id))
}

/// Moves or retitles an existing entry after re-checking its window.
///
/// The entry must belong to `host_id`; the conflict search excludes the
/// entry itself so an unmoved window never conflicts with itself.
///
/// # Errors
///
/// - [`Error::NotFound`] if no entry with that id belongs to the host
/// - [`Error::Validation`] for duration or title violations
/// - [`Error::ScheduleConflict`] if the new window is occupied
/// - [`Error::LockTimeout`] if the write lock could not be taken in time
#[allow(clippy::too_many_arguments)]
pub fn update_entry(
    db: &mut Database,
    host_id: UserId,
    entry_id: EntryId,
    title: &str,
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ScheduleEntry> {
    let tx = db.begin_immediate()?;

    let existing =
        Database::get_entry_for_host(&tx, entry_id, host_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("schedule entry {entry_id}"),
        })?;

    validate_updated_entry(&tx, host_id, entry_id, start, end)?;

    let updated = ScheduleEntry::builder(host_id, title, start, end)
        .id(entry_id)
        .description(description)
        .created_at(existing.created_at())
        .updated_at(now)
        .build()?;
    Database::update_entry(&tx, &updated)?;
    tx.commit()?;

    Ok(updated)
}

/// Deletes an entry belonging to the host.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no entry with that id belongs to the
/// host; deleting someone else's entry is indistinguishable from deleting
/// a missing one.
pub fn delete_entry(db: &mut Database, host_id: UserId, entry_id: EntryId) -> Result<()> {
    let tx = db.begin_immediate()?;
    if !Database::delete_entry(&tx, entry_id, host_id)? {
        return Err(Error::NotFound {
            resource: format!("schedule entry {entry_id}"),
        });
    }
    tx.commit()?;
    Ok(())
}
