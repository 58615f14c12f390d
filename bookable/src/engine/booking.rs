//! Booking creation and listing.
//!
//! The capacity invariant lives here: the sum of confirmed guests on a slot
//! never exceeds the slot's capacity. The load, the sum, the check, and the
//! insert all run inside one IMMEDIATE transaction, so two racing requests
//! for the last seats cannot both commit.

use chrono::{DateTime, Utc};

use crate::booking::{Booking, BookingStatus};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{SlotId, UserId};

/// A request to book seats on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    /// The slot to book.
    pub slot_id: SlotId,
    /// The guest making the booking.
    pub user_id: UserId,
    /// Party size; must be at least 1.
    pub guests: u32,
}

/// Creates a booking, enforcing the slot's capacity.
///
/// The whole read-check-write runs inside one IMMEDIATE transaction:
/// load the slot, sum the already-confirmed guests, reject if the party
/// would overflow the capacity, price the party from the slot's rule,
/// insert. On any failure nothing is written.
///
/// The initial status depends on the owning listing: bookings of a
/// moderated listing start as [`BookingStatus::Pending`] and await host
/// approval; otherwise they are confirmed immediately.
///
/// `now` is the caller's clock and becomes the booking's creation
/// timestamp.
///
/// # Errors
///
/// - [`Error::Validation`] if `guests` is zero
/// - [`Error::NotFound`] if the user or the slot does not exist
/// - [`Error::CapacityExceeded`] if confirmed guests plus the party would
///   exceed the slot's capacity
/// - [`Error::LockTimeout`] if the write lock could not be taken in time
pub fn create_booking(
    db: &mut Database,
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> Result<Booking> {
    if request.guests == 0 {
        return Err(Error::Validation {
            field: "guests".into(),
            message: "party must have at least 1 guest".into(),
        });
    }

    let tx = db.begin_immediate()?;

    if !Database::user_exists(&tx, request.user_id)? {
        return Err(Error::NotFound {
            resource: format!("user {}", request.user_id),
        });
    }

    let slot = Database::get_slot(&tx, request.slot_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("slot {}", request.slot_id),
    })?;
    let listing = Database::get_listing(&tx, slot.listing_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("listing {}", slot.listing_id),
    })?;

    let booked = Database::confirmed_guests_for_slot(&tx, request.slot_id)?;
    let capacity = slot.capacity();
    // a party large enough to overflow the sum can never fit either
    let would_be = booked.checked_add(request.guests);
    if would_be.map_or(true, |total| total > capacity) {
        return Err(Error::CapacityExceeded {
            slot_id: request.slot_id,
            capacity,
            booked,
            requested: request.guests,
        });
    }

    let status = if listing.moderated {
        BookingStatus::Pending
    } else {
        BookingStatus::Confirmed
    };

    let booking = Booking::builder(request.user_id, request.slot_id, request.guests)
        .total_price(slot.price_for(request.guests))
        .status(status)
        .created_at(now)
        .build()?;

    let id = Database::insert_booking(&tx, &booking)?;
    tx.commit()?;

    Ok(booking.with_id(id))
}

/// Lists a user's bookings, newest first.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the user does not exist.
pub fn list_bookings_for_user(db: &Database, user_id: UserId) -> Result<Vec<Booking>> {
    let conn = db.connection();
    if !Database::user_exists(conn, user_id)? {
        return Err(Error::NotFound {
            resource: format!("user {user_id}"),
        });
    }
    Database::list_bookings_by_user(conn, user_id)
}

/// Lists the pending bookings awaiting a host's decision, newest first.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the host does not exist.
pub fn list_pending_bookings_for_host(db: &Database, host_id: UserId) -> Result<Vec<Booking>> {
    let conn = db.connection();
    if !Database::user_exists(conn, host_id)? {
        return Err(Error::NotFound {
            resource: format!("user {host_id}"),
        });
    }
    Database::list_bookings_by_host_and_status(conn, host_id, BookingStatus::Pending)
}
