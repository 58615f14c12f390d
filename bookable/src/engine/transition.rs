//! Booking status transitions.
//!
//! Only the host who owns the booked listing may decide a booking, and only
//! a pending booking can be decided. The load, the ownership check, the
//! legality check, and the update share one IMMEDIATE transaction, so two
//! racing decisions cannot both apply: the loser reloads a terminal status
//! and fails the legality check.

use crate::booking::{Booking, BookingStatus};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{BookingId, UserId};

/// Moves a booking to `target`, enforcing host ownership and the status
/// lifecycle.
///
/// # Errors
///
/// - [`Error::NotFound`] if the booking (or its slot or listing) does not
///   exist
/// - [`Error::NotAuthorized`] if `acting_host_id` does not own the booked
///   listing
/// - [`Error::InvalidStateTransition`] if the booking is not pending or
///   `target` is not a legal successor
/// - [`Error::LockTimeout`] if the write lock could not be taken in time
pub fn transition_booking(
    db: &mut Database,
    booking_id: BookingId,
    acting_host_id: UserId,
    target: BookingStatus,
) -> Result<Booking> {
    let tx = db.begin_immediate()?;

    let booking = Database::get_booking(&tx, booking_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("booking {booking_id}"),
    })?;
    let slot = Database::get_slot(&tx, booking.slot_id())?.ok_or_else(|| Error::NotFound {
        resource: format!("slot {}", booking.slot_id()),
    })?;

    if slot.host_id != acting_host_id {
        return Err(Error::NotAuthorized {
            details: format!(
                "user {acting_host_id} does not own the listing of booking {booking_id}"
            ),
        });
    }

    if !booking.status().can_transition_to(target) {
        return Err(Error::InvalidStateTransition {
            from: booking.status(),
            to: target,
        });
    }

    Database::update_booking_status(&tx, booking_id, target)?;
    tx.commit()?;

    Ok(booking.with_status(target))
}

/// Approves a pending booking, confirming its seats.
///
/// # Errors
///
/// See [`transition_booking`].
pub fn approve_booking(
    db: &mut Database,
    booking_id: BookingId,
    acting_host_id: UserId,
) -> Result<Booking> {
    transition_booking(db, booking_id, acting_host_id, BookingStatus::Confirmed)
}

/// Rejects a pending booking, freeing its seats.
///
/// # Errors
///
/// See [`transition_booking`].
pub fn reject_booking(
    db: &mut Database,
    booking_id: BookingId,
    acting_host_id: UserId,
) -> Result<Booking> {
    transition_booking(db, booking_id, acting_host_id, BookingStatus::Cancelled)
}
