//! The reservation engine and schedule conflict checker.
//!
//! Every operation in this module is a read-check-write unit: it takes the
//! store's write lock up front (an IMMEDIATE transaction), performs its
//! reads and checks against that consistent snapshot, and either commits
//! the write or leaves the store untouched.

pub mod booking;
pub mod schedule;
pub mod transition;

pub use booking::{
    create_booking, list_bookings_for_user, list_pending_bookings_for_host, BookingRequest,
};
pub use schedule::{
    create_entry, delete_entry, is_time_slot_free, update_entry, validate_new_entry,
    validate_updated_entry,
};
pub use transition::{approve_booking, reject_booking, transition_booking};
