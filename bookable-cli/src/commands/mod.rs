//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `add_user`: Register a user
//! - `add_listing`: Create a listing owned by a host
//! - `add_slot`: Add a bookable slot to a listing
//! - `book`: Book seats on a slot
//! - `approve`: Approve a pending booking
//! - `reject`: Reject a pending booking
//! - `bookings`: List a user's bookings
//! - `pending`: List pending bookings awaiting a host's decision
//! - `schedule`: Manage a host's personal schedule
//! - `free`: Check whether a host's time window is free

pub mod add_listing;
pub mod add_slot;
pub mod add_user;
pub mod approve;
pub mod book;
pub mod bookings;
pub mod free;
pub mod init;
pub mod pending;
pub mod reject;
pub mod schedule;

pub use add_listing::AddListingCommand;
pub use add_slot::AddSlotCommand;
pub use add_user::AddUserCommand;
pub use approve::ApproveCommand;
pub use book::BookCommand;
pub use bookings::BookingsCommand;
pub use free::FreeCommand;
pub use init::InitCommand;
pub use pending::PendingCommand;
pub use reject::RejectCommand;
pub use schedule::ScheduleCommand;
