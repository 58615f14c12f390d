#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # bookable
//!
//! A reservation engine for marketplace bookings and host schedules.
//!
//! This library provides capacity-safe booking of listed time slots, a
//! host-moderated booking lifecycle, and a personal schedule conflict
//! checker, backed by an embedded SQLite store. Every read-check-write
//! unit runs inside one IMMEDIATE transaction, so concurrent requests
//! cannot oversell a slot or double-book a calendar.
//!
//! ## Core Types
//!
//! - [`Slot`], [`PriceRule`], and [`Listing`]: what hosts offer
//! - [`Booking`] and [`BookingStatus`]: guest reservations and their
//!   lifecycle
//! - [`ScheduleEntry`]: a host's personal calendar
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use bookable::database::{Database, DatabaseConfig};
//! use bookable::engine::{create_booking, BookingRequest};
//! use bookable::ids::{SlotId, UserId};
//! use chrono::Utc;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/bookable.db")).unwrap();
//!
//! let booking = create_booking(
//!     &mut db,
//!     &BookingRequest {
//!         slot_id: SlotId::new(1),
//!         user_id: UserId::new(2),
//!         guests: 3,
//!     },
//!     Utc::now(),
//! )
//! .unwrap();
//! println!("booked for {}", booking.total_price());
//! ```

pub mod booking;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod ids;
pub mod interval;
pub mod logging;
pub mod schedule;
pub mod slot;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingStatus};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result, ValidationError};
pub use logging::{init_logger, LogLevel, Logger};
pub use schedule::{ScheduleEntry, MAX_ENTRY_HOURS, MIN_ENTRY_MINUTES};
pub use slot::{Listing, NewSlot, PriceRule, Slot};
