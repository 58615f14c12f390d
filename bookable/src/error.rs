//! Error types for the bookable library.
//!
//! This module provides the error hierarchy for all operations in the
//! bookable library, using `thiserror` for ergonomic error handling.
//! Business-rule failures (capacity, conflicts, authorization) are ordinary
//! recoverable values; only storage failures are infrastructure errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::booking::BookingStatus;
use crate::ids::SlotId;

/// Result type alias for operations that may fail with a bookable error.
///
/// # Examples
///
/// ```
/// use bookable::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bookable library.
///
/// This enum encompasses all expected failure modes of the reservation
/// engine and the schedule conflict checker, plus the infrastructure
/// errors of the underlying store.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A booking request would exceed the slot's guest capacity.
    #[error(
        "capacity exceeded for slot {slot_id}: capacity {capacity}, \
         {booked} booked, {requested} requested"
    )]
    CapacityExceeded {
        /// The slot that is full.
        slot_id: SlotId,
        /// The slot's total guest capacity.
        capacity: u32,
        /// Guests already confirmed against the slot.
        booked: u32,
        /// Guests requested by the rejected booking.
        requested: u32,
    },

    /// A proposed schedule interval overlaps an existing entry or slot.
    #[error("schedule conflict: {details}")]
    ScheduleConflict {
        /// Description of the conflicting entry or slot.
        details: String,
    },

    /// The acting user does not own the resource being modified.
    #[error("not authorized: {details}")]
    NotAuthorized {
        /// Description of the denied action.
        details: String,
    },

    /// An illegal booking status transition was attempted.
    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition {
        /// The booking's current status.
        from: BookingStatus,
        /// The requested target status.
        to: BookingStatus,
    },

    /// A slot with confirmed bookings cannot be replaced or deleted.
    #[error("slot {slot_id} has confirmed bookings and cannot be replaced")]
    SlotHasBookings {
        /// The slot that is pinned by live bookings.
        slot_id: SlotId,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for domain-level field validation failures.
///
/// Produced by the domain type builders; converted into
/// [`Error::Validation`] at the library boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookable::Error;
    ///
    /// let err = Error::NotFound { resource: "slot 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a capacity rejection.
    #[must_use]
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }

    /// Check if error is a schedule conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ScheduleConflict { .. })
    }

    /// Check if error indicates the caller lost a lock race and may retry.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        matches!(self, Self::LockTimeout { .. })
    }
}
