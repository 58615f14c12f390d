//! Bookings and their status lifecycle.

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{BookingId, SlotId, UserId};

/// Lifecycle status of a booking.
///
/// `Pending` may move to `Confirmed` or `Cancelled`; both of those are
/// terminal. The transition table lives in [`BookingStatus::can_transition_to`]
/// so illegal moves are rejected in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting host approval on a moderated listing.
    Pending,
    /// Counts against the slot's capacity.
    Confirmed,
    /// Rejected or withdrawn; frees its seats.
    Cancelled,
}

impl BookingStatus {
    /// Returns the canonical lowercase name used in storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its canonical name.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unrecognized value.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::new(
                "status",
                format!("unknown booking status '{other}'"),
            )),
        }
    }

    /// Returns `true` if a booking may move from `self` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookable::BookingStatus;
    ///
    /// assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
    /// assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
    /// assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
    /// assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed));
    /// ```
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed) | (Self::Pending, Self::Cancelled)
        )
    }

    /// Returns `true` if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl ToSql for BookingStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BookingStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A guest's booking of a slot.
///
/// # Examples
///
/// ```
/// use bookable::{Booking, BookingStatus};
/// use bookable::ids::{BookingId, SlotId, UserId};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let booking = Booking::builder(UserId::new(1), SlotId::new(2), 3)
///     .total_price(Decimal::new(7500, 2))
///     .status(BookingStatus::Confirmed)
///     .created_at(Utc::now())
///     .build()
///     .unwrap();
///
/// assert_eq!(booking.guests(), 3);
/// assert_eq!(booking.status(), BookingStatus::Confirmed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: Option<BookingId>,
    user_id: UserId,
    slot_id: SlotId,
    guests: u32,
    total_price: Decimal,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new booking builder.
    #[must_use]
    pub fn builder(user_id: UserId, slot_id: SlotId, guests: u32) -> BookingBuilder {
        BookingBuilder {
            id: None,
            user_id,
            slot_id,
            guests,
            total_price: Decimal::ZERO,
            status: BookingStatus::Pending,
            created_at: None,
        }
    }

    /// Returns the row id, if the booking has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<BookingId> {
        self.id
    }

    /// Returns the booking guest.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the booked slot.
    #[must_use]
    pub const fn slot_id(&self) -> SlotId {
        self.slot_id
    }

    /// Returns the party size.
    #[must_use]
    pub const fn guests(&self) -> u32 {
        self.guests
    }

    /// Returns the total price charged for the party.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy with the given persisted row id.
    #[must_use]
    pub const fn with_id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with the given status. Does not check legality; use
    /// [`BookingStatus::can_transition_to`] before persisting.
    #[must_use]
    pub const fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }
}

/// Builder for creating [`Booking`] instances.
#[derive(Debug)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    user_id: UserId,
    slot_id: SlotId,
    guests: u32,
    total_price: Decimal,
    status: BookingStatus,
    created_at: Option<DateTime<Utc>>,
}

impl BookingBuilder {
    /// Sets the persisted row id.
    #[must_use]
    pub const fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the total price.
    #[must_use]
    pub const fn total_price(mut self, total_price: Decimal) -> Self {
        self.total_price = total_price;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp. Callers that need a deterministic clock
    /// (tests, replays) must set this; otherwise the wall clock is used.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the party size is zero or the total price is
    /// negative.
    pub fn build(self) -> Result<Booking, ValidationError> {
        if self.guests == 0 {
            return Err(ValidationError::new("guests", "party must have at least 1 guest"));
        }
        if self.total_price.is_sign_negative() {
            return Err(ValidationError::new(
                "total_price",
                "total price must not be negative",
            ));
        }
        Ok(Booking {
            id: self.id,
            user_id: self.user_id,
            slot_id: self.slot_id,
            guests: self.guests,
            total_price: self.total_price,
            status: self.status,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
