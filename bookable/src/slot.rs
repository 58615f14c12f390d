//! Listings and bookable time slots.
//!
//! A listing is the host-owned offer; a slot is one concrete window of that
//! offer on a given date. Pricing is a tagged variant so that invalid
//! combinations (a "group" slot with room for one guest) are unrepresentable.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{ListingId, SlotId, UserId};
use crate::interval;

/// Pricing mode of a slot.
///
/// # Examples
///
/// ```
/// use bookable::PriceRule;
/// use rust_decimal::Decimal;
///
/// let private = PriceRule::private(Decimal::new(12000, 2)).unwrap();
/// assert_eq!(private.capacity(), 1);
/// assert_eq!(private.price_for(1), Decimal::new(12000, 2));
///
/// let group = PriceRule::group(Decimal::new(2500, 2), 8).unwrap();
/// assert_eq!(group.capacity(), 8);
/// assert_eq!(group.price_for(3), Decimal::new(7500, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PriceRule {
    /// A one-guest slot sold at a flat price.
    Private {
        /// Flat price for the whole slot.
        price: Decimal,
    },
    /// A shared slot sold per guest, up to `capacity` guests.
    Group {
        /// Price charged per guest.
        per_guest: Decimal,
        /// Maximum number of guests across all bookings of the slot.
        capacity: u32,
    },
}

impl PriceRule {
    /// Creates a private (single-guest, flat price) rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is negative.
    pub fn private(price: Decimal) -> Result<Self, ValidationError> {
        if price.is_sign_negative() {
            return Err(ValidationError::new("price", "price must not be negative"));
        }
        Ok(Self::Private { price })
    }

    /// Creates a group (per-guest price) rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the per-guest price is negative or the capacity
    /// is below 2. A one-guest slot must be expressed as
    /// [`PriceRule::private`].
    pub fn group(per_guest: Decimal, capacity: u32) -> Result<Self, ValidationError> {
        if per_guest.is_sign_negative() {
            return Err(ValidationError::new(
                "per_guest",
                "per-guest price must not be negative",
            ));
        }
        if capacity < 2 {
            return Err(ValidationError::new(
                "capacity",
                "group capacity must be at least 2",
            ));
        }
        Ok(Self::Group {
            per_guest,
            capacity,
        })
    }

    /// Returns the guest capacity implied by the rule.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        match self {
            Self::Private { .. } => 1,
            Self::Group { capacity, .. } => *capacity,
        }
    }

    /// Computes the total price for a party of `guests`.
    ///
    /// A private slot costs its flat price regardless of the (single) guest;
    /// a group slot scales linearly with the party size.
    #[must_use]
    pub fn price_for(&self, guests: u32) -> Decimal {
        match self {
            Self::Private { price } => *price,
            Self::Group { per_guest, .. } => *per_guest * Decimal::from(guests),
        }
    }

    /// Returns `true` for the single-guest variant.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private { .. })
    }
}

/// A host-owned listing that slots hang off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Row id of the listing.
    pub id: ListingId,
    /// The host who owns the listing.
    pub host_id: UserId,
    /// Display title.
    pub title: String,
    /// When `true`, new bookings start as pending and await host approval.
    pub moderated: bool,
}

impl Listing {
    /// Validates a listing title, returning the trimmed form.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty after trimming whitespace.
    pub fn validate_title(title: &str) -> Result<String, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "title",
                "title must be non-empty after trimming whitespace",
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// One bookable time window of a listing.
///
/// The window is half-open on a single date: the slot occupies
/// `[start_time, end_time)` and touching windows do not collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Row id of the slot.
    pub id: SlotId,
    /// The listing this slot belongs to.
    pub listing_id: ListingId,
    /// The host who owns the listing (derived from the listing at load).
    pub host_id: UserId,
    /// Calendar date of the window.
    pub date: NaiveDate,
    /// Inclusive start of the window.
    pub start_time: NaiveTime,
    /// Exclusive end of the window.
    pub end_time: NaiveTime,
    /// Pricing mode, which also fixes the guest capacity.
    pub price_rule: PriceRule,
}

impl Slot {
    /// Validates a slot window.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_time >= end_time`.
    pub fn validate_window(
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<(), ValidationError> {
        if start_time >= end_time {
            return Err(ValidationError::new(
                "end_time",
                "end time must be after start time",
            ));
        }
        Ok(())
    }

    /// Returns the guest capacity of the slot.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.price_rule.capacity()
    }

    /// Computes the total price for a party of `guests`.
    #[must_use]
    pub fn price_for(&self, guests: u32) -> Decimal {
        self.price_rule.price_for(guests)
    }

    /// Returns `true` if this slot's window overlaps the given window on the
    /// same date.
    #[must_use]
    pub fn overlaps_window(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && interval::overlaps(self.start_time, self.end_time, start, end)
    }
}

/// A slot window waiting to be persisted.
///
/// Carries everything but the row id and the owning listing; the store
/// assigns both at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    /// Calendar date of the window.
    pub date: NaiveDate,
    /// Inclusive start of the window.
    pub start_time: NaiveTime,
    /// Exclusive end of the window.
    pub end_time: NaiveTime,
    /// Pricing mode, which also fixes the guest capacity.
    pub price_rule: PriceRule,
}

impl NewSlot {
    /// Creates a validated slot window.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_time >= end_time`.
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        price_rule: PriceRule,
    ) -> Result<Self, ValidationError> {
        Slot::validate_window(start_time, end_time)?;
        Ok(Self {
            date,
            start_time,
            end_time,
            price_rule,
        })
    }
}
