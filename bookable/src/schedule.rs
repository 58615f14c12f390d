//! Personal schedule entries for hosts.
//!
//! Entries block out time on a host's calendar. Duration rules: an entry
//! must run at least [`MIN_ENTRY_MINUTES`] and at most [`MAX_ENTRY_HOURS`],
//! and its interval is half-open like every other interval in the library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{EntryId, UserId};
use crate::interval;

/// Minimum duration of a schedule entry, in minutes.
pub const MIN_ENTRY_MINUTES: i64 = 15;

/// Maximum duration of a schedule entry, in hours.
pub const MAX_ENTRY_HOURS: i64 = 24;

/// Validates the time window of a schedule entry.
///
/// Checks ordering first, then the minimum and maximum duration.
///
/// # Errors
///
/// Returns an error if `end <= start`, the entry is shorter than
/// [`MIN_ENTRY_MINUTES`], or longer than [`MAX_ENTRY_HOURS`].
///
/// # Examples
///
/// ```
/// use bookable::schedule::validate_entry_times;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
/// assert!(validate_entry_times(start, end).is_ok());
///
/// // ten minutes is below the minimum
/// let short_end = Utc.with_ymd_and_hms(2025, 6, 1, 10, 10, 0).unwrap();
/// assert!(validate_entry_times(start, short_end).is_err());
/// ```
pub fn validate_entry_times(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::new(
            "end_time",
            "end time must be after start time",
        ));
    }
    if !interval::at_least_minutes(start, end, MIN_ENTRY_MINUTES) {
        return Err(ValidationError::new(
            "end_time",
            format!("entry must last at least {MIN_ENTRY_MINUTES} minutes"),
        ));
    }
    if !interval::within_hours(start, end, MAX_ENTRY_HOURS) {
        return Err(ValidationError::new(
            "end_time",
            format!("entry must not last longer than {MAX_ENTRY_HOURS} hours"),
        ));
    }
    Ok(())
}

/// A personal calendar entry belonging to a host.
///
/// # Examples
///
/// ```
/// use bookable::ScheduleEntry;
/// use bookable::ids::UserId;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
///
/// let entry = ScheduleEntry::builder(UserId::new(1), "Dentist", start, end)
///     .description(Some("Annual checkup".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(entry.title(), "Dentist");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    id: Option<EntryId>,
    host_id: UserId,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScheduleEntry {
    /// Creates a new entry builder.
    #[must_use]
    pub fn builder(
        host_id: UserId,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> ScheduleEntryBuilder {
        ScheduleEntryBuilder {
            id: None,
            host_id,
            title: title.into(),
            description: None,
            start_time,
            end_time,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the row id, if the entry has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<EntryId> {
        self.id
    }

    /// Returns the owning host.
    #[must_use]
    pub const fn host_id(&self) -> UserId {
        self.host_id
    }

    /// Returns the entry title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy with the given persisted row id.
    #[must_use]
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns `true` if this entry overlaps the given half-open interval.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        interval::overlaps(self.start_time, self.end_time, start, end)
    }
}

/// Builder for creating [`ScheduleEntry`] instances.
#[derive(Debug)]
pub struct ScheduleEntryBuilder {
    id: Option<EntryId>,
    host_id: UserId,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ScheduleEntryBuilder {
    /// Sets the persisted row id.
    #[must_use]
    pub const fn id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the description. The string is trimmed; a whitespace-only
    /// description becomes `None`.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty after trimming, or the time
    /// window violates the duration rules.
    pub fn build(self) -> Result<ScheduleEntry, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::new(
                "title",
                "title must be non-empty after trimming whitespace",
            ));
        }
        validate_entry_times(self.start_time, self.end_time)?;

        let now = Utc::now();
        Ok(ScheduleEntry {
            id: self.id,
            host_id: self.host_id,
            title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}
