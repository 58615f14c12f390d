//! Pure time-interval utilities.
//!
//! All intervals in the library are half-open: an interval owns its start
//! instant but not its end instant, so two intervals that merely touch
//! (`end_a == start_b`) do not overlap. These functions have no side
//! effects and no failure modes.

use chrono::{DateTime, Duration, Utc};

/// Returns `true` if two half-open intervals overlap.
///
/// Two intervals overlap iff `start_a < end_b && start_b < end_a`.
/// Touching endpoints do not count as overlap.
///
/// # Examples
///
/// ```
/// use bookable::interval::overlaps;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // 10:00-12:00 vs 11:00-13:00 overlap
/// assert!(overlaps(t(10, 0), t(12, 0), t(11, 0), t(13, 0)));
///
/// // 10:00-12:00 vs 12:00-14:00 merely touch
/// assert!(!overlaps(t(10, 0), t(12, 0), t(12, 0), t(14, 0)));
/// ```
#[must_use]
pub fn overlaps<T: PartialOrd>(start_a: T, end_a: T, start_b: T, end_b: T) -> bool {
    start_a < end_b && start_b < end_a
}

/// Returns `true` if the interval lasts no longer than `max_hours`.
///
/// An interval with `end <= start` is never within bounds; backwards
/// intervals are rejected by the duration validators rather than wrapped.
#[must_use]
pub fn within_hours(start: DateTime<Utc>, end: DateTime<Utc>, max_hours: i64) -> bool {
    let duration = end.signed_duration_since(start);
    duration > Duration::zero() && duration <= Duration::hours(max_hours)
}

/// Returns `true` if the interval lasts at least `min_minutes`.
#[must_use]
pub fn at_least_minutes(start: DateTime<Utc>, end: DateTime<Utc>, min_minutes: i64) -> bool {
    end.signed_duration_since(start) >= Duration::minutes(min_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_overlapping_intervals() {
        assert!(overlaps(t(10, 0), t(12, 0), t(11, 0), t(13, 0)));
        assert!(overlaps(t(11, 0), t(13, 0), t(10, 0), t(12, 0)));
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        assert!(!overlaps(t(10, 0), t(12, 0), t(12, 0), t(14, 0)));
        assert!(!overlaps(t(12, 0), t(14, 0), t(10, 0), t(12, 0)));
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!overlaps(t(10, 0), t(12, 0), t(9, 0), t(9, 30)));
    }

    #[test]
    fn test_containment_is_overlap() {
        assert!(overlaps(t(10, 0), t(14, 0), t(11, 0), t(12, 0)));
        assert!(overlaps(t(11, 0), t(12, 0), t(10, 0), t(14, 0)));
    }

    #[test]
    fn test_overlap_with_datetimes() {
        assert!(overlaps(dt(10, 0), dt(12, 0), dt(11, 30), dt(12, 30)));
        assert!(!overlaps(dt(10, 0), dt(12, 0), dt(12, 0), dt(13, 0)));
    }

    #[test]
    fn test_within_hours() {
        assert!(within_hours(dt(10, 0), dt(12, 0), 24));
        assert!(within_hours(dt(10, 0), dt(10, 15), 1));
        // 25-hour span exceeds a 24-hour bound
        let next_day = dt(10, 0) + Duration::hours(25);
        assert!(!within_hours(dt(10, 0), next_day, 24));
        // empty and backwards intervals are out of bounds
        assert!(!within_hours(dt(10, 0), dt(10, 0), 24));
        assert!(!within_hours(dt(12, 0), dt(10, 0), 24));
    }

    #[test]
    fn test_at_least_minutes() {
        assert!(at_least_minutes(dt(10, 0), dt(10, 15), 15));
        assert!(!at_least_minutes(dt(10, 0), dt(10, 10), 15));
        assert!(at_least_minutes(dt(10, 0), dt(12, 0), 15));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn minute_strategy() -> impl Strategy<Value = NaiveTime> {
            (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
        }

        proptest! {
            // prop_assume-heavy tests below discard most generated inputs;
            // the default global reject budget (1024) is too small for them.
            #![proptest_config(ProptestConfig {
                max_global_rejects: 65536,
                ..ProptestConfig::default()
            })]

            // PROPERTY: overlap is symmetric in its two intervals
            #[test]
            fn prop_overlap_symmetric(
                a in minute_strategy(), b in minute_strategy(),
                c in minute_strategy(), d in minute_strategy(),
            ) {
                prop_assume!(a < b && c < d);
                prop_assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b));
            }

            // PROPERTY: a non-empty interval always overlaps itself
            #[test]
            fn prop_self_overlap(a in minute_strategy(), b in minute_strategy()) {
                prop_assume!(a < b);
                prop_assert!(overlaps(a, b, a, b));
            }

            // PROPERTY: adjacent intervals sharing only an endpoint never overlap
            #[test]
            fn prop_touching_never_overlaps(
                a in minute_strategy(), b in minute_strategy(), c in minute_strategy(),
            ) {
                prop_assume!(a < b && b < c);
                prop_assert!(!overlaps(a, b, b, c));
            }
        }
    }
}
