//! Date-range arithmetic for bookings and shooting schedules

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A half-open time window `[start, end)`.
///
/// Two windows conflict when they share any instant; windows that merely
/// touch (`end == other.start`) do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Range spanning `start_days..end_days` whole days from `origin`.
    pub fn from_day_offsets(origin: DateTime<Utc>, start_days: i64, end_days: i64) -> Result<Self> {
        Self::new(
            origin + Duration::days(start_days),
            origin + Duration::days(end_days),
        )
    }

    /// Whether this window shares any instant with `other`.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same window moved by a whole number of days.
    pub fn shifted_days(&self, days: i64) -> DateRange {
        DateRange {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    #[test_case(range(1, 3), range(2, 4), true; "partial overlap")]
    #[test_case(range(1, 5), range(2, 3), true; "nested")]
    #[test_case(range(1, 3), range(1, 3), true; "identical")]
    #[test_case(range(1, 3), range(3, 5), false; "touching endpoints")]
    #[test_case(range(1, 2), range(4, 6), false; "disjoint")]
    fn overlap_cases(a: DateRange, b: DateRange, expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected, "overlap must be symmetric");
    }

    #[test]
    fn empty_range_never_overlaps() {
        let empty = range(2, 2);
        assert!(empty.is_empty());
        assert!(!empty.overlaps(&range(1, 4)));
        assert!(!range(1, 4).overlaps(&empty));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(DateRange::new(day(5), day(2)).is_err());
    }

    #[test]
    fn shifting_past_a_window_clears_the_conflict() {
        let booked = range(1, 3);
        assert!(booked.shifted_days(1).overlaps(&booked));
        assert!(!booked.shifted_days(4).overlaps(&booked));
    }

    #[test]
    fn day_offsets_from_origin() {
        let origin = day(1);
        let r = DateRange::from_day_offsets(origin, 1, 3).unwrap();
        assert_eq!(r.start, day(2));
        assert_eq!(r.end, day(4));
    }
}
