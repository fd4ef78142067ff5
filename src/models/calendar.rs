//! Calendar days and daily time slots.
//!
//! The allocation grid has two time axes: the outer axis is the sequence
//! of calendar days in the requested range, the middle axis is the
//! sequence of time slots within one day. Slots are generated once and
//! reused identically for every day.
//!
//! # Time Model
//! Times of day are `chrono::NaiveTime` values; slot arithmetic is done in
//! whole seconds from midnight so a slot can never wrap past midnight.
//!
//! # Lunch Exclusion
//! When a lunch break is excluded, no emitted slot overlaps the half-open
//! interval `[lunch_start, lunch_end)`. A slot that would overlap it is not
//! truncated; the cursor jumps to `lunch_end` and generation continues.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::config::hhmm;

/// A single calendar day of the grid.
pub type CalendarDay = NaiveDate;

/// A time window `[start, end)` within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (inclusive).
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Slot end (exclusive).
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a new slot.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Slot length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (seconds_of(self.end) - seconds_of(self.start)) / 60
    }

    /// Whether two half-open windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Display label, e.g. `"09:00 - 10:00"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Expands an inclusive date range into its calendar days.
///
/// Returns an empty sequence when `start > end`.
///
/// ```
/// use chrono::NaiveDate;
/// use seat_schedule::models::dates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
/// assert_eq!(dates(d(30), d(31)).len(), 2);
/// assert!(dates(d(31), d(30)).is_empty());
/// ```
pub fn dates(start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Expands a daily window into consecutive fixed-length slots.
///
/// # Algorithm
/// 1. Cursor starts at `start`.
/// 2. Candidate slot is `[cursor, cursor + duration)`; stop when its end
///    passes `end`.
/// 3. With `exclude_lunch`, a candidate overlapping `[lunch_start,
///    lunch_end)` is discarded and the cursor jumps to `lunch_end`.
/// 4. Otherwise the slot is emitted and the cursor advances to its end.
///
/// Returns an empty sequence when `duration_minutes <= 0` or
/// `start >= end`.
pub fn slots(
    start: NaiveTime,
    end: NaiveTime,
    duration_minutes: i64,
    exclude_lunch: bool,
    lunch_start: NaiveTime,
    lunch_end: NaiveTime,
) -> Vec<TimeSlot> {
    let mut out = Vec::new();
    if duration_minutes <= 0 || start >= end {
        return out;
    }
    let Some(step) = duration_minutes.checked_mul(60) else {
        return out;
    };

    let end_s = seconds_of(end);
    let lunch = (seconds_of(lunch_start), seconds_of(lunch_end));
    let mut cursor = seconds_of(start);

    loop {
        let Some(next) = cursor.checked_add(step).filter(|&n| n <= end_s) else {
            break;
        };
        if exclude_lunch && cursor < lunch.1 && next > lunch.0 {
            // cursor < lunch_end, so this always moves forward
            cursor = lunch.1;
            continue;
        }
        match (time_at(cursor), time_at(next)) {
            (Some(s), Some(e)) => out.push(TimeSlot::new(s, e)),
            _ => break,
        }
        cursor = next;
    }

    out
}

fn seconds_of(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight())
}

fn time_at(seconds: i64) -> Option<NaiveTime> {
    let secs = u32::try_from(seconds).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn labels(slots: &[TimeSlot]) -> Vec<String> {
        slots.iter().map(TimeSlot::label).collect()
    }

    #[test]
    fn test_time_slot_basics() {
        let s = TimeSlot::new(t(9, 0), t(10, 30));
        assert_eq!(s.duration_minutes(), 90);
        assert_eq!(s.label(), "09:00 - 10:30");

        let other = TimeSlot::new(t(10, 30), t(11, 0)); // touching, not overlapping
        assert!(!s.overlaps(&other));
        assert!(s.overlaps(&TimeSlot::new(t(10, 0), t(11, 0))));
    }

    #[test]
    fn test_dates_inclusive() {
        let days = dates(d(2025, 2, 27), d(2025, 3, 2));
        assert_eq!(
            days,
            vec![d(2025, 2, 27), d(2025, 2, 28), d(2025, 3, 1), d(2025, 3, 2)]
        );
    }

    #[test]
    fn test_dates_single_and_reversed() {
        assert_eq!(dates(d(2025, 1, 1), d(2025, 1, 1)), vec![d(2025, 1, 1)]);
        assert!(dates(d(2025, 1, 2), d(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_slots_plain() {
        let s = slots(t(8, 0), t(12, 0), 60, false, t(12, 0), t(13, 0));
        assert_eq!(
            labels(&s),
            vec!["08:00 - 09:00", "09:00 - 10:00", "10:00 - 11:00", "11:00 - 12:00"]
        );
    }

    #[test]
    fn test_slots_partial_tail_dropped() {
        let s = slots(t(8, 0), t(10, 30), 60, false, t(12, 0), t(13, 0));
        assert_eq!(labels(&s), vec!["08:00 - 09:00", "09:00 - 10:00"]);
    }

    #[test]
    fn test_slots_skip_lunch() {
        let s = slots(t(9, 0), t(16, 0), 120, true, t(12, 0), t(13, 0));
        // 09-11 fits, 11-13 overlaps lunch → jump to 13:00, 13-15 fits, 15-17 too long
        assert_eq!(labels(&s), vec!["09:00 - 11:00", "13:00 - 15:00"]);
    }

    #[test]
    fn test_slots_lunch_ignored_when_not_excluded() {
        let s = slots(t(9, 0), t(16, 0), 120, false, t(12, 0), t(13, 0));
        assert_eq!(labels(&s), vec!["09:00 - 11:00", "11:00 - 13:00", "13:00 - 15:00"]);
    }

    #[test]
    fn test_slots_lunch_window_swallows_everything() {
        // 11:30-12:30 overlaps lunch; 13:00-14:00 passes the 13:30 end
        let s = slots(t(11, 30), t(13, 30), 60, true, t(12, 0), t(13, 0));
        assert!(s.is_empty());
    }

    #[test]
    fn test_slots_never_overlap_lunch() {
        let lunch = TimeSlot::new(t(12, 15), t(13, 5));
        for minutes in [15, 20, 30, 45, 50, 60, 90] {
            let s = slots(t(7, 0), t(18, 0), minutes, true, lunch.start, lunch.end);
            assert!(!s.is_empty());
            assert!(s.iter().all(|slot| !slot.overlaps(&lunch)), "{minutes}");
            assert!(s.iter().all(|slot| slot.duration_minutes() == minutes));
        }
    }

    #[test]
    fn test_slots_invalid_inputs() {
        assert!(slots(t(9, 0), t(17, 0), 0, false, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(9, 0), t(17, 0), -30, false, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(17, 0), t(9, 0), 60, false, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(9, 0), t(9, 0), 60, false, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(9, 0), t(17, 0), i64::MAX, false, t(12, 0), t(13, 0)).is_empty());
    }

    #[test]
    fn test_slots_huge_duration_is_empty() {
        // step fits in i64 but cursor + step does not
        let minutes = i64::MAX / 60;
        assert!(slots(t(9, 0), t(17, 0), minutes, false, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(9, 0), t(17, 0), minutes, true, t(12, 0), t(13, 0)).is_empty());
        assert!(slots(t(0, 0), t(23, 59), 24 * 60, false, t(12, 0), t(13, 0)).is_empty());
    }

    #[test]
    fn test_slots_late_evening_end() {
        let s = slots(t(22, 0), t(23, 59), 60, false, t(12, 0), t(13, 0));
        assert_eq!(labels(&s), vec!["22:00 - 23:00"]);
    }
}
