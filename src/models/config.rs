//! Scheduling run configuration.
//!
//! Describes the date range, the daily window, batch length and the
//! accessibility/lunch options of one allocation run. Deserializes from
//! the camelCase JSON used by request payloads.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::calendar::{self, CalendarDay, TimeSlot};
use crate::error::{Result, ScheduleError};

/// Configuration of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// First calendar day (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day (inclusive).
    pub end_date: NaiveDate,
    /// Daily window start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Daily window end.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Length of each batch slot.
    #[serde(alias = "durationPerBatch")]
    pub duration_minutes_per_batch: i64,
    /// Seat accessibility participants in accessible rooms first.
    #[serde(default = "default_true", alias = "prioritizePwd")]
    pub prioritize_accessibility: bool,
    /// Keep slots clear of the lunch window.
    #[serde(default)]
    pub exclude_lunch_break: bool,
    /// Lunch window start.
    #[serde(with = "hhmm", default = "default_lunch_start")]
    pub lunch_break_start: NaiveTime,
    /// Lunch window end.
    #[serde(with = "hhmm", default = "default_lunch_end")]
    pub lunch_break_end: NaiveTime,
}

fn default_true() -> bool {
    true
}

fn default_lunch_start() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

fn default_lunch_end() -> NaiveTime {
    NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default()
}

impl ScheduleConfig {
    /// Creates a configuration spanning a date range.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration_minutes_per_batch: i64,
    ) -> Self {
        Self {
            start_date,
            end_date,
            start_time,
            end_time,
            duration_minutes_per_batch,
            prioritize_accessibility: true,
            exclude_lunch_break: false,
            lunch_break_start: default_lunch_start(),
            lunch_break_end: default_lunch_end(),
        }
    }

    /// Creates a configuration for a single day.
    pub fn single_day(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration_minutes_per_batch: i64,
    ) -> Self {
        Self::new(date, date, start_time, end_time, duration_minutes_per_batch)
    }

    /// Parses a JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfig(e.to_string()))
    }

    /// Sets accessibility prioritization.
    pub fn with_prioritize_accessibility(mut self, flag: bool) -> Self {
        self.prioritize_accessibility = flag;
        self
    }

    /// Excludes the given lunch window from slot generation.
    pub fn with_lunch_break(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.exclude_lunch_break = true;
        self.lunch_break_start = start;
        self.lunch_break_end = end;
        self
    }

    /// Disables lunch exclusion.
    pub fn without_lunch_break(mut self) -> Self {
        self.exclude_lunch_break = false;
        self
    }

    /// Calendar days of this run.
    pub fn dates(&self) -> Vec<CalendarDay> {
        calendar::dates(self.start_date, self.end_date)
    }

    /// Daily slots of this run.
    pub fn slots(&self) -> Vec<TimeSlot> {
        calendar::slots(
            self.start_time,
            self.end_time,
            self.duration_minutes_per_batch,
            self.exclude_lunch_break,
            self.lunch_break_start,
            self.lunch_break_end,
        )
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let s = text.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(text.to_string()))
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(text.to_string()))
}

/// Serde adapter for `HH:MM` times (also accepts `HH:MM:SS`).
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(de::Error::custom)
    }
}
