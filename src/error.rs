//! Error types.
//!
//! The allocation algorithm itself never fails: invalid ranges and capacity
//! shortfalls are reported through warnings and counts on
//! [`ScheduleResult`](crate::models::ScheduleResult). Errors are reserved for
//! parsing input values and for the collaborator/service layer.

use thiserror::Error;

/// Errors produced outside the core allocation run.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A time-of-day string could not be parsed (`HH:MM` or `HH:MM:SS`).
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
    /// A calendar date string could not be parsed (`YYYY-MM-DD`).
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Configuration payload could not be deserialized.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The data source returned no rooms for the group.
    #[error("no rooms found for campus group {group_id}")]
    NoRooms {
        /// Requested room group.
        group_id: i64,
    },
    /// The data source returned no participants for the group.
    #[error("no participants found for participant group {group_id}")]
    NoParticipants {
        /// Requested participant group.
        group_id: i64,
    },
    /// Fetching input rows failed.
    #[error("data source error: {0}")]
    Source(String),
    /// Persisting output rows failed.
    #[error("sink error: {0}")]
    Sink(String),
    /// CSV export failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, ScheduleError>`.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScheduleError::InvalidTime("25:00".into()).to_string(),
            "invalid time '25:00': expected HH:MM"
        );
        assert_eq!(
            ScheduleError::NoRooms { group_id: 7 }.to_string(),
            "no rooms found for campus group 7"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ScheduleError = io.into();
        assert!(matches!(err, ScheduleError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
