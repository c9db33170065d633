pub mod board;
pub mod seed;
pub mod stats;
pub mod task;

use chrono::{DateTime, Local, Utc};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::form::from_local_input;
use taskboard_domain::{TaskPriority, TaskStatus};

pub fn parse_priority(s: &str) -> TaskboardResult<TaskPriority> {
    s.parse()
}

pub fn parse_status(s: &str) -> TaskboardResult<TaskStatus> {
    s.parse()
}

/// Accepts RFC 3339, or local wall-clock time as typed into the board form.
pub fn parse_datetime(s: &str) -> TaskboardResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| from_local_input(s, &Local))
        .map_err(|_| {
            TaskboardError::Validation(format!(
                "Invalid date '{}'. Supported formats: YYYY-MM-DD, YYYY-MM-DDTHH:MM \
                 or RFC 3339 (e.g., 2024-01-15T10:30:00Z)",
                s
            ))
        })
}
