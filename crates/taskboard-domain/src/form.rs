//! Mapping between task records and the create/edit form fields.
//!
//! Due dates are edited as local wall-clock time in `YYYY-MM-DDTHH:MM`
//! form and stored as UTC. The time zone is a parameter so callers pass
//! `chrono::Local` and tests pass a fixed offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use taskboard_core::{TaskboardError, TaskboardResult};

use crate::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};

/// Input format of the due date field, minute precision.
pub const DUE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_DUE_FORMATS: [&str; 2] = [DUE_INPUT_FORMAT, "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

/// What submitting the form should do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(TaskDraft),
    Update(TaskId, TaskPatch),
}

/// Raw field values of the task modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Hidden id field; present only when editing.
    pub id: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Local wall-clock due date, empty when unset.
    pub due_date: String,
}

impl TaskForm {
    /// A cleared form for creating a task.
    pub fn for_create() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing task.
    pub fn from_task<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            id: Some(task.id),
            title: task.title.clone(),
            description: task.description_text().to_string(),
            priority: task.priority,
            status: task.status,
            due_date: task
                .due_date
                .map(|due| to_local_input(due, tz))
                .unwrap_or_default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        match self.id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::for_create();
    }

    /// Reads the fields into a request, converting the due date back to an
    /// absolute timestamp.
    pub fn submit<Tz: TimeZone>(&self, tz: &Tz) -> TaskboardResult<FormSubmission> {
        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            Some(from_local_input(&self.due_date, tz)?)
        };

        let draft = TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            due_date,
        };
        draft.validate()?;

        Ok(match self.id {
            Some(id) => FormSubmission::Update(id, TaskPatch::from(draft)),
            None => FormSubmission::Create(draft),
        })
    }
}

/// Formats a UTC timestamp as local wall-clock input, dropping seconds.
pub fn to_local_input<Tz>(utc: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    utc.with_timezone(tz).format(DUE_INPUT_FORMAT).to_string()
}

/// Parses local wall-clock input into a UTC timestamp. A bare date means
/// local midnight.
pub fn from_local_input<Tz: TimeZone>(input: &str, tz: &Tz) -> TaskboardResult<DateTime<Utc>> {
    let input = input.trim();
    let naive = ACCEPTED_DUE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            TaskboardError::Validation(format!(
                "Invalid due date '{}'. Expected YYYY-MM-DDTHH:MM",
                input
            ))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            TaskboardError::Validation(format!("Due date '{}' does not exist locally", input))
        })
}
