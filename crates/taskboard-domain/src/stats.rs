use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Task, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Summary counts over the whole cached list, independent of filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    pub overdue: usize,
    /// Earliest due date that is not yet in the past.
    pub next_due: Option<DateTime<Utc>>,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::Todo => stats.by_status.todo += 1,
                TaskStatus::InProgress => stats.by_status.in_progress += 1,
                TaskStatus::Done => stats.by_status.done += 1,
            }
            match task.priority {
                TaskPriority::Low => stats.by_priority.low += 1,
                TaskPriority::Medium => stats.by_priority.medium += 1,
                TaskPriority::High => stats.by_priority.high += 1,
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            if let Some(due) = task.due_date.filter(|due| *due >= now) {
                if stats.next_due.map_or(true, |next| due < next) {
                    stats.next_due = Some(due);
                }
            }
        }
        stats
    }

    pub fn count_for(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.by_status.todo,
            TaskStatus::InProgress => self.by_status.in_progress,
            TaskStatus::Done => self.by_status.done,
        }
    }
}
