//! Task sorting.
//!
//! Shared by the TUI board and the CLI so both order columns the same way.

use crate::Task;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use taskboard_core::TaskboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Newest first.
    #[default]
    CreatedAt,
    /// High, then medium, then low.
    Priority,
    /// Earliest due first, undated tasks last.
    DueDate,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CreatedAt => "Newest",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::CreatedAt => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::CreatedAt,
        }
    }

    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            // None is the smallest Option, so reversing also puts undated last.
            Self::CreatedAt => b.created_at.cmp(&a.created_at),
            Self::Priority => a.priority.rank().cmp(&b.priority.rank()),
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(ad), Some(bd)) => ad.cmp(&bd),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "created_at" | "created" | "newest" => Ok(Self::CreatedAt),
            "priority" => Ok(Self::Priority),
            "due_date" | "due" => Ok(Self::DueDate),
            _ => Err(TaskboardError::Validation(format!(
                "Invalid sort '{}'. Valid values: created_at, priority, due_date",
                s
            ))),
        }
    }
}

/// Stable sort in place. Works with both `&Task` and `Task` elements.
pub fn sort_tasks<T: Borrow<Task>>(tasks: &mut [T], field: SortField) {
    tasks.sort_by(|a, b| field.compare(a.borrow(), b.borrow()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TaskPriority, TaskStatus};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
    }

    fn task(id: u64, priority: TaskPriority, due: Option<u32>, created: Option<u32>) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            priority,
            status: TaskStatus::Todo,
            due_date: due.map(at),
            created_at: created.map(at),
            updated_at: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_priority_order_regardless_of_input() {
        let mut tasks = vec![
            task(1, TaskPriority::Low, None, None),
            task(2, TaskPriority::High, None, None),
            task(3, TaskPriority::Medium, None, None),
            task(4, TaskPriority::High, None, None),
        ];
        sort_tasks(&mut tasks, SortField::Priority);
        // Stable within equal priority.
        assert_eq!(ids(&tasks), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_due_date_undated_last() {
        let mut tasks = vec![
            task(1, TaskPriority::Low, None, None),
            task(2, TaskPriority::Low, Some(20), None),
            task(3, TaskPriority::Low, None, None),
            task(4, TaskPriority::Low, Some(5), None),
        ];
        sort_tasks(&mut tasks, SortField::DueDate);
        assert_eq!(ids(&tasks), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_created_at_newest_first() {
        let mut tasks = vec![
            task(1, TaskPriority::Low, None, Some(1)),
            task(2, TaskPriority::Low, None, Some(3)),
            task(3, TaskPriority::Low, None, None),
            task(4, TaskPriority::Low, None, Some(2)),
        ];
        sort_tasks(&mut tasks, SortField::default());
        assert_eq!(ids(&tasks), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sorts_references() {
        let a = task(1, TaskPriority::Low, None, None);
        let b = task(2, TaskPriority::High, None, None);
        let mut refs = vec![&a, &b];
        sort_tasks(&mut refs, SortField::Priority);
        assert_eq!(refs[0].id, 2);
    }

    #[test]
    fn test_parse_and_cycle() {
        assert_eq!("due-date".parse::<SortField>().unwrap(), SortField::DueDate);
        assert_eq!("priority".parse::<SortField>().unwrap(), SortField::Priority);
        assert!("title".parse::<SortField>().is_err());
        assert_eq!(SortField::DueDate.next(), SortField::CreatedAt);
    }
}
