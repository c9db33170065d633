//! User-selected filter and sort configuration.

use super::task_filter::{CompositeFilter, PriorityFilter, SearchFilter, StatusFilter};
use crate::sort::SortField;
use crate::{TaskPriority, TaskStatus};

/// Filter settings applied to the cached task list before rendering.
///
/// Lives for the lifetime of the board and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Only show tasks with this status.
    pub status: Option<TaskStatus>,
    /// Only show tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring matched against title or description.
    pub search: String,
    /// Ordering applied inside each column.
    pub sort_by: SortField,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || !self.search.is_empty()
    }

    /// Clears the predicates, keeping the sort selection.
    pub fn clear(&mut self) {
        self.status = None;
        self.priority = None;
        self.search.clear();
    }

    /// Steps the status filter through all, todo, in progress, done.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TaskStatus::Todo),
            Some(TaskStatus::Done) => None,
            Some(status) => Some(status.next()),
        };
    }

    /// Steps the priority filter through all, low, medium, high.
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(TaskPriority::Low),
            Some(TaskPriority::High) => None,
            Some(priority) => Some(priority.next()),
        };
    }

    pub fn cycle_sort(&mut self) {
        self.sort_by = self.sort_by.next();
    }

    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if let Some(status) = self.status {
            filter = filter.with_filter(Box::new(StatusFilter::new(status)));
        }
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        if !self.search.is_empty() {
            filter = filter.with_filter(Box::new(SearchFilter::new(self.search.as_str())));
        }
        filter
    }

    /// Short human-readable description of the active filters.
    pub fn summary(&self) -> Option<String> {
        let mut parts = vec![];
        if let Some(status) = self.status {
            parts.push(format!("status: {}", status.label()));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("priority: {}", priority.label()));
        }
        if !self.search.is_empty() {
            parts.push(format!("search: \"{}\"", self.search));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" + "))
        }
    }
}
