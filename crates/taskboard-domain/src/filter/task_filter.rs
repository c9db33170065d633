//! Task filter implementations.

use crate::{Task, TaskPriority, TaskStatus};

/// Trait for filtering tasks by some criterion.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Exact match on status.
pub struct StatusFilter {
    status: TaskStatus,
}

impl StatusFilter {
    pub fn new(status: TaskStatus) -> Self {
        Self { status }
    }
}

impl TaskFilter for StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        task.status == self.status
    }
}

/// Exact match on priority.
pub struct PriorityFilter {
    priority: TaskPriority,
}

impl PriorityFilter {
    pub fn new(priority: TaskPriority) -> Self {
        Self { priority }
    }
}

impl TaskFilter for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        task.priority == self.priority
    }
}

/// Case-insensitive substring search over title and description.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskFilter for SearchFilter {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&self.query))
    }
}

/// Combine multiple filters with AND logic.
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// An empty composite matches every task.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, description: Option<&str>) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            description: description.map(str::to_string),
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_and_priority_filters() {
        let t = task("Fix bug", None);
        assert!(StatusFilter::new(TaskStatus::InProgress).matches(&t));
        assert!(!StatusFilter::new(TaskStatus::Done).matches(&t));
        assert!(PriorityFilter::new(TaskPriority::High).matches(&t));
        assert!(!PriorityFilter::new(TaskPriority::Low).matches(&t));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let t = task("Fix Authentication bug", None);
        assert!(SearchFilter::new("auth").matches(&t));
        assert!(SearchFilter::new("AUTH").matches(&t));
        assert!(!SearchFilter::new("database").matches(&t));
    }

    #[test]
    fn test_search_matches_description_only() {
        let t = task("Code review", Some("Coordinate with FRONTEND."));
        assert!(SearchFilter::new("frontend").matches(&t));
        assert!(!SearchFilter::new("backend").matches(&t));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert!(SearchFilter::new("").matches(&task("anything", None)));
    }

    #[test]
    fn test_composite_filter_is_and() {
        let t = task("Fix bug", Some("urgent"));

        assert!(CompositeFilter::new().matches(&t));

        let both = CompositeFilter::new()
            .with_filter(Box::new(StatusFilter::new(TaskStatus::InProgress)))
            .with_filter(Box::new(SearchFilter::new("urgent")));
        assert!(both.matches(&t));

        let one_fails = CompositeFilter::new()
            .with_filter(Box::new(StatusFilter::new(TaskStatus::InProgress)))
            .with_filter(Box::new(PriorityFilter::new(TaskPriority::Low)));
        assert!(!one_fails.matches(&t));
    }
}
