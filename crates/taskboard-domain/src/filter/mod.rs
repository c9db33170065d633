//! Task filtering.
//!
//! `FilterState` holds what the user selected; the `TaskFilter`
//! implementations perform the matching.

pub mod filter_state;
pub mod task_filter;

pub use filter_state::FilterState;
pub use task_filter::{CompositeFilter, PriorityFilter, SearchFilter, StatusFilter, TaskFilter};

use crate::Task;

/// Returns the tasks satisfying every active predicate of `filters`, in
/// input order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &FilterState) -> Vec<&'a Task> {
    let filter = filters.to_filter();
    tasks.iter().filter(|task| filter.matches(task)).collect()
}
