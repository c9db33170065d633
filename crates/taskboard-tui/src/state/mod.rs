pub mod inflight;

use chrono::{DateTime, Utc};
use taskboard_domain::{BoardView, FilterState, Task, TaskId, TaskStats};

pub use inflight::{InFlight, RequestKey};

/// Client-side cache of the server's task list plus the user's view
/// settings.
///
/// The list is only ever replaced wholesale by a reload; nothing edits it
/// in place.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    pub filters: FilterState,
    loaded: bool,
}

impl TaskStore {
    pub fn new(filters: FilterState) -> Self {
        Self {
            tasks: Vec::new(),
            filters,
            loaded: false,
        }
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        tracing::debug!("Replacing task cache with {} tasks", tasks.len());
        self.tasks = tasks;
        self.loaded = true;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether at least one load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn board_view(&self, now: DateTime<Utc>) -> BoardView {
        BoardView::build(&self.tasks, &self.filters, now)
    }

    /// Header counts, always over the full list.
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        TaskStats::compute(&self.tasks, now)
    }
}
