//! Column view model derived from the cached task list.
//!
//! The board is recomputed from scratch on every change: filter, sort, then
//! partition by status into the three fixed columns.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::{filter_tasks, FilterState};
use crate::sort::sort_tasks;
use crate::{Task, TaskId, TaskPriority, TaskStatus};

/// One rendered task card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub overdue: bool,
}

impl CardView {
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            overdue: task.is_overdue(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    /// Count badge shown next to the column title.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The three status columns, always in todo, in progress, done order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub columns: [ColumnView; 3],
}

impl BoardView {
    pub fn build(tasks: &[Task], filters: &FilterState, now: DateTime<Utc>) -> Self {
        let mut visible = filter_tasks(tasks, filters);
        sort_tasks(&mut visible, filters.sort_by);

        let mut columns = TaskStatus::ALL.map(|status| ColumnView {
            status,
            cards: Vec::new(),
        });
        for task in visible {
            columns[task.status.column_index()]
                .cards
                .push(CardView::from_task(task, now));
        }

        Self { columns }
    }

    pub fn column(&self, status: TaskStatus) -> &ColumnView {
        &self.columns[status.column_index()]
    }

    /// Number of cards across all columns.
    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(ColumnView::count).sum()
    }

    pub fn find_card(&self, id: TaskId) -> Option<&CardView> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| card.id == id)
    }
}
