pub mod board;
pub mod field_update;
pub mod filter;
pub mod form;
pub mod html;
pub mod sort;
pub mod stats;
pub mod task;

pub use board::{BoardView, CardView, ColumnView};
pub use field_update::FieldUpdate;
pub use filter::{filter_tasks, FilterState};
pub use form::{FormMode, FormSubmission, TaskForm};
pub use sort::{sort_tasks, SortField};
pub use stats::TaskStats;
pub use task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};
