use taskboard_domain::{BoardView, TaskId, TaskStatus};

/// Cursor over the three board columns.
///
/// The row is clamped against the current board each time it is read, so a
/// reload that shrinks a column never leaves the cursor past its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSelection {
    column: TaskStatus,
    row: usize,
}

impl BoardSelection {
    pub fn new() -> Self {
        Self {
            column: TaskStatus::Todo,
            row: 0,
        }
    }

    pub fn column(&self) -> TaskStatus {
        self.column
    }

    /// Selected row within the focused column, if the column has cards.
    pub fn row(&self, board: &BoardView) -> Option<usize> {
        let len = board.column(self.column).count();
        (len > 0).then(|| self.row.min(len - 1))
    }

    pub fn selected_id(&self, board: &BoardView) -> Option<TaskId> {
        let row = self.row(board)?;
        board.column(self.column).cards.get(row).map(|card| card.id)
    }

    pub fn next_column(&mut self) {
        if self.column != TaskStatus::Done {
            self.column = self.column.next();
            self.row = 0;
        }
    }

    pub fn prev_column(&mut self) {
        if self.column != TaskStatus::Todo {
            self.column = self.column.prev();
            self.row = 0;
        }
    }

    pub fn next(&mut self, board: &BoardView) {
        if let Some(row) = self.row(board) {
            let len = board.column(self.column).count();
            self.row = (row + 1).min(len - 1);
        }
    }

    pub fn prev(&mut self, board: &BoardView) {
        if let Some(row) = self.row(board) {
            self.row = row.saturating_sub(1);
        }
    }

    /// Moves the cursor onto `id` if it is visible.
    pub fn select_task(&mut self, board: &BoardView, id: TaskId) -> bool {
        for column in &board.columns {
            if let Some(row) = column.cards.iter().position(|card| card.id == id) {
                self.column = column.status;
                self.row = row;
                return true;
            }
        }
        false
    }
}

impl Default for BoardSelection {
    fn default() -> Self {
        Self::new()
    }
}
