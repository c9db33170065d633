use chrono::TimeZone;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::fmt;
use taskboard_core::TextInput;
use taskboard_domain::{FormMode, Task, TaskForm, TaskPriority, TaskStatus};

use super::popup::render_popup_with_block;
use crate::dialog::{handle_dialog_input, DialogAction};
use crate::theme::{
    error_text, focused_border, label_text, normal_text, priority_style, status_style,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Status,
    DueDate,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Status,
        FormField::DueDate,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Status => "Status",
            FormField::DueDate => "Due date (YYYY-MM-DDTHH:MM)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// Editing state of the create/edit task modal.
///
/// Each opened modal carries a ticket from the app so a finished request
/// only closes the modal it was submitted from.
#[derive(Debug, Clone)]
pub struct FormModal {
    id: Option<taskboard_domain::TaskId>,
    ticket: u64,
    pub title: TextInput,
    pub description: TextInput,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: TextInput,
    pub focus: FormField,
    /// Inline validation message from the last submit attempt.
    pub error: Option<String>,
}

impl FormModal {
    pub fn from_form(form: TaskForm) -> Self {
        Self {
            id: form.id,
            ticket: 0,
            title: TextInput::with_text(form.title),
            description: TextInput::with_text(form.description),
            priority: form.priority,
            status: form.status,
            due_date: TextInput::with_text(form.due_date),
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn open_create() -> Self {
        Self::from_form(TaskForm::for_create())
    }

    pub fn open_edit<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self::from_form(TaskForm::from_task(task, tz))
    }

    pub fn with_ticket(mut self, ticket: u64) -> Self {
        self.ticket = ticket;
        self
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn mode(&self) -> FormMode {
        match self.id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn to_form(&self) -> TaskForm {
        TaskForm {
            id: self.id,
            title: self.title.as_str().to_string(),
            description: self.description.as_str().to_string(),
            priority: self.priority,
            status: self.status,
            due_date: self.due_date.as_str().to_string(),
        }
    }

    fn heading(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Create New Task",
            FormMode::Edit(_) => "Edit Task",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Create Task",
            FormMode::Edit(_) => "Update Task",
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority | FormField::Status => None,
        }
    }

    pub fn handle_key(&mut self, key_code: KeyCode) -> FormAction {
        match key_code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return FormAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return FormAction::None;
            }
            _ => {}
        }

        match self.focus {
            FormField::Priority => match key_code {
                KeyCode::Left => self.priority = self.priority.prev(),
                KeyCode::Right | KeyCode::Char(' ') => self.priority = self.priority.next(),
                _ => {}
            },
            FormField::Status => match key_code {
                KeyCode::Left => self.status = self.status.prev(),
                KeyCode::Right | KeyCode::Char(' ') => self.status = self.status.next(),
                _ => {}
            },
            _ => {
                let edited = self
                    .focused_input()
                    .map(|input| handle_dialog_input(input, key_code, true))
                    == Some(DialogAction::Edited);
                if edited {
                    self.error = None;
                }
            }
        }
        FormAction::None
    }

    pub fn render(&self, frame: &mut Frame) {
        let inner = render_popup_with_block(frame, self.heading(), 60, 70);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        self.render_text_field(frame, chunks[0], FormField::Title, &self.title);
        self.render_text_field(frame, chunks[1], FormField::Description, &self.description);
        self.render_choice(
            frame,
            chunks[2],
            FormField::Priority,
            Span::styled(self.priority.label(), priority_style(self.priority)),
        );
        self.render_choice(
            frame,
            chunks[3],
            FormField::Status,
            Span::styled(self.status.label(), status_style(self.status)),
        );
        self.render_text_field(frame, chunks[4], FormField::DueDate, &self.due_date);

        if let Some(error) = &self.error {
            frame.render_widget(Paragraph::new(error.as_str()).style(error_text()), chunks[5]);
        }

        let hint = format!(
            "Tab: next field  \u{2190}/\u{2192}: change  ENTER: {}  ESC: cancel",
            self.submit_label()
        );
        frame.render_widget(Paragraph::new(hint).style(label_text()), chunks[6]);
    }

    fn render_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: FormField,
        input: &TextInput,
    ) {
        let focused = self.focus == field;
        let mut block = Block::default().borders(Borders::ALL).title(field.label());
        if focused {
            block = block.border_style(focused_border());
        }
        frame.render_widget(
            Paragraph::new(input.as_str()).style(normal_text()).block(block),
            area,
        );
        if focused {
            let x = area.x + 1 + input.cursor_column() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_choice(&self, frame: &mut Frame, area: Rect, field: FormField, value: Span<'static>) {
        let marker = if self.focus == field { "> " } else { "  " };
        let line = Line::from(vec![
            Span::styled(format!("{}{}: ", marker, field.label()), label_text()),
            Span::raw("\u{2039} "),
            value,
            Span::raw(" \u{203a}"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
