use super::colors::*;
use ratatui::style::{Modifier, Style};
use taskboard_domain::{TaskPriority, TaskStatus};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

pub fn done_text() -> Style {
    Style::default()
        .fg(DONE_TEXT)
        .add_modifier(Modifier::CROSSED_OUT)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn priority_style(priority: TaskPriority) -> Style {
    let color = match priority {
        TaskPriority::High => PRIORITY_HIGH,
        TaskPriority::Medium => PRIORITY_MEDIUM,
        TaskPriority::Low => PRIORITY_LOW,
    };
    Style::default().fg(color)
}

pub fn status_style(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Todo => STATUS_TODO,
        TaskStatus::InProgress => STATUS_IN_PROGRESS,
        TaskStatus::Done => STATUS_DONE,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn due_date_style(overdue: bool) -> Style {
    if overdue {
        Style::default().fg(OVERDUE).add_modifier(Modifier::BOLD)
    } else {
        label_text()
    }
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
