//! HTML fragment rendering of the board.
//!
//! Produces the same card markup as the web board: every user-supplied
//! string is escaped, and due dates carry an `overdue` class when late.
//! Due dates are shown as calendar dates in the caller's time zone.

use chrono::TimeZone;
use std::fmt::{self, Write};

use crate::board::{BoardView, CardView, ColumnView};
use crate::TaskStatus;

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn column_element_id(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "todoTasks",
        TaskStatus::InProgress => "progressTasks",
        TaskStatus::Done => "doneTasks",
    }
}

pub fn render_card<Tz>(card: &CardView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let priority = card.priority.as_str();
    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"task-card priority-{priority}\" data-task-id=\"{}\">\
         <div class=\"task-header\"><div class=\"task-title\">{}</div></div>",
        card.id,
        escape_html(&card.title),
    );
    if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(
            html,
            "<div class=\"task-description\">{}</div>",
            escape_html(description)
        );
    }
    let _ = write!(
        html,
        "<div class=\"task-meta\">\
         <span class=\"task-badge priority-badge {priority}\">{priority}</span>"
    );
    if let Some(due) = card.due_date {
        let class = if card.overdue { "due-date overdue" } else { "due-date" };
        let _ = write!(
            html,
            "<span class=\"{class}\">{}</span>",
            due.with_timezone(tz).format("%Y-%m-%d")
        );
    }
    html.push_str("</div></div>");
    html
}

pub fn render_column<Tz>(column: &ColumnView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut html = String::new();
    let _ = write!(
        html,
        "<section class=\"column\" data-status=\"{}\"><h2>{} <span class=\"count\">{}</span></h2>\
         <div id=\"{}\">",
        column.status.as_str(),
        column.title(),
        column.count(),
        column_element_id(column.status),
    );
    if column.is_empty() {
        html.push_str(
            "<div class=\"empty-state\"><div class=\"empty-state-text\">No tasks here</div></div>",
        );
    } else {
        for card in &column.cards {
            html.push_str(&render_card(card, tz));
        }
    }
    html.push_str("</div></section>");
    html
}

pub fn render_board<Tz>(board: &BoardView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut html = String::from("<div class=\"board\">");
    for column in &board.columns {
        html.push_str(&render_column(column, tz));
    }
    html.push_str("</div>");
    html
}
