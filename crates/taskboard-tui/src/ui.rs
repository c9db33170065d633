use crate::app::{App, AppMode};
use crate::components::*;
use crate::theme::*;
use chrono::{Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use taskboard_domain::{BoardView, CardView, ColumnView, TaskStats, TaskStatus};

// Title, description, meta line and a spacer.
const CARD_HEIGHT: u16 = 4;

pub fn render(app: &App, frame: &mut Frame) {
    let now = Utc::now();
    let board = app.store.board_view(now);
    let stats = app.store.stats(now);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(app, &stats, frame, chunks[0]);
    render_board(app, &board, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match app.mode {
        AppMode::Form => {
            if let Some(modal) = &app.form {
                modal.render(frame);
            }
        }
        AppMode::ConfirmDelete(id) => {
            let title = app
                .store
                .find(id)
                .map(|task| task.title.as_str())
                .unwrap_or("this task");
            render_confirm_popup(
                frame,
                "Delete Task",
                &format!("Are you sure you want to delete \"{}\"?", title),
            );
        }
        AppMode::Normal | AppMode::Search => {}
    }

    app.loading.render(frame, frame.area());
    if let Some(toast) = app.toasts.current() {
        toast.render(frame, frame.area());
    }
}

fn render_header(app: &App, stats: &TaskStats, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled("Taskboard ", bold_highlight()),
        Span::styled(format!("Total {}", stats.total), normal_text()),
    ];
    for status in TaskStatus::ALL {
        spans.push(Span::styled("  \u{00b7}  ", label_text()));
        spans.push(Span::styled(
            format!("{} {}", status.label(), stats.count_for(status)),
            status_style(status),
        ));
    }
    if stats.overdue > 0 {
        spans.push(Span::styled("  \u{00b7}  ", label_text()));
        spans.push(Span::styled(
            format!("Overdue {}", stats.overdue),
            due_date_style(true),
        ));
    }

    let filters = &app.store.filters;
    let mut view = format!("sort: {}", filters.sort_by.label());
    if let Some(summary) = filters.summary() {
        view = format!("{} | {}", summary, view);
    }

    let view_title = Line::from(Span::styled(format!(" {} ", view), highlight_text()));
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(unfocused_border())
            .title(Span::styled(format!(" {} ", app.endpoint()), label_text()))
            .title(view_title.right_aligned()),
    );
    frame.render_widget(header, area);
}

fn render_board(app: &App, board: &BoardView, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let board_focused = matches!(app.mode, AppMode::Normal | AppMode::Search);
    let selected_row = app.selection.row(board);
    let empty_text = empty_column_text(app.store.is_loaded());

    for (column, column_area) in board.columns.iter().zip(columns.iter()) {
        let focused = board_focused && app.selection.column() == column.status;
        let selected = if focused { selected_row } else { None };
        render_column(column, selected, focused, empty_text, frame, *column_area);
    }
}

fn render_column(
    column: &ColumnView,
    selected: Option<usize>,
    focused: bool,
    empty_text: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let config = PanelConfig::new(column.status, column.count()).focused(focused);

    if column.is_empty() {
        let placeholder = Paragraph::new(vec![Line::raw(""), Line::from(empty_text)])
            .style(label_text())
            .alignment(Alignment::Center);
        render_panel(frame, area, &config, placeholder);
        return;
    }

    let mut lines = Vec::with_capacity(column.count() * CARD_HEIGHT as usize);
    for (row, card) in column.cards.iter().enumerate() {
        lines.extend(card_lines(card, selected == Some(row)));
    }

    let scroll = scroll_offset(selected, area.height.saturating_sub(2));
    render_panel(frame, area, &config, Paragraph::new(lines).scroll((scroll, 0)));
}

fn empty_column_text(loaded: bool) -> &'static str {
    if loaded {
        "No tasks here"
    } else {
        "Loading tasks..."
    }
}

/// First line to draw so the selected card stays inside the visible rows.
fn scroll_offset(selected: Option<usize>, visible_rows: u16) -> u16 {
    let Some(row) = selected else {
        return 0;
    };
    let card_top = row.saturating_mul(CARD_HEIGHT as usize);
    let room = visible_rows.saturating_sub(CARD_HEIGHT) as usize;
    u16::try_from(card_top.saturating_sub(room)).unwrap_or(u16::MAX)
}

fn card_lines(card: &CardView, selected: bool) -> Vec<Line<'static>> {
    let title_style = if card.status == TaskStatus::Done {
        done_text()
    } else {
        normal_text().add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "\u{258c} " } else { "  " };

    let mut meta = vec![
        Span::raw("  "),
        Span::styled(
            format!("[{}]", card.priority.as_str()),
            priority_style(card.priority),
        ),
    ];
    if let Some(due) = card.due_date {
        let mut text = format!(" due {}", due.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
        if card.overdue {
            text.push_str(" (overdue)");
        }
        meta.push(Span::styled(text, due_date_style(card.overdue)));
    }

    let description = card
        .description
        .as_deref()
        .and_then(|d| d.lines().next())
        .unwrap_or("")
        .to_string();

    let row_style = selected_item(selected);
    vec![
        Line::from(vec![
            Span::styled(marker, highlight_text()),
            Span::styled(card.title.clone(), title_style),
        ])
        .style(row_style),
        Line::from(Span::styled(format!("  {}", description), label_text())).style(row_style),
        Line::from(meta).style(row_style),
        Line::raw(""),
    ]
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    if app.mode == AppMode::Search {
        let search_text = format!("/{}", app.search.as_str());
        let help_text = "ENTER: keep  ESC: clear";

        let available_width = area.width.saturating_sub(4);
        let padding = available_width
            .saturating_sub(search_text.chars().count() as u16)
            .saturating_sub(help_text.len() as u16)
            .max(1);

        let footer_line = Line::from(vec![
            Span::styled(search_text, normal_text()),
            Span::raw(" ".repeat(padding as usize)),
            Span::styled(help_text, label_text()),
        ]);
        frame.render_widget(
            Paragraph::new(footer_line).block(Block::default().borders(Borders::ALL)),
            area,
        );
        frame.set_cursor_position((area.x + 2 + app.search.cursor_column() as u16, area.y + 1));
        return;
    }

    let help = match app.mode {
        AppMode::Form => "TAB: next field  \u{2190}/\u{2192}: change  ENTER: save  ESC: cancel",
        AppMode::ConfirmDelete(_) => "y/ENTER: delete  n/ESC: cancel",
        _ => {
            "n: new  e: edit  d: delete  r: reload  /: search  \
             s: status  p: priority  o: sort  c: clear  q: quit"
        }
    };
    frame.render_widget(
        Paragraph::new(help)
            .style(label_text())
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_column_text_before_first_load() {
        assert_eq!(empty_column_text(false), "Loading tasks...");
        assert_eq!(empty_column_text(true), "No tasks here");
    }

    #[test]
    fn test_scroll_offset_keeps_top_rows_unscrolled() {
        assert_eq!(scroll_offset(None, 20), 0);
        assert_eq!(scroll_offset(Some(0), 20), 0);
        assert_eq!(scroll_offset(Some(4), 20), 0);
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        // Card 6 starts at line 24; 16 lines above the last card slot fit.
        assert_eq!(scroll_offset(Some(6), 20), 8);
    }

    #[test]
    fn test_scroll_offset_saturates_for_huge_columns() {
        assert_eq!(scroll_offset(Some(20_000), 20), u16::MAX);
        assert_eq!(scroll_offset(Some(usize::MAX), 20), u16::MAX);
    }
}
