use crate::theme::{focused_border, status_style, unfocused_border};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use taskboard_domain::TaskStatus;

/// Border and title settings of one board column.
pub struct PanelConfig {
    pub status: TaskStatus,
    pub count: usize,
    pub is_focused: bool,
}

impl PanelConfig {
    pub fn new(status: TaskStatus, count: usize) -> Self {
        Self {
            status,
            count,
            is_focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn border_style(&self) -> ratatui::style::Style {
        if self.is_focused {
            focused_border()
        } else {
            unfocused_border()
        }
    }

    /// Column title followed by its count badge.
    pub fn title_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {} ", self.status.label()), status_style(self.status)),
            Span::styled(format!("({}) ", self.count), self.border_style()),
        ])
    }

    pub fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(self.title_line())
    }
}

pub fn render_panel(frame: &mut Frame, area: Rect, config: &PanelConfig, content: Paragraph<'_>) {
    let widget = content.block(config.block());
    frame.render_widget(widget, area);
}
