use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::{bold_highlight, focused_border, popup_bg};

/// Busy indicator shared by every API action.
///
/// A single flag: whichever action finishes last decides whether it is
/// shown, so it can hide while another request is still running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingIndicator {
    visible: bool,
}

impl LoadingIndicator {
    pub fn show(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let width = 16.min(area.width);
        let overlay = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(3) / 2,
            width,
            height: 3.min(area.height),
        };
        let widget = Paragraph::new("Loading...")
            .style(bold_highlight())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focused_border())
                    .style(popup_bg()),
            );
        frame.render_widget(Clear, overlay);
        frame.render_widget(widget, overlay);
    }
}
