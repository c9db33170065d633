use crate::theme::{focused_border, highlight_text, label_text, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rectangle covering the given share of `area`, centred on both axes.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [band] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(band);
    popup
}

/// Clears a centered area, draws a bordered block and returns its inner area.
pub fn render_popup_with_block(
    frame: &mut Frame,
    title: &str,
    width_percent: u16,
    height_percent: u16,
) -> Rect {
    let area = centered_rect(width_percent, height_percent, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    inner
}

pub fn render_confirm_popup(frame: &mut Frame, title: &str, question: &str) {
    let inner = render_popup_with_block(frame, title, 50, 25);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(question)
        .style(highlight_text())
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let hint = Paragraph::new("Press ENTER/y to confirm, n/ESC to cancel").style(label_text());
    frame.render_widget(hint, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centred() {
        let outer = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, outer);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
