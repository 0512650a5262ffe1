use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.filter.value();
    let (display, border_color, text_style) = if app.filter_active {
        (
            format!("/ {query}│"),
            theme::TEAL,
            Style::default().fg(theme::TEXT),
        )
    } else {
        (
            format!("/ {query}"),
            theme::SURFACE2,
            Style::default().fg(theme::SUBTEXT0),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Filter ");
    let paragraph = Paragraph::new(display).style(text_style).block(block);
    frame.render_widget(paragraph, area);
}
