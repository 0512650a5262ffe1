use ratatui::{prelude::*, widgets::Paragraph};

use super::theme;
use crate::app::{App, Route};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.route.tab_index();
    let mut spans = Vec::new();
    for (i, tab) in Route::TABS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", Style::default().fg(theme::SURFACE2)));
        }
        let label = format!(" {} {} ", i + 1, tab.title());
        let style = if i == active {
            Style::default().fg(theme::YELLOW).bg(theme::SURFACE1)
        } else {
            Style::default().fg(theme::SUBTEXT0)
        };
        spans.push(Span::styled(label, style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::SURFACE0));
    frame.render_widget(paragraph, area);
}
