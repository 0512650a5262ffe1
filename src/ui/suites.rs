use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Test Suites ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner_height = block.inner(area).height as usize;
    app.viewport_height = inner_height;

    let store = app.store.lock().unwrap();
    let indices = app.visible_indices(&store);

    if indices.is_empty() {
        let empty = Paragraph::new("no test suites")
            .style(Style::default().fg(theme::OVERLAY0))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let start = app.scroll_offset.min(indices.len().saturating_sub(1));
    let end = (start + inner_height).min(indices.len());
    let items: Vec<ListItem> = indices[start..end]
        .iter()
        .enumerate()
        .map(|(view_i, &idx)| {
            let absolute_i = view_i + start;
            let suite = &store.test_suites()[idx];

            let final_marker = if suite.is_final { "final" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!(" {:<12}", suite.id.as_deref().unwrap_or("?")),
                    Style::default().fg(theme::MAUVE),
                ),
                Span::styled(format!("{:<32}", suite.name), Style::default().fg(theme::TEXT)),
                Span::styled(format!("{:<8}", suite.format), Style::default().fg(theme::SUBTEXT0)),
                Span::styled(
                    format!("{:<8}", suite.version_string),
                    Style::default().fg(theme::SUBTEXT0),
                ),
                Span::styled(final_marker, Style::default().fg(theme::TEAL)),
            ]);

            let item = ListItem::new(line);
            if absolute_i == app.selected {
                item.style(Style::default().bg(theme::SURFACE1))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
