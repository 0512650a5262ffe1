use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Test Runs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner_height = block.inner(area).height as usize;
    app.viewport_height = inner_height;

    let store = app.store.lock().unwrap();
    let indices = app.visible_indices(&store);

    if indices.is_empty() {
        let empty = Paragraph::new("no test runs")
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
            let run = &store.test_runs()[idx];

            let status_color = match run.status() {
                "completed" => theme::GREEN,
                "failed" | "aborted" => theme::RED,
                "running" | "in_progress" => theme::YELLOW,
                _ => theme::SUBTEXT0,
            };
            let line = Line::from(vec![
                Span::styled(format!(" #{:<7}", run.id), Style::default().fg(theme::MAUVE)),
                Span::styled(format!("{:<14}", run.status()), Style::default().fg(status_color)),
                Span::styled(run.created_at().to_string(), Style::default().fg(theme::OVERLAY0)),
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
