use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;

const BAR_WIDTH: usize = 25;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Reports · Latest Runs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner_height = block.inner(area).height as usize;
    app.viewport_height = inner_height;

    let store = app.store.lock().unwrap();
    let latest = store.latest_test_runs();

    if latest.is_empty() {
        let empty = Paragraph::new("no test runs to report on")
            .style(Style::default().fg(theme::OVERLAY0))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = latest
        .iter()
        .enumerate()
        .map(|(i, run)| {
            let summary = store.run_summary(run.id);
            let filled = (summary.pass_rate as usize * BAR_WIDTH) / 100;

            let header = Line::from(vec![
                Span::styled(format!(" #{:<7}", run.id), Style::default().fg(theme::MAUVE)),
                Span::styled(format!("{:<14}", run.status()), Style::default().fg(theme::TEXT)),
                Span::styled(
                    format!(
                        "{} total · {} passed · {} failed · {} skipped · {} other",
                        summary.total,
                        summary.passed,
                        summary.failed,
                        summary.skipped,
                        summary.other
                    ),
                    Style::default().fg(theme::SUBTEXT0),
                ),
            ]);
            let bar = Line::from(vec![
                Span::raw("          "),
                Span::styled("█".repeat(filled), Style::default().fg(theme::GREEN)),
                Span::styled(
                    "░".repeat(BAR_WIDTH - filled),
                    Style::default().fg(theme::SURFACE2),
                ),
                Span::styled(
                    format!(" {}%", summary.pass_rate),
                    Style::default().fg(theme::SUBTEXT0),
                ),
            ]);

            let item = ListItem::new(vec![header, bar]);
            if i == app.selected {
                item.style(Style::default().bg(theme::SURFACE1))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
