use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let [counts_area, latest_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).areas(area);

    draw_counts(frame, app, counts_area);
    draw_latest(frame, app, latest_area);
}

fn draw_counts(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.store.lock().unwrap();
    let counts = Line::from(vec![
        Span::styled(
            format!(" {} suites", store.test_suites().len()),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled("  ·  ", Style::default().fg(theme::SURFACE2)),
        Span::styled(
            format!("{} cases", store.test_cases().len()),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled("  ·  ", Style::default().fg(theme::SURFACE2)),
        Span::styled(
            format!("{} runs", store.test_runs().len()),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled("  ·  ", Style::default().fg(theme::SURFACE2)),
        Span::styled(
            format!("{} templates", store.test_run_templates().len()),
            Style::default().fg(theme::TEXT),
        ),
    ]);
    let help = Line::from(Span::styled(
        " tab switches views · enter opens a run · r re-syncs",
        Style::default().fg(theme::OVERLAY0),
    ));

    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));
    frame.render_widget(Paragraph::new(vec![counts, help]).block(block), area);
}

fn draw_latest(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Latest Runs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner_height = block.inner(area).height as usize;
    app.viewport_height = inner_height;

    let store = app.store.lock().unwrap();
    let latest = store.latest_test_runs();

    if latest.is_empty() {
        let empty = Paragraph::new("no test runs")
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
            let line = Line::from(vec![
                Span::styled(format!(" #{:<7}", run.id), Style::default().fg(theme::MAUVE)),
                Span::styled(format!("{:<14}", run.status()), Style::default().fg(theme::TEXT)),
                Span::styled(format!("✔ {}", summary.passed), Style::default().fg(theme::GREEN)),
                Span::raw("  "),
                Span::styled(format!("✘ {}", summary.failed), Style::default().fg(theme::RED)),
                Span::raw("  "),
                Span::styled(format!("⊘ {}", summary.skipped), Style::default().fg(theme::TEAL)),
                Span::raw("  "),
                Span::styled(
                    format!("{}%", summary.pass_rate),
                    Style::default().fg(theme::SUBTEXT0),
                ),
            ]);

            let item = ListItem::new(line);
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
