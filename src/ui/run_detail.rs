use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::App;
use crate::models::RunSummary;

pub fn draw(frame: &mut Frame, app: &mut App, run_id: i64, area: Rect) {
    let [info_area, results_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(1)]).areas(area);

    draw_info(frame, app, run_id, info_area);
    draw_results(frame, app, results_area);
}

fn draw_info(frame: &mut Frame, app: &App, run_id: i64, area: Rect) {
    let store = app.store.lock().unwrap();
    let summary = store.run_summary(run_id);

    // Prefer the explicitly fetched record; fall back to the runs
    // collection while the single-run sync is still in flight.
    let run = store
        .current_test_run()
        .filter(|r| r.id == run_id)
        .or_else(|| store.test_run(run_id));

    let mut lines = Vec::new();
    match run {
        Some(run) => {
            lines.push(Line::from(vec![
                Span::styled(format!("run #{}", run.id), Style::default().fg(theme::MAUVE)),
                Span::raw("  "),
                Span::styled(run.status().to_string(), Style::default().fg(theme::TEXT)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("created {}", run.created_at()),
                Style::default().fg(theme::OVERLAY0),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                format!("run #{run_id}"),
                Style::default().fg(theme::MAUVE),
            )));
            lines.push(Line::from(Span::styled(
                "run record not synced",
                Style::default().fg(theme::OVERLAY0),
            )));
        }
    }
    lines.push(summary_line(&summary));

    let block = Block::default()
        .title(format!(" Test Run {run_id} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn summary_line(summary: &RunSummary) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("✔ {}", summary.passed), Style::default().fg(theme::GREEN)),
        Span::raw("  "),
        Span::styled(format!("✘ {}", summary.failed), Style::default().fg(theme::RED)),
        Span::raw("  "),
        Span::styled(format!("⊘ {}", summary.skipped), Style::default().fg(theme::TEAL)),
        Span::raw("  "),
        Span::styled(format!("◌ {}", summary.other), Style::default().fg(theme::OVERLAY0)),
        Span::raw("  "),
        Span::styled(
            format!("{}% of {} passed", summary.pass_rate, summary.total),
            Style::default().fg(theme::SUBTEXT0),
        ),
    ])
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner_height = block.inner(area).height as usize;
    app.viewport_height = inner_height;

    let store = app.store.lock().unwrap();
    let indices = app.visible_indices(&store);

    if indices.is_empty() {
        let empty = Paragraph::new("no results for this run")
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
            let result = &store.test_case_results()[idx];
            let outcome = result.outcome();

            // Resolve the case title when the cases collection happens to
            // be cached; the bare id works either way.
            let case_label = store
                .test_case(result.test_case_id)
                .map(|c| c.title().to_string())
                .unwrap_or_else(|| format!("case {}", result.test_case_id));

            let mut spans = vec![
                Span::styled(
                    format!(" {} ", outcome.icon()),
                    Style::default().fg(outcome.color()),
                ),
                Span::styled(format!("{case_label:<32}"), Style::default().fg(theme::TEXT)),
                Span::styled(
                    format!("{:<10}", outcome.label()),
                    Style::default().fg(outcome.color()),
                ),
            ];
            if let Some(note) = result.comment().or_else(|| result.logs()) {
                spans.push(Span::styled(
                    note.to_string(),
                    Style::default().fg(theme::OVERLAY0),
                ));
            }

            let item = ListItem::new(Line::from(spans));
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
