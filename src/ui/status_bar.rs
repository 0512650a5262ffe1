use ratatui::{prelude::*, widgets::Paragraph};

use super::theme;
use crate::app::App;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let (loading, error) = {
        let store = app.store.lock().unwrap();
        (store.loading(), store.error().map(str::to_string))
    };

    let bar = if app.filter_active {
        Line::from(vec![
            Span::styled(" [esc]", Style::default().fg(theme::YELLOW)),
            Span::raw(" clear  "),
            Span::styled("[enter]", Style::default().fg(theme::YELLOW)),
            Span::raw(" apply"),
        ])
    } else {
        let mut spans = vec![
            Span::styled(" [/]", Style::default().fg(theme::YELLOW)),
            Span::raw(" filter  "),
            Span::styled("[r]", Style::default().fg(theme::YELLOW)),
            Span::raw(" refresh  "),
            Span::styled("[enter]", Style::default().fg(theme::YELLOW)),
            Span::raw(" open  "),
            Span::styled("[q]", Style::default().fg(theme::YELLOW)),
            Span::raw(" quit  "),
            Span::styled(app.route.path(), Style::default().fg(theme::OVERLAY0)),
        ];

        if loading {
            let spinner = SPINNER_FRAMES[app.spinner_tick % SPINNER_FRAMES.len()];
            spans.push(Span::styled(
                format!("  {} syncing...", spinner),
                Style::default().fg(theme::YELLOW),
            ));
        } else if let Some(error) = error {
            spans.push(Span::styled("  ✘ ", Style::default().fg(theme::RED)));
            spans.push(Span::styled(error, Style::default().fg(theme::RED)));
        }

        Line::from(spans)
    };

    let paragraph = Paragraph::new(bar).style(Style::default().bg(theme::SURFACE0));
    frame.render_widget(paragraph, area);
}
