use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::theme;

/// Static reference of the service's data model, mirroring what the web
/// frontend's schema page shows.
const ENTITIES: &[(&str, &str)] = &[
    ("TestSuite", "id · name · format · version · version_string · is_final · url"),
    ("TestCase", "id · case_id · title · version · test_suite_id · steps · area"),
    ("TestRun", "id · status · operator_id · created_at · updated_at"),
    ("TestCaseResult", "id · result · logs · comment · test_case_id · test_run_id"),
    ("TestRunTemplate", "id · template_id · name · description · field"),
];

const RELATIONS: &[&str] = &[
    "TestSuite 1─* TestCase",
    "TestCase 1─* TestCaseResult *─1 TestRun",
    "TestRunTemplate *─* TestCase",
    "TestRun *─1 TestOperator",
];

pub fn draw(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (name, fields) in ENTITIES {
        lines.push(Line::from(vec![
            Span::styled(format!(" {name:<18}"), Style::default().fg(theme::MAUVE)),
            Span::styled(*fields, Style::default().fg(theme::SUBTEXT0)),
        ]));
    }
    lines.push(Line::default());
    for relation in RELATIONS {
        lines.push(Line::from(Span::styled(
            format!(" {relation}"),
            Style::default().fg(theme::TEAL),
        )));
    }

    let block = Block::default()
        .title(" Schema ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
