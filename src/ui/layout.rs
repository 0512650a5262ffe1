use ratatui::prelude::*;

use crate::app::{App, Route};

use super::cases;
use super::home;
use super::notifications;
use super::reports;
use super::run_detail;
use super::runs;
use super::schema;
use super::search_box;
use super::status_bar;
use super::suites;
use super::tabs;
use super::templates;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [tabs_area, main_area, status_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
            .areas(frame.area());

    tabs::draw(frame, app, tabs_area);

    let content_area = if app.filter_active || !app.filter.value().is_empty() {
        let [search_area, rest] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(main_area);
        search_box::draw(frame, app, search_area);
        rest
    } else {
        main_area
    };

    match app.route {
        Route::Home => home::draw(frame, app, content_area),
        Route::TestSuites => suites::draw(frame, app, content_area),
        Route::TestCases => cases::draw(frame, app, content_area),
        Route::TestRuns => runs::draw(frame, app, content_area),
        Route::TestRunDetail(id) | Route::DirectTestRun(id) => {
            run_detail::draw(frame, app, id, content_area)
        }
        Route::TestRunTemplates => templates::draw(frame, app, content_area),
        Route::Reports => reports::draw(frame, app, content_area),
        Route::Schema => schema::draw(frame, content_area),
    }

    status_bar::draw(frame, app, status_area);
    notifications::draw(frame, app);
}
