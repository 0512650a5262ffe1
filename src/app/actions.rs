use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::app::{App, Route};

#[derive(Debug)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    GoTab(usize),
    NavigateUp,
    NavigateDown,
    ScrollUp,
    ScrollDown,
    JumpToStart,
    JumpToEnd,
    Select,
    Back,
    Refresh,
    FilterEnter,
    FilterKey(KeyEvent),
    FilterExit,
    FilterApply,
}

/// Process a keyboard action.
pub fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,

        Action::NextTab => {
            let route = app.route.next_tab();
            app.navigate(route);
        }

        Action::PrevTab => {
            let route = app.route.prev_tab();
            app.navigate(route);
        }

        Action::GoTab(index) => {
            if let Some(route) = Route::TABS.get(index) {
                app.navigate(*route);
            }
        }

        Action::NavigateUp => {
            app.selected = app.selected.saturating_sub(1);
            app.adjust_scroll();
        }

        Action::NavigateDown => {
            let max = app.row_count().saturating_sub(1);
            app.selected = (app.selected + 1).min(max);
            app.adjust_scroll();
        }

        Action::ScrollUp => {
            let half = (app.viewport_height / 2).max(1);
            app.selected = app.selected.saturating_sub(half);
            app.adjust_scroll();
        }

        Action::ScrollDown => {
            let half = (app.viewport_height / 2).max(1);
            let max = app.row_count().saturating_sub(1);
            app.selected = (app.selected + half).min(max);
            app.adjust_scroll();
        }

        Action::JumpToStart => {
            app.selected = 0;
            app.scroll_offset = 0;
        }

        Action::JumpToEnd => {
            app.selected = app.row_count().saturating_sub(1);
            app.adjust_scroll();
        }

        Action::Select => {
            let target = {
                let store = app.store.lock().unwrap();
                match app.route {
                    Route::TestRuns => app
                        .visible_indices(&store)
                        .get(app.selected)
                        .and_then(|&i| store.test_runs().get(i))
                        .map(|r| r.id),
                    Route::Home | Route::Reports => {
                        store.latest_test_runs().get(app.selected).map(|r| r.id)
                    }
                    _ => None,
                }
            };
            if let Some(id) = target {
                app.navigate(Route::TestRunDetail(id));
            }
        }

        Action::Back => {
            if matches!(app.route, Route::TestRunDetail(_) | Route::DirectTestRun(_)) {
                app.navigate(Route::TestRuns);
            }
        }

        Action::Refresh => {
            let syncs = app.route.syncs();
            app.pending_syncs.extend(syncs);
        }

        Action::FilterEnter => {
            app.filter_active = true;
        }

        Action::FilterKey(key) => {
            app.filter.handle_event(&crossterm::event::Event::Key(key));
            app.selected = 0;
            app.scroll_offset = 0;
        }

        Action::FilterExit => {
            app.filter = Input::default();
            app.filter_active = false;
            app.selected = 0;
            app.scroll_offset = 0;
        }

        Action::FilterApply => {
            app.filter_active = false;
        }
    }
}

pub fn trigger_action(key: KeyEvent, filter_active: bool) -> Option<Action> {
    if filter_active {
        return match key.code {
            KeyCode::Esc => Some(Action::FilterExit),
            KeyCode::Enter => Some(Action::FilterApply),
            KeyCode::Up => Some(Action::NavigateUp),
            KeyCode::Down => Some(Action::NavigateDown),
            _ => Some(Action::FilterKey(key)),
        };
    }
    map_key(key)
}

fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ScrollUp),
            KeyCode::Char('d') => Some(Action::ScrollDown),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::NavigateDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::JumpToStart),
        KeyCode::Char('G') | KeyCode::End => Some(Action::JumpToEnd),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => Some(Action::Back),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('f') | KeyCode::Char('/') => Some(Action::FilterEnter),
        KeyCode::Char(c @ '1'..='7') => Some(Action::GoTab(c as usize - '1' as usize)),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PendingSync;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn plain_keys_map_to_actions() {
        assert!(matches!(trigger_action(key(KeyCode::Char('q')), false), Some(Action::Quit)));
        assert!(matches!(trigger_action(key(KeyCode::Tab), false), Some(Action::NextTab)));
        assert!(matches!(trigger_action(key(KeyCode::Char('3')), false), Some(Action::GoTab(2))));
        assert!(trigger_action(key(KeyCode::Char('z')), false).is_none());
    }

    #[test]
    fn filter_mode_captures_printable_keys() {
        assert!(matches!(
            trigger_action(key(KeyCode::Char('q')), true),
            Some(Action::FilterKey(_))
        ));
        assert!(matches!(trigger_action(key(KeyCode::Esc), true), Some(Action::FilterExit)));
        assert!(matches!(trigger_action(key(KeyCode::Enter), true), Some(Action::FilterApply)));
    }

    #[test]
    fn select_on_runs_opens_the_detail_route() {
        let (mut app, _rx) = App::new(Route::TestRuns);
        app.pending_syncs.clear();
        app.store.lock().unwrap().set_test_runs(vec![
            serde_json::from_value(json!({"id": 8, "status": "completed"})).unwrap(),
        ]);

        handle_action(&mut app, Action::Select);

        assert_eq!(app.route, Route::TestRunDetail(8));
        assert_eq!(
            app.pending_syncs,
            vec![PendingSync::Run(8), PendingSync::Results { test_run_id: Some(8) }]
        );
    }

    #[test]
    fn select_elsewhere_is_a_no_op() {
        let (mut app, _rx) = App::new(Route::TestSuites);
        app.pending_syncs.clear();
        handle_action(&mut app, Action::Select);
        assert_eq!(app.route, Route::TestSuites);
        assert!(app.pending_syncs.is_empty());
    }

    #[test]
    fn back_returns_from_detail_to_the_runs_list() {
        let (mut app, _rx) = App::new(Route::TestRunDetail(2));
        handle_action(&mut app, Action::Back);
        assert_eq!(app.route, Route::TestRuns);
    }

    #[test]
    fn navigation_clamps_to_the_row_count() {
        let (mut app, _rx) = App::new(Route::TestRuns);
        app.store.lock().unwrap().set_test_runs(vec![
            serde_json::from_value(json!({"id": 1})).unwrap(),
            serde_json::from_value(json!({"id": 2})).unwrap(),
        ]);

        handle_action(&mut app, Action::NavigateDown);
        handle_action(&mut app, Action::NavigateDown);
        handle_action(&mut app, Action::NavigateDown);
        assert_eq!(app.selected, 1);

        handle_action(&mut app, Action::NavigateUp);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn refresh_requeues_the_route_syncs() {
        let (mut app, _rx) = App::new(Route::TestCases);
        app.pending_syncs.clear();
        handle_action(&mut app, Action::Refresh);
        assert_eq!(app.pending_syncs, vec![PendingSync::Cases]);
    }
}
