use tokio::sync::mpsc;
use tui_input::Input;

use crate::store::{SharedStore, Store};

pub mod actions;
pub mod events;
pub mod notifier;
pub mod route;

pub use actions::{Action, handle_action, trigger_action};
pub use events::{SyncEvent, handle_sync_event};
pub use notifier::{NotificationKind, Notifier};
pub use route::Route;

/// A queued fetch, produced by navigation or an explicit refresh and
/// started by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSync {
    Suites,
    Cases,
    Runs,
    Run(i64),
    Results { test_run_id: Option<i64> },
    Templates,
}

pub struct App {
    pub store: SharedStore,
    pub route: Route,
    pub selected: usize,
    pub scroll_offset: usize,
    pub viewport_height: usize,
    pub filter_active: bool,
    pub filter: Input,
    pub spinner_tick: usize,
    pub pending_syncs: Vec<PendingSync>,
    pub event_tx: mpsc::UnboundedSender<SyncEvent>,
    pub should_quit: bool,
    pub notifier: Notifier,
}

impl App {
    pub fn new(route: Route) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let app = Self {
            store: Store::shared(),
            route,
            selected: 0,
            scroll_offset: 0,
            viewport_height: 0,
            filter_active: false,
            filter: Input::default(),
            spinner_tick: 0,
            pending_syncs: route.syncs(),
            event_tx,
            should_quit: false,
            notifier: Notifier::new(),
        };
        (app, event_rx)
    }

    /// Switch routes, reset list state and queue the route's fetches.
    /// Re-entering the active route still queues them, matching a view
    /// re-fetching on mount.
    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            self.selected = 0;
            self.scroll_offset = 0;
            self.filter = Input::default();
            self.filter_active = false;
        }
        self.route = route;
        self.pending_syncs.extend(route.syncs());
    }

    /// Indices into the current route's backing collection, respecting the
    /// filter query. Views and navigation share this so selection always
    /// lands on a rendered row.
    pub fn visible_indices(&self, store: &Store) -> Vec<usize> {
        let query = self.filter.value().to_lowercase();
        let matches = |text: &str| query.is_empty() || text.to_lowercase().contains(&query);
        match self.route {
            Route::TestSuites => store
                .test_suites()
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    matches(&s.name) || s.id.as_deref().is_some_and(|id| matches(id))
                })
                .map(|(i, _)| i)
                .collect(),
            Route::TestCases => store
                .test_cases()
                .iter()
                .enumerate()
                .filter(|(_, c)| matches(c.title()) || matches(c.case_id()))
                .map(|(i, _)| i)
                .collect(),
            Route::TestRuns => store
                .test_runs()
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    query.is_empty() || r.id.to_string().contains(&query) || matches(r.status())
                })
                .map(|(i, _)| i)
                .collect(),
            Route::TestRunTemplates => store
                .test_run_templates()
                .iter()
                .enumerate()
                .filter(|(_, t)| matches(t.name()) || matches(t.template_id()))
                .map(|(i, _)| i)
                .collect(),
            Route::TestRunDetail(id) | Route::DirectTestRun(id) => store
                .test_case_results()
                .iter()
                .enumerate()
                .filter(|(_, r)| r.test_run_id == id)
                .map(|(i, _)| i)
                .collect(),
            Route::Home | Route::Reports => (0..store.latest_test_runs().len()).collect(),
            Route::Schema => Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        let store = self.store.lock().unwrap();
        self.visible_indices(&store).len()
    }

    pub fn adjust_scroll(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = self.selected - self.viewport_height + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn navigation_resets_list_state_and_queues_syncs() {
        let (mut app, _rx) = App::new(Route::Home);
        app.pending_syncs.clear();
        app.selected = 3;

        app.navigate(Route::TestSuites);

        assert_eq!(app.selected, 0);
        assert_eq!(app.pending_syncs, vec![PendingSync::Suites]);
    }

    #[test]
    fn renavigating_the_same_route_keeps_selection() {
        let (mut app, _rx) = App::new(Route::TestRuns);
        app.pending_syncs.clear();
        app.selected = 2;

        app.navigate(Route::TestRuns);

        assert_eq!(app.selected, 2);
        assert_eq!(app.pending_syncs, vec![PendingSync::Runs]);
    }

    #[test]
    fn filter_narrows_visible_rows() {
        let (mut app, _rx) = App::new(Route::TestSuites);
        app.store.lock().unwrap().set_test_suites(vec![
            serde_json::from_value(json!({"id": "S1", "name": "conformance"})).unwrap(),
            serde_json::from_value(json!({"id": "S2", "name": "smoke"})).unwrap(),
        ]);

        assert_eq!(app.row_count(), 2);
        app.filter = Input::new("smo".into());
        let store = app.store.lock().unwrap();
        assert_eq!(app.visible_indices(&store), vec![1]);
    }

    #[test]
    fn detail_route_rows_are_results_for_that_run() {
        let (mut app, _rx) = App::new(Route::TestRunDetail(5));
        app.store.lock().unwrap().set_test_case_results(vec![
            serde_json::from_value(json!({"test_run_id": 4, "result": "pass"})).unwrap(),
            serde_json::from_value(json!({"test_run_id": 5, "result": "fail"})).unwrap(),
        ]);

        let store = app.store.lock().unwrap();
        assert_eq!(app.visible_indices(&store), vec![1]);
    }
}
