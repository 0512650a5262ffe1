use super::{App, PendingSync};
use crate::store::Store;

/// Completion notices from spawned sync tasks. Success and contained
/// failure both arrive here; the store's error slot tells them apart.
#[derive(Debug)]
pub enum SyncEvent {
    Finished(PendingSync),
}

pub fn handle_sync_event(app: &mut App, event: SyncEvent) {
    match event {
        SyncEvent::Finished(sync) => {
            let (error, line) = {
                let store = app.store.lock().unwrap();
                (store.error().map(str::to_string), summary_line(&store, &sync))
            };
            match error {
                Some(message) => app.notifier.error(message),
                None => app.notifier.info(line, 2),
            }
        }
    }
}

fn summary_line(store: &Store, sync: &PendingSync) -> String {
    match sync {
        PendingSync::Suites => format!("{} test suites synced", store.test_suites().len()),
        PendingSync::Cases => format!("{} test cases synced", store.test_cases().len()),
        PendingSync::Runs => format!("{} test runs synced", store.test_runs().len()),
        PendingSync::Run(id) => format!("test run {id} synced"),
        PendingSync::Results { .. } => {
            format!("{} results synced", store.test_case_results().len())
        }
        PendingSync::Templates => {
            format!("{} templates synced", store.test_run_templates().len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NotificationKind;

    #[test]
    fn finished_sync_reports_a_count() {
        let (mut app, _rx) = App::new(crate::app::Route::TestRuns);
        app.store.lock().unwrap().set_test_runs(vec![
            serde_json::from_value(serde_json::json!({"id": 1})).unwrap(),
        ]);

        handle_sync_event(&mut app, SyncEvent::Finished(PendingSync::Runs));

        let notification = app.notifier.recent().unwrap();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert_eq!(notification.message, "1 test runs synced");
    }

    #[test]
    fn finished_sync_surfaces_the_store_error() {
        let (mut app, _rx) = App::new(crate::app::Route::TestRuns);
        app.store.lock().unwrap().set_error(Some("connection refused".into()));

        handle_sync_event(&mut app, SyncEvent::Finished(PendingSync::Runs));

        let notification = app.notifier.recent().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "connection refused");
    }
}
