//! One sync action per remote collection.
//!
//! Every action follows the same sequence: mark the store loading, fetch,
//! settle (validate and commit, or normalize the failure into the error
//! slot), then clear the loading flag on every path. Actions never return
//! errors to the caller; the committed state is the only outcome. There are
//! no retries and no cancellation, so overlapping actions interleave with
//! last-writer-wins semantics on the shared slots.

use serde_json::{Value, json};
use tracing::{debug, error, warn};

use super::{SharedStore, Store};
use crate::api::{Api, ApiError, Payload};
use crate::models::{TestCase, TestCaseResult, TestRun, TestRunTemplate, TestSuite};

/// Error committed when an array endpoint returns anything else.
pub const INVALID_FORMAT: &str = "Invalid response format from server";

/// Body sent when the suites fallback chain has to seed a starter suite.
fn default_suite_body() -> Value {
    json!({
        "id": "DEFAULT",
        "name": "Default Test Suite",
        "format": "json",
        "version": 1,
        "version_string": "1.0",
        "is_final": false,
    })
}

/// `detail` from the response body, else the error's own message, else the
/// action's fixed fallback.
fn error_message(err: &ApiError, fallback: &str) -> String {
    if let Some(detail) = err.detail() {
        return detail.to_string();
    }
    let message = err.to_string();
    if message.is_empty() { fallback.to_string() } else { message }
}

/// The single-run and results actions never consult the response `detail`;
/// they normalize with the error's message alone.
fn message_without_detail(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.is_empty() { fallback.to_string() } else { message }
}

/// Decode list elements into typed records. `None` means the elements were
/// not records at all, which is handled like a malformed payload.
fn decode_items<T: serde::de::DeserializeOwned>(items: Vec<Value>) -> Option<Vec<T>> {
    serde_json::from_value(Value::Array(items)).ok()
}

/// Shared shape of the plain collection actions: fetch an array, commit it
/// wholesale, fail safe to an empty collection.
async fn sync_collection<T>(
    store: &SharedStore,
    api: &dyn Api,
    resource: &str,
    fallback: &str,
    commit: fn(&mut Store, Vec<T>),
) where
    T: serde::de::DeserializeOwned,
{
    store.lock().unwrap().set_loading(true);

    match api.get(resource, &[]).await {
        Ok(Payload::List(items)) => match decode_items::<T>(items) {
            Some(records) => {
                debug!(resource, count = records.len(), "fetched collection");
                let mut state = store.lock().unwrap();
                commit(&mut state, records);
                state.set_error(None);
            }
            None => {
                warn!(resource, "expected an array of records");
                let mut state = store.lock().unwrap();
                commit(&mut state, Vec::new());
                state.set_error(Some(INVALID_FORMAT.to_string()));
            }
        },
        Ok(_) => {
            warn!(resource, "expected array response");
            let mut state = store.lock().unwrap();
            commit(&mut state, Vec::new());
            state.set_error(Some(INVALID_FORMAT.to_string()));
        }
        Err(err) => {
            error!(resource, %err, "fetch failed");
            let mut state = store.lock().unwrap();
            state.set_error(Some(error_message(&err, fallback)));
            commit(&mut state, Vec::new());
        }
    }

    store.lock().unwrap().set_loading(false);
}

pub async fn fetch_test_cases(store: &SharedStore, api: &dyn Api) {
    sync_collection::<TestCase>(
        store,
        api,
        "test-cases",
        "Failed to fetch test cases",
        Store::set_test_cases,
    )
    .await;
}

pub async fn fetch_test_runs(store: &SharedStore, api: &dyn Api) {
    sync_collection::<TestRun>(
        store,
        api,
        "test-runs",
        "Failed to fetch test runs",
        Store::set_test_runs,
    )
    .await;
}

pub async fn fetch_test_run_templates(store: &SharedStore, api: &dyn Api) {
    sync_collection::<TestRunTemplate>(
        store,
        api,
        "test-run-templates",
        "Failed to fetch test run templates",
        Store::set_test_run_templates,
    )
    .await;
}

/// Synchronize the suites collection.
///
/// Suites are the one collection with recovery strategies: an empty primary
/// response falls back to the raw direct query, and an empty direct query
/// falls back to seeding a default suite via POST. Each step contains its
/// own failures; an all-empty outcome commits an empty collection without
/// raising an error.
pub async fn fetch_test_suites(store: &SharedStore, api: &dyn Api) {
    store.lock().unwrap().set_loading(true);

    match api.get("test-suites", &[]).await {
        Ok(Payload::List(items)) => match decode_items::<TestSuite>(items) {
            Some(mut suites) if !suites.is_empty() => {
                for suite in &mut suites {
                    suite.normalize_id();
                }
                debug!(count = suites.len(), "fetched test suites");
                let mut state = store.lock().unwrap();
                state.set_test_suites(suites);
                state.set_error(None);
            }
            Some(_) => fetch_test_suites_direct(store, api).await,
            None => {
                warn!("expected an array of suite records");
                let mut state = store.lock().unwrap();
                state.set_test_suites(Vec::new());
                state.set_error(Some(INVALID_FORMAT.to_string()));
            }
        },
        Ok(_) => {
            warn!("expected array response for test suites");
            let mut state = store.lock().unwrap();
            state.set_test_suites(Vec::new());
            state.set_error(Some(INVALID_FORMAT.to_string()));
        }
        Err(err) => {
            error!(%err, "failed to fetch test suites");
            let mut state = store.lock().unwrap();
            state.set_error(Some(error_message(&err, "Failed to fetch test suites")));
            state.set_test_suites(Vec::new());
        }
    }

    store.lock().unwrap().set_loading(false);
}

/// Second step of the suites chain: the raw direct query. Rows are
/// committed verbatim, without id normalization. Failures here empty the
/// collection but leave the error slot untouched.
async fn fetch_test_suites_direct(store: &SharedStore, api: &dyn Api) {
    debug!("no test suites found, trying direct query");

    match api.get("test-suites", &[("raw", "true")]).await {
        Ok(Payload::List(items)) if !items.is_empty() => match decode_items::<TestSuite>(items) {
            Some(suites) => {
                debug!(count = suites.len(), "fetched test suites via direct query");
                let mut state = store.lock().unwrap();
                state.set_test_suites(suites);
                state.set_error(None);
            }
            None => {
                warn!("direct query returned non-record elements");
                store.lock().unwrap().set_test_suites(Vec::new());
            }
        },
        Ok(_) => create_default_suite(store, api).await,
        Err(err) => {
            error!(%err, "direct suite query failed");
            store.lock().unwrap().set_test_suites(Vec::new());
        }
    }
}

/// Last step of the suites chain: seed one default suite. A response with
/// no usable record is a legitimate terminal outcome, not a failure.
async fn create_default_suite(store: &SharedStore, api: &dyn Api) {
    debug!("no test suites found, creating a default one");

    match api.post("test-suites", default_suite_body()).await {
        Ok(Payload::Item(value)) if value.is_object() => {
            match serde_json::from_value::<TestSuite>(value) {
                Ok(suite) => {
                    debug!("created default test suite");
                    let mut state = store.lock().unwrap();
                    state.set_test_suites(vec![suite]);
                    state.set_error(None);
                }
                Err(_) => {
                    warn!("created suite record did not decode");
                    store.lock().unwrap().set_test_suites(Vec::new());
                }
            }
        }
        Ok(_) => {
            debug!("default suite creation returned no data");
            store.lock().unwrap().set_test_suites(Vec::new());
        }
        Err(err) => {
            error!(%err, "failed to create default test suite");
            store.lock().unwrap().set_test_suites(Vec::new());
        }
    }
}

/// Fetch one run into the `current_test_run` slot. The slot is left as it
/// was on any failure.
pub async fn fetch_test_run(store: &SharedStore, api: &dyn Api, id: i64) {
    store.lock().unwrap().set_loading(true);

    let resource = format!("test-runs/{id}");
    match api.get(&resource, &[]).await {
        Ok(Payload::Item(value)) if value.is_object() => {
            match serde_json::from_value::<TestRun>(value) {
                Ok(run) => {
                    let mut state = store.lock().unwrap();
                    state.set_current_test_run(Some(run));
                    state.set_error(None);
                }
                Err(_) => {
                    warn!(id, "test run record did not decode");
                    store.lock().unwrap().set_error(Some(INVALID_FORMAT.to_string()));
                }
            }
        }
        Ok(_) => {
            warn!(id, "expected a run record");
            store.lock().unwrap().set_error(Some(INVALID_FORMAT.to_string()));
        }
        Err(err) => {
            error!(id, %err, "failed to fetch test run");
            store
                .lock()
                .unwrap()
                .set_error(Some(message_without_detail(&err, "Failed to fetch test run")));
        }
    }

    store.lock().unwrap().set_loading(false);
}

/// Synchronize the results collection, optionally restricted to one run.
/// The collection is left as it was on any failure.
pub async fn fetch_test_case_results(
    store: &SharedStore,
    api: &dyn Api,
    test_run_id: Option<i64>,
) {
    store.lock().unwrap().set_loading(true);

    let id_string;
    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(id) = test_run_id {
        id_string = id.to_string();
        query.push(("test_run_id", &id_string));
    }

    match api.get("test-case-results", &query).await {
        Ok(Payload::List(items)) => match decode_items::<TestCaseResult>(items) {
            Some(results) => {
                debug!(count = results.len(), "fetched test case results");
                let mut state = store.lock().unwrap();
                state.set_test_case_results(results);
                state.set_error(None);
            }
            None => {
                warn!("expected result records");
                store.lock().unwrap().set_error(Some(INVALID_FORMAT.to_string()));
            }
        },
        Ok(_) => {
            warn!("expected array response for test case results");
            store.lock().unwrap().set_error(Some(INVALID_FORMAT.to_string()));
        }
        Err(err) => {
            error!(%err, "failed to fetch test case results");
            store.lock().unwrap().set_error(Some(message_without_detail(
                &err,
                "Failed to fetch test case results",
            )));
        }
    }

    store.lock().unwrap().set_loading(false);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Scripted [`Api`] double: hands out queued responses in order and
    /// records every call it sees.
    #[derive(Default)]
    struct FakeApi {
        responses: Mutex<VecDeque<Result<Payload, ApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn new(responses: Vec<Result<Payload, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn next(&self, call: String) -> Result<Payload, ApiError> {
            self.calls.lock().unwrap().push(call);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Payload::Item(Value::Null)))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Api for FakeApi {
        async fn get(&self, resource: &str, query: &[(&str, &str)]) -> Result<Payload, ApiError> {
            let mut call = format!("GET {resource}");
            for (key, value) in query {
                call.push_str(&format!("?{key}={value}"));
            }
            self.next(call)
        }

        async fn post(&self, resource: &str, _body: Value) -> Result<Payload, ApiError> {
            self.next(format!("POST {resource}"))
        }
    }

    fn list(value: Value) -> Result<Payload, ApiError> {
        Ok(Payload::from_value(value))
    }

    fn transport(message: &str) -> Result<Payload, ApiError> {
        Err(ApiError::Transport(message.to_string()))
    }

    #[tokio::test]
    async fn malformed_response_empties_collection_and_sets_fixed_error() {
        let store = Store::shared();
        let api = FakeApi::new(vec![list(json!({"unexpected": "object"}))]);

        fetch_test_runs(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_runs().is_empty());
        assert_eq!(state.error(), Some(INVALID_FORMAT));
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn non_record_elements_count_as_malformed() {
        let store = Store::shared();
        let api = FakeApi::new(vec![list(json!([1, 2, 3]))]);

        fetch_test_cases(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_cases().is_empty());
        assert_eq!(state.error(), Some(INVALID_FORMAT));
    }

    #[tokio::test]
    async fn successful_fetch_commits_and_clears_error() {
        let store = Store::shared();
        store.lock().unwrap().set_error(Some("stale".into()));
        let api = FakeApi::new(vec![list(json!([{"id": 1}, {"id": 2}]))]);

        fetch_test_runs(&store, &api).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_runs().len(), 2);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn network_failure_prefers_the_detail_message() {
        let store = Store::shared();
        let api = FakeApi::new(vec![Err(ApiError::Status {
            status: 500,
            detail: Some("database is locked".into()),
        })]);

        fetch_test_run_templates(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_run_templates().is_empty());
        assert_eq!(state.error(), Some("database is locked"));
    }

    #[tokio::test]
    async fn network_failure_without_detail_uses_the_error_message() {
        let store = Store::shared();
        let api = FakeApi::new(vec![Err(ApiError::Status { status: 502, detail: None })]);

        fetch_test_runs(&store, &api).await;

        assert_eq!(store.lock().unwrap().error(), Some("server returned 502"));
    }

    #[tokio::test]
    async fn blank_error_message_falls_back_to_the_action_string() {
        let store = Store::shared();
        let api = FakeApi::new(vec![transport("")]);

        fetch_test_cases(&store, &api).await;

        assert_eq!(store.lock().unwrap().error(), Some("Failed to fetch test cases"));
    }

    /// Records the loading flag as seen from inside the fetch.
    struct LoadingProbe {
        store: SharedStore,
        observed: Mutex<Vec<bool>>,
    }

    #[async_trait]
    impl Api for LoadingProbe {
        async fn get(&self, _resource: &str, _query: &[(&str, &str)]) -> Result<Payload, ApiError> {
            self.observed.lock().unwrap().push(self.store.lock().unwrap().loading());
            Ok(Payload::List(Vec::new()))
        }

        async fn post(&self, _resource: &str, _body: Value) -> Result<Payload, ApiError> {
            self.observed.lock().unwrap().push(self.store.lock().unwrap().loading());
            Ok(Payload::Item(Value::Null))
        }
    }

    #[tokio::test]
    async fn loading_is_true_only_while_the_action_is_in_flight() {
        let store = Store::shared();
        let api = LoadingProbe {
            store: Arc::clone(&store),
            observed: Mutex::new(Vec::new()),
        };
        assert!(!store.lock().unwrap().loading());

        fetch_test_runs(&store, &api).await;

        assert_eq!(*api.observed.lock().unwrap(), vec![true]);
        assert!(!store.lock().unwrap().loading());
    }

    #[tokio::test]
    async fn suites_primary_path_normalizes_ids() {
        let store = Store::shared();
        let api = FakeApi::new(vec![list(json!([
            {"id": null, "db_id": 11, "name": "alpha"},
            {"id": "S2", "name": "beta"},
        ]))]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_suites()[0].id.as_deref(), Some("11"));
        assert_eq!(state.test_suites()[1].id.as_deref(), Some("S2"));
        assert_eq!(state.error(), None);
        assert_eq!(api.calls(), vec!["GET test-suites"]);
    }

    #[tokio::test]
    async fn suites_raw_fallback_commits_rows_verbatim() {
        let store = Store::shared();
        let api = FakeApi::new(vec![
            list(json!([])),
            list(json!([{"id": null, "db_id": 3, "name": "raw row"}])),
        ]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_suites().len(), 1);
        // No normalization on the raw path: the missing id stays missing.
        assert_eq!(state.test_suites()[0].id, None);
        assert_eq!(state.error(), None);
        assert_eq!(api.calls(), vec!["GET test-suites", "GET test-suites?raw=true"]);
    }

    #[tokio::test]
    async fn suites_chain_falls_through_to_creation() {
        let store = Store::shared();
        let api = FakeApi::new(vec![
            list(json!([])),
            list(json!([])),
            Ok(Payload::Item(json!({
                "id": "DEFAULT",
                "name": "Default Test Suite",
                "format": "json",
                "version": 1,
                "version_string": "1.0",
                "is_final": false,
            }))),
        ]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_suites().len(), 1);
        assert_eq!(state.test_suites()[0].id.as_deref(), Some("DEFAULT"));
        assert_eq!(state.error(), None);
        assert_eq!(
            api.calls(),
            vec!["GET test-suites", "GET test-suites?raw=true", "POST test-suites"]
        );
    }

    #[tokio::test]
    async fn suites_chain_accepts_an_all_empty_outcome() {
        let store = Store::shared();
        let api = FakeApi::new(vec![
            list(json!([])),
            list(json!([])),
            Ok(Payload::Item(Value::Null)),
        ]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_suites().is_empty());
        assert_eq!(state.error(), None);
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn suites_step_failures_are_contained() {
        let store = Store::shared();
        let api = FakeApi::new(vec![list(json!([])), transport("connection reset")]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_suites().is_empty());
        // The direct-query catch empties the collection without touching
        // the error slot.
        assert_eq!(state.error(), None);
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn suites_creation_failure_is_contained() {
        let store = Store::shared();
        let api = FakeApi::new(vec![
            list(json!([])),
            list(json!([])),
            transport("connection reset"),
        ]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_suites().is_empty());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn suites_primary_failure_sets_error_and_empties() {
        let store = Store::shared();
        store.lock().unwrap().set_test_suites(vec![TestSuite::default()]);
        let api = FakeApi::new(vec![Err(ApiError::Status {
            status: 500,
            detail: Some("boom".into()),
        })]);

        fetch_test_suites(&store, &api).await;

        let state = store.lock().unwrap();
        assert!(state.test_suites().is_empty());
        assert_eq!(state.error(), Some("boom"));
        // The chain never re-ascends: one request, no fallback.
        assert_eq!(api.calls(), vec!["GET test-suites"]);
    }

    #[tokio::test]
    async fn current_run_is_committed_on_success() {
        let store = Store::shared();
        let api = FakeApi::new(vec![Ok(Payload::Item(json!({"id": 9, "status": "running"})))]);

        fetch_test_run(&store, &api, 9).await;

        let state = store.lock().unwrap();
        assert_eq!(state.current_test_run().map(|r| r.id), Some(9));
        assert_eq!(state.error(), None);
        assert_eq!(api.calls(), vec!["GET test-runs/9"]);
    }

    #[tokio::test]
    async fn current_run_is_left_unchanged_on_failure() {
        let store = Store::shared();
        {
            let mut state = store.lock().unwrap();
            state.set_current_test_run(Some(
                serde_json::from_value(json!({"id": 4, "status": "completed"})).unwrap(),
            ));
        }
        let api = FakeApi::new(vec![Err(ApiError::Status {
            status: 404,
            detail: Some("TestRun not found".into()),
        })]);

        fetch_test_run(&store, &api, 9).await;

        let state = store.lock().unwrap();
        assert_eq!(state.current_test_run().map(|r| r.id), Some(4));
        // This action skips the detail tier: the error's own message wins.
        assert_eq!(state.error(), Some("server returned 404"));
    }

    #[tokio::test]
    async fn results_query_carries_the_run_filter() {
        let store = Store::shared();
        let api = FakeApi::new(vec![list(json!([
            {"test_run_id": 5, "result": "pass"},
            {"test_run_id": 5, "result": "fail"},
        ]))]);

        fetch_test_case_results(&store, &api, Some(5)).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_case_results().len(), 2);
        assert_eq!(api.calls(), vec!["GET test-case-results?test_run_id=5"]);
    }

    #[tokio::test]
    async fn results_are_left_unchanged_on_failure() {
        let store = Store::shared();
        {
            let mut state = store.lock().unwrap();
            state.set_test_case_results(vec![
                serde_json::from_value(json!({"test_run_id": 1, "result": "pass"})).unwrap(),
            ]);
        }
        let api = FakeApi::new(vec![transport("connection refused")]);

        fetch_test_case_results(&store, &api, None).await;

        let state = store.lock().unwrap();
        assert_eq!(state.test_case_results().len(), 1);
        assert_eq!(state.error(), Some("connection refused"));
        assert!(!state.loading());
    }
}
