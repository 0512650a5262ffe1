pub mod actions;
mod getters;

use std::sync::{Arc, Mutex};

use crate::models::{TestCase, TestCaseResult, TestRun, TestRunTemplate, TestSuite};

/// In-memory cache of the service's collections plus the shared
/// loading/error slots.
///
/// The store is a pure value holder: every setter overwrites its slot
/// wholesale and never fails. Validation and error normalization happen in
/// the sync actions; derived projections live in [`getters`].
#[derive(Debug, Default)]
pub struct Store {
    test_suites: Vec<TestSuite>,
    test_cases: Vec<TestCase>,
    test_runs: Vec<TestRun>,
    current_test_run: Option<TestRun>,
    test_case_results: Vec<TestCaseResult>,
    test_run_templates: Vec<TestRunTemplate>,
    loading: bool,
    error: Option<String>,
}

/// One store instance is shared by the UI and every in-flight sync action.
/// Locks are held per commit, never across an await, so concurrent actions
/// interleave and the `loading`/`error` slots are last-writer-wins.
pub type SharedStore = Arc<Mutex<Store>>;

impl Store {
    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Store::default()))
    }

    pub fn set_test_suites(&mut self, suites: Vec<TestSuite>) {
        self.test_suites = suites;
    }

    pub fn set_test_cases(&mut self, cases: Vec<TestCase>) {
        self.test_cases = cases;
    }

    pub fn set_test_runs(&mut self, runs: Vec<TestRun>) {
        self.test_runs = runs;
    }

    pub fn set_current_test_run(&mut self, run: Option<TestRun>) {
        self.current_test_run = run;
    }

    pub fn set_test_case_results(&mut self, results: Vec<TestCaseResult>) {
        self.test_case_results = results;
    }

    pub fn set_test_run_templates(&mut self, templates: Vec<TestRunTemplate>) {
        self.test_run_templates = templates;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn test_suites(&self) -> &[TestSuite] {
        &self.test_suites
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn test_runs(&self) -> &[TestRun] {
        &self.test_runs
    }

    pub fn current_test_run(&self) -> Option<&TestRun> {
        self.current_test_run.as_ref()
    }

    pub fn test_case_results(&self) -> &[TestCaseResult] {
        &self.test_case_results
    }

    pub fn test_run_templates(&self) -> &[TestRunTemplate] {
        &self.test_run_templates
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
