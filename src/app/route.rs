use super::PendingSync;

/// Navigation surface of the client. Paths mirror the service's web
/// frontend so deep links in logs and docs line up with the terminal
/// views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    TestSuites,
    TestCases,
    TestRuns,
    TestRunDetail(i64),
    TestRunTemplates,
    DirectTestRun(i64),
    Reports,
    Schema,
}

impl Route {
    /// Tab order for the top-level views.
    pub const TABS: [Route; 7] = [
        Route::Home,
        Route::TestSuites,
        Route::TestCases,
        Route::TestRuns,
        Route::TestRunTemplates,
        Route::Reports,
        Route::Schema,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::TestSuites => "Suites",
            Route::TestCases => "Cases",
            Route::TestRuns => "Runs",
            Route::TestRunDetail(_) => "Run Detail",
            Route::TestRunTemplates => "Templates",
            Route::DirectTestRun(_) => "Direct Run",
            Route::Reports => "Reports",
            Route::Schema => "Schema",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::TestSuites => "/test-suites".into(),
            Route::TestCases => "/test-cases".into(),
            Route::TestRuns => "/test-runs".into(),
            Route::TestRunDetail(id) => format!("/test-runs/{id}"),
            Route::TestRunTemplates => "/test-run-templates".into(),
            Route::DirectTestRun(id) => format!("/direct-test-run/{id}"),
            Route::Reports => "/reports".into(),
            Route::Schema => "/schema".into(),
        }
    }

    /// Parse a path the way the web frontend's router would.
    pub fn parse(path: &str) -> Option<Route> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match parts.as_slice() {
            [] => Some(Route::Home),
            ["test-suites"] => Some(Route::TestSuites),
            ["test-cases"] => Some(Route::TestCases),
            ["test-runs"] => Some(Route::TestRuns),
            ["test-runs", id] => id.parse().ok().map(Route::TestRunDetail),
            ["test-run-templates"] => Some(Route::TestRunTemplates),
            ["direct-test-run", id] => id.parse().ok().map(Route::DirectTestRun),
            ["reports"] => Some(Route::Reports),
            ["schema"] => Some(Route::Schema),
            _ => None,
        }
    }

    /// Collections a view synchronizes when it becomes active. Mirrors the
    /// fetches the corresponding web view dispatched on mount.
    pub fn syncs(&self) -> Vec<PendingSync> {
        match self {
            Route::Home | Route::Reports => {
                vec![PendingSync::Runs, PendingSync::Results { test_run_id: None }]
            }
            Route::TestSuites => vec![PendingSync::Suites],
            Route::TestCases => vec![PendingSync::Cases],
            Route::TestRuns => vec![PendingSync::Runs],
            Route::TestRunDetail(id) | Route::DirectTestRun(id) => vec![
                PendingSync::Run(*id),
                PendingSync::Results { test_run_id: Some(*id) },
            ],
            Route::TestRunTemplates => vec![PendingSync::Templates],
            Route::Schema => Vec::new(),
        }
    }

    /// Which tab this route highlights; detail routes light up their
    /// parent list.
    pub fn tab_index(&self) -> usize {
        let tab = match self {
            Route::TestRunDetail(_) | Route::DirectTestRun(_) => Route::TestRuns,
            other => *other,
        };
        Route::TABS.iter().position(|t| *t == tab).unwrap_or(0)
    }

    pub fn next_tab(&self) -> Route {
        Route::TABS[(self.tab_index() + 1) % Route::TABS.len()]
    }

    pub fn prev_tab(&self) -> Route {
        let len = Route::TABS.len();
        Route::TABS[(self.tab_index() + len - 1) % len]
    }
}
