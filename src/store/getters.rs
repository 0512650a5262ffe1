use super::Store;
use crate::models::{Outcome, RunSummary, TestCase, TestRun, TestSuite};

/// How many runs the "latest runs" projection returns.
pub const LATEST_RUN_COUNT: usize = 2;

impl Store {
    /// First suite whose id matches exactly. Suites without an id (raw
    /// fallback rows are committed un-normalized) never match.
    pub fn test_suite(&self, id: &str) -> Option<&TestSuite> {
        self.test_suites().iter().find(|s| s.id.as_deref() == Some(id))
    }

    pub fn test_case(&self, id: i64) -> Option<&TestCase> {
        self.test_cases().iter().find(|c| c.id() == Some(id))
    }

    pub fn test_run(&self, id: i64) -> Option<&TestRun> {
        self.test_runs().iter().find(|r| r.id == id)
    }

    /// The most recent runs by numeric id, newest first. Sorts a copied
    /// index so the cached order is untouched.
    pub fn latest_test_runs(&self) -> Vec<&TestRun> {
        let mut runs: Vec<&TestRun> = self.test_runs().iter().collect();
        runs.sort_by(|a, b| b.id.cmp(&a.id));
        runs.truncate(LATEST_RUN_COUNT);
        runs
    }

    /// Pass/fail aggregate over the cached results for one run.
    pub fn run_summary(&self, test_run_id: i64) -> RunSummary {
        let mut summary = RunSummary::default();
        for result in self
            .test_case_results()
            .iter()
            .filter(|r| r.test_run_id == test_run_id)
        {
            summary.total += 1;
            match result.outcome() {
                Outcome::Pass => summary.passed += 1,
                Outcome::Fail => summary.failed += 1,
                Outcome::Skip => summary.skipped += 1,
                Outcome::Other => {}
            }
        }
        summary.other = summary.total - summary.passed - summary.failed - summary.skipped;
        summary.pass_rate = if summary.total > 0 {
            ((summary.passed as f64 / summary.total as f64) * 100.0).round() as u32
        } else {
            0
        };
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestCaseResult;
    use serde_json::json;

    fn run(id: i64) -> TestRun {
        serde_json::from_value(json!({"id": id, "status": "completed"})).unwrap()
    }

    fn result(test_run_id: i64, outcome: &str) -> TestCaseResult {
        serde_json::from_value(json!({"test_run_id": test_run_id, "result": outcome})).unwrap()
    }

    #[test]
    fn lookups_on_empty_collections_return_none() {
        let store = Store::default();
        assert!(store.test_suite("S1").is_none());
        assert!(store.test_case(1).is_none());
        assert!(store.test_run(1).is_none());
    }

    #[test]
    fn suite_lookup_skips_missing_ids() {
        let mut store = Store::default();
        store.set_test_suites(vec![
            serde_json::from_value(json!({"id": null, "name": "raw row"})).unwrap(),
            serde_json::from_value(json!({"id": "S2", "name": "smoke"})).unwrap(),
        ]);
        assert_eq!(store.test_suite("S2").map(|s| s.name.as_str()), Some("smoke"));
        assert!(store.test_suite("S1").is_none());
    }

    #[test]
    fn latest_runs_sorts_by_id_descending() {
        let mut store = Store::default();
        store.set_test_runs(vec![run(1), run(5), run(3)]);
        let latest: Vec<i64> = store.latest_test_runs().iter().map(|r| r.id).collect();
        assert_eq!(latest, vec![5, 3]);
        // The cached collection keeps its original order.
        let cached: Vec<i64> = store.test_runs().iter().map(|r| r.id).collect();
        assert_eq!(cached, vec![1, 5, 3]);
    }

    #[test]
    fn latest_runs_with_fewer_than_two() {
        let mut store = Store::default();
        assert!(store.latest_test_runs().is_empty());
        store.set_test_runs(vec![run(7)]);
        assert_eq!(store.latest_test_runs().len(), 1);
    }

    #[test]
    fn summary_counts_case_insensitively() {
        let mut store = Store::default();
        store.set_test_case_results(vec![
            result(1, "Pass"),
            result(1, "fail"),
            result(1, "SKIP"),
            result(1, "x"),
            result(2, "pass"),
        ]);
        let summary = store.run_summary(1);
        assert_eq!(
            summary,
            RunSummary {
                total: 4,
                passed: 1,
                failed: 1,
                skipped: 1,
                other: 1,
                pass_rate: 25,
            }
        );
    }

    #[test]
    fn summary_of_unknown_run_is_empty() {
        let store = Store::default();
        let summary = store.run_summary(99);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate, 0);
    }

    #[test]
    fn pass_rate_rounds_to_nearest() {
        let mut store = Store::default();
        store.set_test_case_results(vec![
            result(1, "pass"),
            result(1, "pass"),
            result(1, "fail"),
        ]);
        // 2/3 = 66.66... rounds to 67.
        assert_eq!(store.run_summary(1).pass_rate, 67);
    }
}
