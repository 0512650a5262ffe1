use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Outcome;

/// A single test-case outcome, attached to exactly one test run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCaseResult {
    #[serde(default)]
    pub test_run_id: i64,
    #[serde(default)]
    pub test_case_id: i64,
    #[serde(default)]
    pub result: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestCaseResult {
    pub fn outcome(&self) -> Outcome {
        Outcome::parse(&self.result)
    }

    pub fn comment(&self) -> Option<&str> {
        self.fields.get("comment").and_then(Value::as_str)
    }

    pub fn logs(&self) -> Option<&str> {
        self.fields.get("logs").and_then(Value::as_str)
    }
}

/// Pass/fail aggregate for one test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub other: usize,
    /// Percentage of passed results, rounded to the nearest integer; 0 for
    /// an empty run.
    pub pass_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_classifies_its_outcome() {
        let result: TestCaseResult = serde_json::from_value(json!({
            "test_run_id": 4,
            "test_case_id": 9,
            "result": "PASS",
            "comment": "rerun after flake",
        }))
        .unwrap();
        assert_eq!(result.outcome(), Outcome::Pass);
        assert_eq!(result.comment(), Some("rerun after flake"));
    }

    #[test]
    fn missing_fields_default() {
        let result: TestCaseResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result.test_run_id, 0);
        assert_eq!(result.outcome(), Outcome::Other);
        assert_eq!(result.logs(), None);
    }
}
