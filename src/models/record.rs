use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A test run. Only the numeric id is interpreted by the client (it orders
/// the "latest runs" projection and keys result lookups); everything else
/// is carried through for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(default)]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestRun {
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn status(&self) -> &str {
        self.field_str("status").unwrap_or("-")
    }

    pub fn created_at(&self) -> &str {
        self.field_str("created_at").unwrap_or("-")
    }
}

/// An opaque test case record; the client only interprets a few well-known
/// fields for display and lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestCase {
    /// Database key, used by the lookup getter.
    pub fn id(&self) -> Option<i64> {
        self.fields.get("id").and_then(Value::as_i64)
    }

    pub fn case_id(&self) -> &str {
        self.field_str("case_id").unwrap_or("-")
    }

    pub fn title(&self) -> &str {
        self.field_str("title").unwrap_or("-")
    }

    pub fn suite_id(&self) -> &str {
        self.field_str("test_suite_id").unwrap_or("-")
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// An opaque run template record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRunTemplate {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TestRunTemplate {
    pub fn template_id(&self) -> &str {
        self.field_str("template_id").unwrap_or("-")
    }

    pub fn name(&self) -> &str {
        self.field_str("name").unwrap_or("-")
    }

    pub fn description(&self) -> &str {
        self.field_str("description").unwrap_or("")
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_decodes_id_and_keeps_the_rest() {
        let run: TestRun = serde_json::from_value(json!({
            "id": 12,
            "status": "completed",
            "created_at": "2024-03-01T10:00:00",
            "operator_id": 3,
        }))
        .unwrap();
        assert_eq!(run.id, 12);
        assert_eq!(run.status(), "completed");
        assert_eq!(run.fields.get("operator_id"), Some(&json!(3)));
    }

    #[test]
    fn run_without_id_defaults_to_zero() {
        let run: TestRun = serde_json::from_value(json!({"status": "queued"})).unwrap();
        assert_eq!(run.id, 0);
    }

    #[test]
    fn case_accessors_fall_back_to_placeholders() {
        let case = TestCase::default();
        assert_eq!(case.id(), None);
        assert_eq!(case.title(), "-");
        assert_eq!(case.case_id(), "-");
    }
}
