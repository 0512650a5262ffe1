use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A test suite record as served by the API.
///
/// Decoding is deliberately lenient: the service keys suites by a string
/// id, but historical rows can carry a numeric or missing id with the
/// database key only present in `db_id`. Unknown fields are carried
/// through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub db_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub version_string: String,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestSuite {
    /// Ensure `id` is present: fall back to the stringified database key,
    /// then to an empty string.
    pub fn normalize_id(&mut self) {
        if self.id.is_none() {
            self.id = Some(self.db_id.clone().unwrap_or_default());
        }
    }
}

/// Accepts a JSON string, number or null where a string id is expected.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
