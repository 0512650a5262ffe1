mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

use async_trait::async_trait;
use serde_json::Value;

/// A decoded response body, tagged by shape so callers can branch without
/// re-inspecting the JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body was a JSON array.
    List(Vec<Value>),
    /// Any other JSON value; single-record endpoints return objects.
    Item(Value),
}

impl Payload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::List(items),
            other => Payload::Item(other),
        }
    }
}

/// HTTP access used by the sync actions. The production implementation is
/// [`ApiClient`]; tests substitute a scripted fake.
#[async_trait]
pub trait Api: Send + Sync {
    /// `GET <base>/<resource>`, with optional query pairs.
    async fn get(&self, resource: &str, query: &[(&str, &str)]) -> Result<Payload, ApiError>;

    /// `POST <base>/<resource>` with a JSON body.
    async fn post(&self, resource: &str, body: Value) -> Result<Payload, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_become_lists() {
        let payload = Payload::from_value(json!([{"id": 1}, {"id": 2}]));
        assert!(matches!(payload, Payload::List(ref items) if items.len() == 2));
    }

    #[test]
    fn everything_else_is_an_item() {
        assert!(matches!(Payload::from_value(json!({"id": 1})), Payload::Item(_)));
        assert!(matches!(Payload::from_value(json!(null)), Payload::Item(Value::Null)));
        assert!(matches!(Payload::from_value(json!("oops")), Payload::Item(_)));
    }
}
