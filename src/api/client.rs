use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Api, ApiError, Payload};
use crate::config::ApiConfig;

/// Thin JSON client for the test-management service.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn decode(response: reqwest::Response) -> Result<Payload, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }
        let value = response.json::<Value>().await?;
        Ok(Payload::from_value(value))
    }
}

#[async_trait]
impl Api for ApiClient {
    async fn get(&self, resource: &str, query: &[(&str, &str)]) -> Result<Payload, ApiError> {
        debug!(resource, "GET");
        let mut request = self.client.get(self.url(resource));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn post(&self, resource: &str, body: Value) -> Result<Payload, ApiError> {
        debug!(resource, "POST");
        let response = self.client.post(self.url(resource)).json(&body).send().await?;
        Self::decode(response).await
    }
}

/// The service reports failures as `{"detail": ...}`; pull that message out
/// of an error body when present.
fn extract_detail(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
