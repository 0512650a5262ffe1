use thiserror::Error;

/// Failures surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body-decoding failure.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response. `detail` carries the service's own message when
    /// the body was a JSON object with a `detail` field.
    #[error("server returned {status}")]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// The service-provided message, when the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
