use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Connection settings for the test-management service.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional request timeout in seconds; transport defaults apply when
    /// unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

impl Config {
    /// Load `testdeck.toml` from the working directory, falling back to
    /// defaults if absent or invalid.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("testdeck.toml");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn loads_api_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("testdeck.toml"),
            "[api]\nbase_url = \"http://qa.internal:9000/api\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.api.base_url, "http://qa.internal:9000/api");
        assert_eq!(config.api.timeout_secs, Some(30));
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("testdeck.toml"), "[api\nbase_url = ").unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }
}
