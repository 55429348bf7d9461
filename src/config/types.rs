use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

/// Gallery backend serving the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host (+ port), e.g. "http://localhost:3000".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the collection resource, joined onto `base_url`.
    #[serde(default = "default_collection_path")]
    pub collection_path: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Host that turns a raw file into a durable URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingConfig {
    #[serde(default = "default_staging_endpoint")]
    pub endpoint: String,
    /// Sent as the `key` query parameter when present.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Clear staged input and close the form after a failed attempt too
    /// (default: true). When false, only a successful attempt resets.
    #[serde(default = "default_reset_on_failure")]
    pub reset_on_failure: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_collection_path() -> String {
    "/api/images".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_staging_endpoint() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

fn default_reset_on_failure() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection_path: default_collection_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_staging_endpoint(),
            api_key: None,
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            reset_on_failure: default_reset_on_failure(),
        }
    }
}
