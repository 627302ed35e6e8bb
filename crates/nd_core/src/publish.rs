use serde::{Deserialize, Serialize};

/// Outcome of one publish attempt on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub platform: String,
    pub success: bool,
    pub post_id: Option<String>,
    pub post_url: Option<String>,
    pub error: Option<String>,
}

impl PublishResult {
    pub fn published(platform: &str, post_id: String, post_url: Option<String>) -> Self {
        Self {
            platform: platform.to_string(),
            success: true,
            post_id: Some(post_id),
            post_url,
            error: None,
        }
    }

    pub fn failed(platform: &str, error: impl Into<String>) -> Self {
        Self {
            platform: platform.to_string(),
            success: false,
            post_id: None,
            post_url: None,
            error: Some(error.into()),
        }
    }
}

/// Result of a read-only credential check against one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub platform: String,
    pub connected: bool,
    /// Account name or id reported by the platform
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn connected(platform: &str, detail: String) -> Self {
        Self {
            platform: platform.to_string(),
            connected: true,
            detail: Some(detail),
            error: None,
        }
    }

    pub fn failed(platform: &str, error: impl Into<String>) -> Self {
        Self {
            platform: platform.to_string(),
            connected: false,
            detail: None,
            error: Some(error.into()),
        }
    }
}
