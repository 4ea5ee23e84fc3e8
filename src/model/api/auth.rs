use serde::{Deserialize, Serialize};

/// Body of `POST /auth/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
}

/// Acknowledgement returned by most mutating calls.
///
/// Parsed leniently: the server is free to leave either field out, and a
/// missing `success` counts as a refusal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }

    /// Parse a body that may be empty or not JSON at all.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
