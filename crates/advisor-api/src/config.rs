use std::time::Duration;

use advisor_types::{normalize_api_base, DEFAULT_API_BASE};

pub const INTAKE_PATH: &str = "/intake";
pub const CHAT_PATH: &str = "/chat";
pub const HANDOFF_PATH: &str = "/handoff";
pub const HEALTH_PATH: &str = "/health";

/// Where and how to reach the advisor backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8080/api/v1`
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub token: Option<String>,
    /// No timeout unless configured
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_api_base(base_url),
            token: None,
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
