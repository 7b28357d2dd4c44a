use thiserror::Error;

/// Failure of a single backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx status, or a 2xx body flagged with `error` / `ok: false`
    #[error("backend rejected the request (HTTP {status}){}", detail(.message))]
    Backend { status: u16, message: Option<String> },

    /// The request never got a response
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose payload could not be read
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default()
}

impl ApiError {
    /// User-visible message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
