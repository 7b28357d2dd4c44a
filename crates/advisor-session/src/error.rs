use thiserror::Error;

use advisor_types::ValidationError;

/// Failure of a controller operation. None of these invalidate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Rejected locally, nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation needs a submitted profile
    #[error("{0}")]
    Precondition(String),

    #[error("{0}")]
    Submission(String),

    #[error("{0}")]
    Chat(String),

    #[error("{0}")]
    Handoff(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for SessionError {
    fn from(e: anyhow::Error) -> Self {
        SessionError::Storage(format!("{:#}", e))
    }
}
