use thiserror::Error;

use bioscan_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    BaseUrl(String),

    #[error(transparent)]
    Assessment(#[from] CoreError),
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
