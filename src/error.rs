//! Errors raised while talking to the archive API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("request to {url} failed with status {status}")]
    RequestFailed { url: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// HTTP status for non-success responses, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::NotFound { .. } => Some(404),
            FetchError::RequestFailed { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
