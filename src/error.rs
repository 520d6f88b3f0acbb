use crate::schema::ValidationError;
use thiserror::Error;

/// Failure of a directory or post query fetch. None of these are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("invalid JSON body: {0}")]
    Decode(String),
    #[error("schema validation failed: {0}")]
    Schema(#[from] ValidationError),
    #[error("query error: {0}")]
    RemoteQuery(String),
}

impl FetchError {
    /// Short message suitable for showing in place of the missing data.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::HttpStatus(status) => format!("Request failed ({status})."),
            Self::Decode(_) | Self::Schema(_) => "The server sent an unexpected response.".to_string(),
            Self::RemoteQuery(message) => format!("The query failed: {message}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
