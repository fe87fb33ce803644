//! Error types for Courtside

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A fetch failure as shown to the admin
///
/// Cloneable so the list view can keep it in its state alongside the
/// last-good entries. Every kind of failure (network, timeout, 4xx/5xx,
/// malformed body) collapses into a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<&Error> for FetchError {
    fn from(err: &Error) -> Self {
        let message = match err {
            Error::Api { message, .. } => message.clone(),
            Error::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            Error::Http(e) if e.is_connect() => "Unable to reach the server".to_string(),
            other => other.to_string(),
        };
        Self::new(message)
    }
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}
