//! Errors raised while talking to the remote keyword service.
//!
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses status codes and transport flags, not message content
//! - `Contract` covers responses that parse as JSON but violate the expected shape

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum KeywordServiceError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Contract Error: {message} {location}")]
    Contract {
        message: String,
        location: ErrorLocation,
    },

    /// The task running the call panicked or was cancelled before answering.
    #[error("Task Error: {message} {location}")]
    TaskFailed {
        message: String,
        location: ErrorLocation,
    },
}

impl KeywordServiceError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            KeywordServiceError::Http {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            KeywordServiceError::Server { status_code, .. } => status_code.is_retryable(),
            KeywordServiceError::Json { .. }
            | KeywordServiceError::UrlParse { .. }
            | KeywordServiceError::Contract { .. }
            | KeywordServiceError::TaskFailed { .. } => false,
        }
    }

    /// Short description suitable for a user-facing notice.
    pub fn reason(&self) -> String {
        match self {
            KeywordServiceError::Http {
                is_timeout: true, ..
            } => String::from("request timed out"),
            KeywordServiceError::Http {
                is_connection: true,
                ..
            } => String::from("service unreachable"),
            KeywordServiceError::Http { message, .. }
            | KeywordServiceError::Json { message, .. }
            | KeywordServiceError::UrlParse { message, .. }
            | KeywordServiceError::Contract { message, .. }
            | KeywordServiceError::TaskFailed { message, .. } => message.clone(),
            KeywordServiceError::Server {
                status_code,
                message,
                ..
            } => format!("HTTP {status_code} - {message}"),
        }
    }
}

impl From<tokio::task::JoinError> for KeywordServiceError {
    #[track_caller]
    fn from(error: tokio::task::JoinError) -> Self {
        let message = if error.is_panic() {
            String::from("request task panicked")
        } else {
            String::from("request task was cancelled")
        };

        KeywordServiceError::TaskFailed {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for KeywordServiceError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        KeywordServiceError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for KeywordServiceError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        KeywordServiceError::Http {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for KeywordServiceError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        KeywordServiceError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for KeywordServiceError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        KeywordServiceError::Contract {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
