use curation_core::error::config::ConfigError;
use curation_core::error::{CoreError, CurationError};

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors that end a curator run.
///
/// Serializable so a failed run can be reported as JSON alongside the
/// keyword output, with location tracking kept for the log.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CuratorError {
    /// Error from this App
    #[error("Curator Error: {message} {location}")]
    Curator {
        message: String,
        location: ErrorLocation,
    },

    /// Config file or override was unusable
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Error from curation-core (session, keyword service, ...)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Finalize refused because no keyword was selected
    #[error("Empty Keywords Error: {message} {location}")]
    EmptyKeywords {
        message: String,
        location: ErrorLocation,
    },
}

impl CuratorError {
    #[track_caller]
    pub fn curator(message: impl Into<String>) -> Self {
        CuratorError::Curator {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for CuratorError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CuratorError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CurationError> for CuratorError {
    #[track_caller]
    fn from(error: CurationError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match error {
            CurationError::EmptyKeywordSet { .. } => CuratorError::EmptyKeywords {
                message: error.to_string(),
                location,
            },
            other => CuratorError::Core {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<CoreError> for CuratorError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Config(config) => CuratorError::from(config),
            CoreError::Curation(curation) => CuratorError::from(curation),
            other => CuratorError::Core {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}
