use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors surfaced by the curation session to its presentation layer.
///
/// Remote failures (`ExtractionFailed`, `ValidationFailed`,
/// `DomainCatalogUnavailable`) never leave the session unusable; only
/// `EmptyKeywordSet` blocks finalization.
#[derive(Debug, ThisError)]
pub enum CurationError {
    #[error("Invalid Input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    #[error("Keyword extraction failed: {reason} {location}")]
    ExtractionFailed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Keyword validation failed: {reason} {location}")]
    ValidationFailed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Domain catalog unavailable: {reason} {location}")]
    DomainCatalogUnavailable {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Cannot finalize an empty keyword set {location}")]
    EmptyKeywordSet { location: ErrorLocation },

    #[error("Session already finalized {location}")]
    SessionFinalized { location: ErrorLocation },

    #[error("Upload sink unavailable: {message} {location}")]
    SinkUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl CurationError {
    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CurationError::InvalidInput {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for CurationError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        CurationError::InvalidInput {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
