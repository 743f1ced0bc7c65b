use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// A model value that breaks one of its invariants.
///
/// Raised before any remote call is made; callers surface the message to
/// the user as-is.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The user-facing reason, without location.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } => message,
        }
    }
}
