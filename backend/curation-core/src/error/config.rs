use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading, validating or saving `config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    /// A humantime duration field that does not parse or is zero.
    #[error("Config Duration Error: {field} = '{value}': {reason} {location}")]
    InvalidDuration {
        location: ErrorLocation,
        field: &'static str,
        value: String,
        reason: String,
    },
}
