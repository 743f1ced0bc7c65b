pub mod config;
pub mod curation;
pub mod keyword_service;

pub use curation::CurationError;
pub use keyword_service::KeywordServiceError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    KeywordService(#[from] keyword_service::KeywordServiceError),

    #[error(transparent)]
    Curation(#[from] curation::CurationError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
