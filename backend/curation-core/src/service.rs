//! Contract of the remote keyword service.
//!
//! The curation session depends only on this trait; [`ImporterClient`](crate::ImporterClient)
//! is the HTTP implementation, and tests substitute scripted in-memory services.

use crate::error::KeywordServiceError;

use models::{DomainListing, ExtractionResult, Keyword, PaperData, ValidationReport};

use std::future::Future;

/// Remote capabilities consumed by a curation session.
///
/// Calls run on spawned tasks, so implementations must be shareable across
/// threads and their futures must be `Send`.
pub trait KeywordService: Send + Sync + 'static {
    /// Suggest keywords for `paper`.
    fn extract_keywords(
        &self,
        paper: &PaperData,
    ) -> impl Future<Output = Result<ExtractionResult, KeywordServiceError>> + Send;

    /// Check `keywords` against the controlled vocabulary.
    fn validate_keywords(
        &self,
        keywords: &[Keyword],
    ) -> impl Future<Output = Result<ValidationReport, KeywordServiceError>> + Send;

    /// List the recognized subject-area domains.
    fn available_domains(
        &self,
    ) -> impl Future<Output = Result<DomainListing, KeywordServiceError>> + Send;
}
