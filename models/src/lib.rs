//! Domain models for keyword curation.
//!
//! Pure data structures: papers entering curation, keywords, and the
//! immutable snapshots produced by the remote extraction and validation
//! services. Models carry construction-time validation but no workflow
//! logic; the curation session in `curation-core` operates on them.

pub mod domain;
pub mod error;
pub mod extraction;
pub mod keyword;
pub mod paper;
pub mod validation;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use domain::DomainListing;
pub use error::model_error::ModelError;
pub use extraction::ExtractionResult;
pub use keyword::Keyword;
pub use paper::PaperData;
pub use paper::builder::PaperDataBuilder;
pub use validation::{KeywordSuggestion, ValidationReport, ValidationResult};
