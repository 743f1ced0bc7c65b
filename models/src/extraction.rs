use crate::{ErrorLocation, Keyword, ModelError};

use std::panic::Location;

use serde::Serialize;

/// Keywords suggested by the remote extraction service for one paper.
///
/// Produced once per successful extraction and replaced wholesale by the
/// next one; lists are never merged across extractions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub primary_keywords: Vec<Keyword>,
    pub secondary_keywords: Vec<Keyword>,
    pub technical_terms: Vec<Keyword>,
    pub domain_tags: Vec<Keyword>,
    /// Service confidence in `[0, 1]`.
    pub confidence_score: f64,
    /// How the service produced the suggestions (e.g. `hybrid_ai_statistical`).
    pub extraction_method: Option<String>,
}

impl ExtractionResult {
    /// Check that the confidence score is a finite value in `[0, 1]`.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.confidence_score.is_finite() || !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ModelError::Validation {
                message: format!(
                    "Confidence score {} is outside [0, 1]",
                    self.confidence_score
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Every suggested keyword across all four lists, primary first.
    pub fn all_suggestions(&self) -> impl Iterator<Item = &Keyword> {
        self.primary_keywords
            .iter()
            .chain(&self.secondary_keywords)
            .chain(&self.technical_terms)
            .chain(&self.domain_tags)
    }

    pub fn suggestion_count(&self) -> usize {
        self.primary_keywords.len()
            + self.secondary_keywords.len()
            + self.technical_terms.len()
            + self.domain_tags.len()
    }
}
