//! JSON shapes exchanged with the importer service's keyword endpoints.
//!
//! Responses are deserialized into these structs first and then converted
//! into models, so a missing field fails at parse time and an out-of-range
//! value fails as a contract error instead of flowing into the session.

use crate::error::KeywordServiceError;

use models::{
    DomainListing, ExtractionResult, Keyword, KeywordSuggestion, PaperData, ValidationReport,
};

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ExtractRequest<'a> {
    pub paper_data: PaperPayload<'a>,
}

/// Paper record in the shape the service's request schema requires.
#[derive(Debug, Serialize)]
pub(crate) struct PaperPayload<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub authors: &'a [String],
    pub summary: &'a str,
    pub pdf_url: Option<&'a str>,
    pub published: &'a str,
    pub updated: &'a str,
}

impl<'a> From<&'a PaperData> for PaperPayload<'a> {
    fn from(paper: &'a PaperData) -> Self {
        Self {
            id: &paper.id,
            title: &paper.title,
            authors: &paper.authors,
            summary: &paper.summary,
            pdf_url: paper.pdf_url.as_deref(),
            published: paper.published.as_deref().unwrap_or_default(),
            updated: paper.updated.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractResponse {
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub technical_terms: Vec<String>,
    pub domain_tags: Vec<String>,
    pub confidence_score: f64,
    #[serde(default)]
    pub extraction_method: Option<String>,
}

impl TryFrom<ExtractResponse> for ExtractionResult {
    type Error = KeywordServiceError;

    #[track_caller]
    fn try_from(response: ExtractResponse) -> Result<Self, Self::Error> {
        let result = ExtractionResult {
            primary_keywords: to_keywords(response.primary_keywords),
            secondary_keywords: to_keywords(response.secondary_keywords),
            technical_terms: to_keywords(response.technical_terms),
            domain_tags: to_keywords(response.domain_tags),
            confidence_score: response.confidence_score,
            extraction_method: response.extraction_method,
        };

        result.validate()?;

        Ok(result)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ValidateRequest<'a> {
    pub keywords: Vec<&'a str>,
}

impl<'a> From<&'a [Keyword]> for ValidateRequest<'a> {
    fn from(keywords: &'a [Keyword]) -> Self {
        Self {
            keywords: keywords.iter().map(Keyword::as_str).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateResponse {
    pub valid_keywords: Vec<String>,
    pub invalid_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<SuggestionEntry>,
    #[serde(default)]
    pub normalized_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionEntry {
    pub original: String,
    #[serde(alias = "alternatives")]
    pub suggestions: Vec<String>,
}

impl From<ValidateResponse> for ValidationReport {
    fn from(response: ValidateResponse) -> Self {
        Self {
            valid_keywords: response.valid_keywords,
            invalid_keywords: response.invalid_keywords,
            suggestions: response
                .suggestions
                .into_iter()
                .map(|entry| KeywordSuggestion {
                    original: entry.original,
                    alternatives: to_keywords(entry.suggestions),
                })
                .collect(),
            normalized_keywords: response.normalized_keywords,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DomainsResponse {
    pub domains: Vec<String>,
    #[serde(default)]
    pub technical_terms: Vec<String>,
}

impl From<DomainsResponse> for DomainListing {
    fn from(response: DomainsResponse) -> Self {
        Self {
            domains: response.domains,
            technical_terms: response.technical_terms,
        }
    }
}

/// Convert service strings to keywords, dropping blanks and repeats.
fn to_keywords(values: Vec<String>) -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = Vec::with_capacity(values.len());

    for value in values {
        match Keyword::parse(&value) {
            Ok(keyword) if !keywords.contains(&keyword) => keywords.push(keyword),
            Ok(keyword) => debug!("Dropping repeated suggestion '{keyword}'"),
            Err(_) => debug!("Dropping blank suggestion from service response"),
        }
    }

    keywords
}
