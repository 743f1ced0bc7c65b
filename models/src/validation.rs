use crate::Keyword;

use serde::Serialize;

/// Replacement candidates the validator proposes for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSuggestion {
    pub original: String,
    pub alternatives: Vec<Keyword>,
}

/// Validator response as reported by the remote service.
///
/// Not guaranteed to partition the submitted keywords: the service may omit
/// keywords, echo them in a normalized spelling, or list them only under
/// suggestions. [`ValidationResult`] is the reconciled form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid_keywords: Vec<String>,
    pub invalid_keywords: Vec<String>,
    pub suggestions: Vec<KeywordSuggestion>,
    pub normalized_keywords: Vec<String>,
}

/// Categorized validation of the keywords submitted in one request.
///
/// `valid_keywords` and `invalid_keywords` partition `submitted`: each
/// submitted keyword is in exactly one of them, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub submitted: Vec<Keyword>,
    pub valid_keywords: Vec<Keyword>,
    pub invalid_keywords: Vec<Keyword>,
    pub suggestions: Vec<KeywordSuggestion>,
    pub normalized_keywords: Vec<String>,
}

impl ValidationResult {
    pub fn is_all_valid(&self) -> bool {
        self.invalid_keywords.is_empty()
    }

    pub fn is_valid(&self, keyword: &Keyword) -> bool {
        self.valid_keywords.contains(keyword)
    }

    /// Alternatives proposed for `keyword`, if the validator offered any.
    pub fn alternatives_for(&self, keyword: &Keyword) -> &[Keyword] {
        self.suggestions
            .iter()
            .find(|suggestion| suggestion.original == keyword.as_str())
            .map(|suggestion| suggestion.alternatives.as_slice())
            .unwrap_or(&[])
    }
}
