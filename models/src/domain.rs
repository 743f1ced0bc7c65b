use serde::Serialize;

/// Recognized subject-area domains and technical terms published by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainListing {
    pub domains: Vec<String>,
    pub technical_terms: Vec<String>,
}
