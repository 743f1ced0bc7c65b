// Unit tests for the importer service JSON shapes
// Tests request serialization and response conversion into models

use crate::error::KeywordServiceError;
use crate::importer_client::wire::{
    DomainsResponse, ExtractRequest, ExtractResponse, ValidateRequest, ValidateResponse,
};

use models::{DomainListing, ExtractionResult, Keyword, PaperData, PaperDataBuilder, ValidationReport};

use serde_json::json;

fn paper() -> PaperData {
    PaperDataBuilder::default()
        .with_id("2401.00001")
        .with_title("Attention Is All You Need")
        .with_author("A. Vaswani")
        .with_summary("We propose the Transformer.")
        .build()
        .expect("valid paper")
}

/// **VALUE**: Verifies the extract request matches the service's schema.
///
/// **WHY THIS MATTERS**: The service rejects requests with missing date fields,
/// so absent dates are sent as empty strings.
///
/// **BUG THIS CATCHES**: Would catch `null` being sent for `published`.
#[test]
fn given_paper_without_dates_when_serialize_extract_request_then_dates_are_empty_strings() {
    let paper = paper();
    let request = ExtractRequest {
        paper_data: (&paper).into(),
    };

    let value = serde_json::to_value(&request).expect("serialize");

    assert_eq!(
        value,
        json!({
            "paper_data": {
                "id": "2401.00001",
                "title": "Attention Is All You Need",
                "authors": ["A. Vaswani"],
                "summary": "We propose the Transformer.",
                "pdf_url": null,
                "published": "",
                "updated": ""
            }
        })
    );
}

#[test]
fn given_keywords_when_serialize_validate_request_then_sends_plain_strings() {
    let keywords = vec![
        Keyword::parse("transformers").expect("keyword"),
        Keyword::parse("attention").expect("keyword"),
    ];

    let value = serde_json::to_value(ValidateRequest::from(keywords.as_slice())).expect("serialize");

    assert_eq!(value, json!({ "keywords": ["transformers", "attention"] }));
}

/// **VALUE**: Verifies blank and repeated suggestions are dropped.
///
/// **WHY THIS MATTERS**: Auto-population must never insert an empty keyword.
///
/// **BUG THIS CATCHES**: Would catch raw strings flowing into the keyword set.
#[test]
fn given_blank_and_repeated_suggestions_when_convert_then_they_are_dropped() {
    let response: ExtractResponse = serde_json::from_value(json!({
        "primary_keywords": ["transformers", "  ", "transformers", " attention "],
        "secondary_keywords": [],
        "technical_terms": ["self-attention"],
        "domain_tags": ["nlp"],
        "confidence_score": 0.92,
        "extraction_method": "llm"
    }))
    .expect("deserialize");

    let result = ExtractionResult::try_from(response).expect("convert");

    assert_eq!(result.primary_keywords, vec!["transformers", "attention"]);
    assert_eq!(result.domain_tags, vec!["nlp"]);
    assert_eq!(result.extraction_method.as_deref(), Some("llm"));
}

/// **VALUE**: Verifies an out-of-range confidence score is a contract violation.
///
/// **BUG THIS CATCHES**: Would catch a score of 1.5 being shown as "High (150%)".
#[test]
fn given_out_of_range_score_when_convert_then_contract_error() {
    let response: ExtractResponse = serde_json::from_value(json!({
        "primary_keywords": ["transformers"],
        "secondary_keywords": [],
        "technical_terms": [],
        "domain_tags": [],
        "confidence_score": 1.5
    }))
    .expect("deserialize");

    let result = ExtractionResult::try_from(response);

    assert!(matches!(result, Err(KeywordServiceError::Contract { .. })));
}

#[test]
fn given_missing_field_when_deserialize_extract_response_then_fails() {
    let result = serde_json::from_value::<ExtractResponse>(json!({
        "primary_keywords": ["transformers"]
    }));

    assert!(result.is_err());
}

/// **VALUE**: Verifies both suggestion field spellings are accepted.
///
/// **WHY THIS MATTERS**: Service versions differ in the field name for alternatives.
///
/// **BUG THIS CATCHES**: Would catch a missing serde alias.
#[test]
fn given_alternatives_alias_when_convert_validate_response_then_suggestions_kept() {
    let response: ValidateResponse = serde_json::from_value(json!({
        "valid_keywords": ["nlp"],
        "invalid_keywords": ["nueral nets"],
        "suggestions": [
            { "original": "nueral nets", "alternatives": ["neural networks", ""] }
        ]
    }))
    .expect("deserialize");

    let report = ValidationReport::from(response);

    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].original, "nueral nets");
    assert_eq!(report.suggestions[0].alternatives, vec!["neural networks"]);
    assert!(report.normalized_keywords.is_empty());
}

#[test]
fn given_domains_response_without_terms_when_convert_then_terms_default_empty() {
    let response: DomainsResponse =
        serde_json::from_value(json!({ "domains": ["nlp", "computer vision"] }))
            .expect("deserialize");

    let listing = DomainListing::from(response);

    assert_eq!(listing.domains, vec!["nlp", "computer vision"]);
    assert!(listing.technical_terms.is_empty());
}
