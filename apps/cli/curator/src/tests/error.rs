// Unit tests for error module
// Tests JSON reporting and conversion from core errors

use crate::error::CuratorError;

use curation_core::error::CurationError;
use curation_core::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Tests that errors serialize as tagged JSON.
///
/// **WHY THIS MATTERS**: A failed run reports its error as JSON on stderr for
/// scripts wrapping the curator.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[derive(Serialize)]` or the
/// `type`/`data` tagging.
#[test]
fn given_curator_error_when_serialized_then_tagged_json() {
    // GIVEN: A CuratorError
    let err = CuratorError::Curator {
        message: String::from("Test"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Serializing to JSON
    let json = serde_json::to_value(&err).expect("serializable");

    // THEN: Variant name and message are present
    assert_eq!(json["type"], "Curator");
    assert_eq!(json["data"]["message"], "Test");
    assert!(json["data"]["location"]["line"].is_number());
}

/// **VALUE**: Verifies an empty keyword set maps to its own variant.
///
/// **WHY THIS MATTERS**: It is the one failure the user fixes by passing
/// `--keyword`, so it is reported distinctly.
///
/// **BUG THIS CATCHES**: Would catch it being folded into the generic Core variant.
#[test]
fn given_empty_keyword_set_when_converted_then_empty_keywords_variant() {
    let err = CuratorError::from(CurationError::EmptyKeywordSet {
        location: ErrorLocation::from(Location::caller()),
    });

    assert!(matches!(err, CuratorError::EmptyKeywords { .. }));
}

#[test]
fn given_other_curation_error_when_converted_then_core_variant_keeps_message() {
    let err = CuratorError::from(CurationError::invalid_input("Paper title cannot be empty"));

    match err {
        CuratorError::Core { message, .. } => {
            assert!(message.contains("Paper title cannot be empty"));
        }
        other => panic!("Expected Core, got {other:?}"),
    }
}

#[test]
fn given_config_error_when_converted_then_config_variant() {
    let err = CuratorError::from(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Invalid URL format: ftp://x".to_string(),
    });

    assert!(matches!(err, CuratorError::Config { .. }));
}
