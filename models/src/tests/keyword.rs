use crate::{Keyword, ModelError};

/// **VALUE**: Verifies that keywords are trimmed on construction.
///
/// **WHY THIS MATTERS**: Keywords typed by the user arrive with stray whitespace. Without
/// trimming, `" nlp"` and `"nlp"` would be two distinct entries in the curated set.
///
/// **BUG THIS CATCHES**: Would catch if `parse()` stores the raw input.
#[test]
fn given_padded_text_when_parsing_keyword_then_stores_trimmed_value() {
    let keyword = Keyword::parse("  quantum annealing\t").unwrap();

    assert_eq!(keyword.as_str(), "quantum annealing");
    assert_eq!(keyword, "quantum annealing");
}

/// **VALUE**: Verifies that blank input is rejected.
///
/// **WHY THIS MATTERS**: An empty keyword would be forwarded to the archive as an empty tag.
///
/// **BUG THIS CATCHES**: Would catch if the emptiness check runs before trimming.
#[test]
fn given_whitespace_only_text_when_parsing_keyword_then_returns_validation_error() {
    let result = Keyword::parse("   ");

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Keyword cannot be empty");
        }
        Ok(keyword) => panic!("Expected validation error, got {keyword:?}"),
    }
}

#[test]
fn given_keywords_differing_in_case_when_compared_then_are_distinct() {
    let upper = Keyword::parse("NLP").unwrap();
    let lower = Keyword::parse("nlp").unwrap();

    assert_ne!(upper, lower);
}

/// **VALUE**: Verifies that deserialization goes through the same validation as `parse()`.
///
/// **BUG THIS CATCHES**: Would catch if the `#[serde(try_from)]` attribute is removed,
/// letting blank keywords in through JSON.
#[test]
fn given_json_strings_when_deserializing_keywords_then_trims_and_rejects_blank() {
    let parsed: Vec<Keyword> = serde_json::from_str(r#"[" entanglement ", "qubit"]"#).unwrap();
    assert_eq!(parsed, vec![
        Keyword::parse("entanglement").unwrap(),
        Keyword::parse("qubit").unwrap(),
    ]);

    let blank: Result<Vec<Keyword>, _> = serde_json::from_str(r#"["ok", "  "]"#);
    assert!(blank.is_err(), "Blank keyword should fail deserialization");

    let serialized = serde_json::to_string(&parsed).unwrap();
    assert_eq!(serialized, r#"["entanglement","qubit"]"#);
}
