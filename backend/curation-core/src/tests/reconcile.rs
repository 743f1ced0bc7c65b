// Unit tests for validation reconciliation
// Tests that the reported validation always partitions what was submitted

use crate::coordinator::reconcile;

use models::{Keyword, KeywordSuggestion, ValidationReport};

fn kws(texts: &[&str]) -> Vec<Keyword> {
    texts
        .iter()
        .map(|text| Keyword::parse(text).expect("test keyword must be valid"))
        .collect()
}

/// **VALUE**: Verifies the valid and invalid lists partition the submission.
///
/// **WHY THIS MATTERS**: The UI marks every selected keyword valid or invalid;
/// a keyword in neither list (or both) renders as undefined.
///
/// **BUG THIS CATCHES**: Would catch trusting the service's invalid list,
/// which may omit keywords.
#[test]
fn given_service_omits_a_keyword_when_reconcile_then_it_is_invalid() {
    let submitted = kws(&["transformers", "quantum basket weaving", "nlp"]);
    let report = ValidationReport {
        valid_keywords: vec!["transformers".into(), "nlp".into()],
        invalid_keywords: vec![],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);

    assert_eq!(result.valid_keywords, kws(&["transformers", "nlp"]));
    assert_eq!(result.invalid_keywords, kws(&["quantum basket weaving"]));
    assert_eq!(
        result.valid_keywords.len() + result.invalid_keywords.len(),
        submitted.len()
    );
}

/// **VALUE**: Verifies normalized spellings still confirm the submitted keyword.
///
/// **WHY THIS MATTERS**: The service lowercases and collapses whitespace when
/// it echoes keywords back.
///
/// **BUG THIS CATCHES**: Would catch exact string comparison marking every
/// capitalized keyword invalid.
#[test]
fn given_normalized_echo_when_reconcile_then_original_keyword_is_valid() {
    let submitted = kws(&["Machine  Learning"]);
    let report = ValidationReport {
        valid_keywords: vec!["machine learning".into()],
        normalized_keywords: vec!["machine learning".into()],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);

    assert_eq!(result.valid_keywords, kws(&["Machine  Learning"]));
    assert!(result.invalid_keywords.is_empty());
    assert!(result.is_all_valid());
}

/// **VALUE**: Verifies suggestions are carried through for invalid keywords.
///
/// **WHY THIS MATTERS**: The user replaces an invalid keyword by clicking a
/// suggested alternative.
///
/// **BUG THIS CATCHES**: Would catch suggestions being dropped during reconciliation.
#[test]
fn given_suggestions_when_reconcile_then_alternatives_are_available_per_keyword() {
    let submitted = kws(&["nueral nets"]);
    let report = ValidationReport {
        invalid_keywords: vec!["nueral nets".into()],
        suggestions: vec![KeywordSuggestion {
            original: "nueral nets".into(),
            alternatives: kws(&["neural networks"]),
        }],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);
    let keyword = &submitted[0];

    assert!(!result.is_valid(keyword));
    assert_eq!(result.alternatives_for(keyword), kws(&["neural networks"]).as_slice());
}

#[test]
fn given_unsubmitted_valid_entry_when_reconcile_then_it_is_ignored() {
    let submitted = kws(&["nlp"]);
    let report = ValidationReport {
        valid_keywords: vec!["nlp".into(), "robotics".into()],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);

    assert_eq!(result.valid_keywords, kws(&["nlp"]));
    assert_eq!(result.submitted, submitted);
}

/// **VALUE**: Verifies alternatives are found when the service echoes the
/// keyword in its normalized spelling.
///
/// **WHY THIS MATTERS**: The validator capitalizes and collapses whitespace in
/// `original`. Invalid keywords are exactly the ones the user needs
/// alternatives for.
///
/// **BUG THIS CATCHES**: Would catch suggestions paired by exact string match,
/// leaving every normalized suggestion unreachable.
#[test]
fn given_normalized_suggestion_original_when_reconcile_then_alternatives_found_for_submitted_keyword()
{
    let submitted = kws(&["quantum  sensing"]);
    let report = ValidationReport {
        invalid_keywords: vec!["Quantum sensing".into()],
        suggestions: vec![KeywordSuggestion {
            original: "Quantum sensing".into(),
            alternatives: kws(&["Quantum metrology"]),
        }],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);
    let keyword = &submitted[0];

    assert_eq!(result.invalid_keywords, submitted);
    assert_eq!(
        result.alternatives_for(keyword),
        kws(&["Quantum metrology"]).as_slice()
    );
}

#[test]
fn given_suggestion_for_unsubmitted_keyword_when_reconcile_then_original_kept() {
    let submitted = kws(&["nlp"]);
    let report = ValidationReport {
        valid_keywords: vec!["nlp".into()],
        suggestions: vec![KeywordSuggestion {
            original: "Robotics".into(),
            alternatives: kws(&["robot learning"]),
        }],
        ..Default::default()
    };

    let result = reconcile(&submitted, report);

    assert_eq!(result.suggestions[0].original, "Robotics");
}
