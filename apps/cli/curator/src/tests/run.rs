// Unit tests for the JSON sink and paper loading

use crate::error::CuratorError;
use crate::run::{JsonSink, read_paper};

use curation_core::{FinalizedKeywords, KeywordSink};

use uuid::Uuid;

/// **VALUE**: Verifies finalized keywords are written as one JSON line.
///
/// **WHY THIS MATTERS**: Stdout is the hand-off to the upload step; anything
/// else on it would corrupt the record.
///
/// **BUG THIS CATCHES**: Would catch missing newline or a changed field name.
#[test]
fn given_finalized_keywords_when_delivered_then_single_json_line() {
    let sink = JsonSink::new(Vec::new());
    let session_id = Uuid::new_v4();

    sink.deliver(FinalizedKeywords {
        session_id,
        paper_id: "2401.00001".to_string(),
        keywords: vec!["transformers".to_string(), "attention".to_string()],
    })
    .expect("deliver");

    let written = String::from_utf8(sink.into_inner()).expect("utf8");
    assert!(written.ends_with('\n'));
    assert_eq!(written.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(written.trim_end()).expect("json");
    assert_eq!(value["paper_id"], "2401.00001");
    assert_eq!(value["keywords"][1], "attention");
    assert_eq!(value["session_id"], session_id.to_string());
}

/// **VALUE**: Verifies the importer's `abstract` field name is accepted.
///
/// **BUG THIS CATCHES**: Would catch a missing serde alias on `summary`.
#[test]
fn given_paper_file_with_abstract_when_read_then_parsed() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("paper.json");
    std::fs::write(
        &path,
        r#"{
            "id": "2401.00001",
            "title": "Attention Is All You Need",
            "authors": ["A. Vaswani"],
            "abstract": "We propose the Transformer."
        }"#,
    )
    .expect("write");

    let paper = read_paper(&path).expect("paper");

    assert_eq!(paper.summary, "We propose the Transformer.");
    assert_eq!(paper.authors, vec!["A. Vaswani"]);
    assert!(paper.pdf_url.is_none());
}

#[test]
fn given_missing_file_when_read_paper_then_curator_error() {
    let dir = tempfile::TempDir::new().expect("tempdir");

    let result = read_paper(&dir.path().join("absent.json"));

    assert!(matches!(result, Err(CuratorError::Curator { .. })));
}
