use crate::{ModelError, PaperData, PaperDataBuilder};

fn complete_builder() -> PaperDataBuilder {
    PaperDataBuilder::default()
        .with_id("2401.00001")
        .with_title("Attention Is All You Need")
        .with_author("A. Vaswani")
        .with_summary("We propose a new simple network architecture, the Transformer.")
        .with_pdf_url("https://arxiv.org/pdf/1706.03762")
}

fn validation_message(result: Result<PaperData, ModelError>) -> String {
    match result {
        Err(ModelError::Validation { message, .. }) => message,
        Ok(paper) => panic!("Expected validation error, got {paper:?}"),
    }
}

/// **VALUE**: Verifies that a fully populated builder produces a paper.
///
/// **WHY THIS MATTERS**: The builder is how the CLI and tests create papers. If valid input
/// is rejected, no paper can ever enter curation.
#[test]
fn given_complete_builder_when_building_then_returns_paper() {
    let paper = complete_builder().build().unwrap();

    assert_eq!(paper.id, "2401.00001");
    assert_eq!(paper.authors, vec!["A. Vaswani".to_string()]);
    assert_eq!(paper.display_id(), "2401.00001");
}

/// **VALUE**: Verifies that the abstract is required.
///
/// **WHY THIS MATTERS**: Extraction works from title and abstract. Sending a paper without
/// an abstract wastes a remote call on a request the service cannot answer well.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is removed from `build()`.
#[test]
fn given_missing_summary_when_building_then_returns_validation_error() {
    let builder = PaperDataBuilder::default()
        .with_title("Attention Is All You Need")
        .with_author("A. Vaswani");

    assert_eq!(validation_message(builder.build()), "Paper abstract is required");
}

#[test]
fn given_no_authors_when_building_then_returns_validation_error() {
    let builder = PaperDataBuilder::default()
        .with_title("Attention Is All You Need")
        .with_summary("Transformers.");

    assert_eq!(
        validation_message(builder.build()),
        "Paper must have at least one author"
    );
}

#[test]
fn given_blank_title_when_building_then_returns_validation_error() {
    let builder = complete_builder().with_title("   ");

    assert_eq!(validation_message(builder.build()), "Paper title cannot be empty");
}

/// **VALUE**: Verifies that non-HTTP PDF links are rejected.
///
/// **BUG THIS CATCHES**: Would catch if the scheme check in `validate()` is lost.
#[test]
fn given_file_pdf_url_when_building_then_returns_validation_error() {
    let builder = complete_builder().with_pdf_url("file:///tmp/paper.pdf");

    assert_eq!(
        validation_message(builder.build()),
        "Invalid PDF URL format: file:///tmp/paper.pdf"
    );
}

/// **VALUE**: Verifies that importer records deserialize, including the `abstract` alias.
#[test]
fn given_importer_record_json_when_deserializing_then_paper_is_valid() {
    let json = r#"{
        "id": "2401.00002",
        "title": "Quantum Error Correction Below Threshold",
        "authors": ["G. Quantum AI"],
        "abstract": "We demonstrate logical qubits.",
        "published": "2024-01-02"
    }"#;

    let paper: PaperData = serde_json::from_str(json).unwrap();

    assert_eq!(paper.summary, "We demonstrate logical qubits.");
    assert_eq!(paper.pdf_url, None);
    assert!(paper.validate().is_ok());
}
