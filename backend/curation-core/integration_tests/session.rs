//! End-to-end tests of the curation session against a scripted keyword service.

use crate::helpers::{
    PanickingService, Scripted, ScriptedService, extraction, keywords, listing, paper, report,
    server_error,
};

use curation_core::domain_catalog::CatalogStatus;
use curation_core::error::CurationError;
use curation_core::session::NoticeLevel;
use curation_core::{
    ConfidenceLabel, CurationSession, FinalizedKeywords, SessionState, SessionUpdate,
};

use models::PaperData;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};

type Session = CurationSession<ScriptedService>;

fn session(service: &Arc<ScriptedService>) -> (Session, UnboundedReceiver<FinalizedKeywords>) {
    let (sink, uploads) = mpsc::unbounded_channel::<FinalizedKeywords>();
    (CurationSession::new(Arc::clone(service), sink), uploads)
}

// ============================================
// EXTRACTION
// ============================================

/// **VALUE**: Verifies the first extraction seeds the keyword set.
///
/// **WHY THIS MATTERS**: Users expect the primary suggestions pre-selected
/// when the paper opens.
///
/// **BUG THIS CATCHES**: Would catch auto-population being skipped or
/// populating from secondary keywords.
#[tokio::test]
async fn given_paper_when_first_extraction_succeeds_then_primary_keywords_selected() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(
        &["transformers", "attention"],
        0.92,
    ))));
    let (mut session, _uploads) = session(&service);

    assert_eq!(session.state(), SessionState::Idle);
    session.present(paper()).expect("present");
    assert_eq!(session.state(), SessionState::Extracting);

    session.settle().await;

    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.keyword_strings(), vec!["transformers", "attention"]);

    let confidence = session.confidence().expect("confidence");
    assert_eq!(confidence.label, ConfidenceLabel::High);
    assert_eq!(confidence.percent, 92);

    let notices = session.drain_notices();
    assert!(
        notices
            .iter()
            .any(|n| n.message == "Extracted 2 keywords with 92% confidence")
    );
}

/// **VALUE**: Verifies a re-extraction never overwrites the user's selection.
///
/// **WHY THIS MATTERS**: Users curate the list after the first suggestions;
/// a later extraction only refreshes the suggestion panel.
///
/// **BUG THIS CATCHES**: Would catch auto-population on every success.
#[tokio::test]
async fn given_curated_keywords_when_re_extract_then_selection_unchanged() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a", "b"], 0.9))));
    service.push_extraction(Scripted::ready(Ok(extraction(&["c", "d"], 0.7))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;
    session.remove_keyword(0).expect("remove");

    session.re_extract().expect("re-extract");
    let updates = session.settle().await;

    assert!(
        updates
            .iter()
            .any(|u| matches!(u, SessionUpdate::ExtractionApplied { populated: 0, .. }))
    );
    assert_eq!(session.keyword_strings(), vec!["b"]);
    assert_eq!(
        session.extraction().expect("extraction").primary_keywords,
        keywords(&["c", "d"])
    );
    assert_eq!(
        session.confidence().expect("confidence").label,
        ConfidenceLabel::Medium
    );
}

/// **VALUE**: Verifies keywords typed before the first response are kept.
///
/// **WHY THIS MATTERS**: Extraction can take seconds; users start typing.
///
/// **BUG THIS CATCHES**: Would catch auto-population replacing the set, or
/// inserting a duplicate of a keyword the user already typed.
#[tokio::test]
async fn given_manual_keywords_before_first_response_when_applied_then_merged_without_duplicates()
{
    let service = Arc::new(ScriptedService::new());
    let (scripted, release) = Scripted::gated(Ok(extraction(&["transformers", "attention"], 0.9)));
    service.push_extraction(scripted);
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.add_keyword("  sequence modeling ").expect("add");
    session.add_keyword("transformers").expect("add");

    release.send(()).expect("release");
    session.settle().await;

    assert_eq!(
        session.keyword_strings(),
        vec!["sequence modeling", "transformers", "attention"]
    );
}

/// **VALUE**: Verifies only the most recently issued extraction is applied.
///
/// **WHY THIS MATTERS**: Responses arrive out of order; the user's latest
/// request must win regardless of which response lands last.
///
/// **BUG THIS CATCHES**: Would catch a slow superseded response overwriting
/// the newer result.
#[tokio::test]
async fn given_superseded_extraction_when_it_completes_last_then_it_is_discarded() {
    let service = Arc::new(ScriptedService::new());
    let (slow, release_slow) = Scripted::gated(Ok(extraction(&["stale"], 0.3)));
    service.push_extraction(slow);
    service.push_extraction(Scripted::ready(Ok(extraction(&["fresh"], 0.85))));
    let (mut session, _uploads) = session(&service);

    let first = session.present(paper()).expect("present");
    let second = session.re_extract().expect("re-extract");
    assert!(second > first);

    session.settle().await;
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.keyword_strings(), vec!["fresh"]);

    release_slow.send(()).expect("release");
    let update = session.next_update().await.expect("late update");

    assert!(matches!(update, SessionUpdate::ExtractionSuperseded { request } if request == first));
    assert_eq!(session.keyword_strings(), vec!["fresh"]);
    assert_eq!(
        session.extraction().expect("extraction").primary_keywords,
        keywords(&["fresh"])
    );
    assert!(session.next_update().await.is_none());
}

/// **VALUE**: Verifies a failed extraction keeps the last good result.
///
/// **WHY THIS MATTERS**: A flaky service must not wipe suggestions the user
/// is still working from.
///
/// **BUG THIS CATCHES**: Would catch the result being cleared on failure.
#[tokio::test]
async fn given_previous_result_when_extraction_fails_then_last_good_result_retained() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["transformers"], 0.9))));
    service.push_extraction(Scripted::ready(Err(server_error(500))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;
    session.drain_notices();

    session.re_extract().expect("re-extract");
    let updates = session.settle().await;

    assert!(updates.iter().any(|u| matches!(
        u,
        SessionUpdate::ExtractionFailed {
            error: CurationError::ExtractionFailed { .. },
            ..
        }
    )));
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(
        session.extraction().expect("extraction").primary_keywords,
        keywords(&["transformers"])
    );
    assert!(session.extraction_error().is_some());
    assert!(
        session
            .drain_notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Error)
    );
}

/// **VALUE**: Verifies the session stays usable when the first extraction fails.
///
/// **WHY THIS MATTERS**: Manual keyword entry is the fallback.
///
/// **BUG THIS CATCHES**: Would catch a failure leaving the session stuck in Extracting.
#[tokio::test]
async fn given_first_extraction_fails_when_user_adds_keywords_then_finalize_succeeds() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Err(server_error(503))));
    let (mut session, mut uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.extraction().is_none());
    assert!(session.keywords().is_empty());

    session.add_keyword("manual keyword").expect("add");
    assert_eq!(session.finalize().expect("finalize"), vec!["manual keyword"]);
    assert!(uploads.try_recv().is_ok());
}

/// **VALUE**: Verifies an incomplete paper is rejected before any remote call.
///
/// **BUG THIS CATCHES**: Would catch validation happening only on the server.
#[tokio::test]
async fn given_paper_without_title_when_present_then_invalid_input_and_no_remote_call() {
    let service = Arc::new(ScriptedService::new());
    let (mut session, _uploads) = session(&service);
    let incomplete = PaperData {
        title: "   ".to_string(),
        ..paper()
    };

    let result = session.present(incomplete);

    assert!(matches!(result, Err(CurationError::InvalidInput { .. })));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(service.extract_calls(), 0);
    assert_eq!(service.domain_calls(), 0);
}

#[tokio::test]
async fn given_no_paper_when_re_extract_then_invalid_input() {
    let service = Arc::new(ScriptedService::new());
    let (mut session, _uploads) = session(&service);

    assert!(matches!(
        session.re_extract(),
        Err(CurationError::InvalidInput { .. })
    ));
    assert_eq!(service.extract_calls(), 0);
}

#[tokio::test]
async fn given_presented_paper_when_present_again_then_invalid_input() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a"], 0.9))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");

    assert!(matches!(
        session.present(paper()),
        Err(CurationError::InvalidInput { .. })
    ));
    session.settle().await;
    assert_eq!(service.extract_calls(), 1);
}

// ============================================
// VALIDATION
// ============================================

/// **VALUE**: Verifies every submitted keyword ends up valid or invalid.
///
/// **WHY THIS MATTERS**: The service may leave a keyword out of both lists.
///
/// **BUG THIS CATCHES**: Would catch an omitted keyword showing as neither.
#[tokio::test]
async fn given_keywords_when_validate_then_result_partitions_submission() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(
        &["transformers", "quantum basket weaving", "nlp"],
        0.9,
    ))));
    service.push_validation(Scripted::ready(Ok(report(&["transformers", "NLP"], &[]))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    let request = session.validate().expect("validate");
    assert!(request.is_some());
    assert_eq!(session.state(), SessionState::Validating);
    session.settle().await;

    let result = session.validation().expect("validation");
    assert_eq!(result.valid_keywords, keywords(&["transformers", "nlp"]));
    assert_eq!(result.invalid_keywords, keywords(&["quantum basket weaving"]));
    assert_eq!(
        result.valid_keywords.len() + result.invalid_keywords.len(),
        session.keywords().len()
    );
    assert!(
        session
            .drain_notices()
            .iter()
            .any(|n| n.message == "2 valid, 1 invalid keywords")
    );
}

/// **VALUE**: Verifies validating an empty set is a local no-op.
///
/// **BUG THIS CATCHES**: Would catch an empty request being sent to the service.
#[tokio::test]
async fn given_empty_set_when_validate_then_no_remote_call() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&[], 0.4))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    assert_eq!(session.validate().expect("validate"), None);
    assert_eq!(service.validate_calls(), 0);
    assert!(session.validation().is_none());
    assert_eq!(session.state(), SessionState::Ready);
}

/// **VALUE**: Verifies edits after validation mark the result stale.
///
/// **WHY THIS MATTERS**: Validity marks apply to the set that was submitted,
/// not to keywords added since.
///
/// **BUG THIS CATCHES**: Would catch stale results looking current.
#[tokio::test]
async fn given_validation_result_when_set_mutated_then_result_is_stale() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["transformers"], 0.9))));
    service.push_validation(Scripted::ready(Ok(report(&["transformers"], &[]))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;
    session.validate().expect("validate");
    session.settle().await;

    assert!(!session.validation_is_stale());
    assert!(session.validation().expect("validation").is_all_valid());

    session.add_keyword("attention").expect("add");

    assert!(session.validation_is_stale());
    assert_eq!(
        session.validation().expect("validation").submitted,
        keywords(&["transformers"])
    );
}

/// **VALUE**: Verifies the set submitted is a snapshot taken at issue time.
///
/// **BUG THIS CATCHES**: Would catch the request reading the live set after
/// the user edited it.
#[tokio::test]
async fn given_edit_while_validating_when_result_arrives_then_it_describes_submitted_set() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a", "b"], 0.9))));
    let (scripted, release) = Scripted::gated(Ok(report(&["a"], &["b"])));
    service.push_validation(scripted);
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;
    session.validate().expect("validate");
    session.add_keyword("c").expect("add");

    release.send(()).expect("release");
    session.settle().await;

    assert_eq!(service.validated(), vec![vec!["a", "b"]]);
    let result = session.validation().expect("validation");
    assert_eq!(result.submitted, keywords(&["a", "b"]));
    assert!(session.validation_is_stale());
}

/// **VALUE**: Verifies only the latest validation request is applied.
///
/// **BUG THIS CATCHES**: Would catch an older validation overwriting a newer one.
#[tokio::test]
async fn given_superseded_validation_when_it_completes_last_then_it_is_discarded() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a"], 0.9))));
    let (slow, release_slow) = Scripted::gated(Ok(report(&[], &["a"])));
    service.push_validation(slow);
    service.push_validation(Scripted::ready(Ok(report(&["a", "b"], &[]))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    session.validate().expect("validate");
    session.add_keyword("b").expect("add");
    session.validate().expect("validate again");
    session.settle().await;

    release_slow.send(()).expect("release");
    let update = session.next_update().await.expect("late update");

    assert!(matches!(update, SessionUpdate::ValidationSuperseded { .. }));
    let result = session.validation().expect("validation");
    assert_eq!(result.valid_keywords, keywords(&["a", "b"]));
    assert!(!session.validation_is_stale());
}

#[tokio::test]
async fn given_validation_failure_when_applied_then_previous_result_retained() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a"], 0.9))));
    service.push_validation(Scripted::ready(Ok(report(&["a"], &[]))));
    service.push_validation(Scripted::ready(Err(server_error(502))));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;
    session.validate().expect("validate");
    session.settle().await;

    session.validate().expect("validate again");
    let updates = session.settle().await;

    assert!(
        updates
            .iter()
            .any(|u| matches!(u, SessionUpdate::ValidationFailed { .. }))
    );
    assert!(session.validation().is_some());
    assert!(session.validation_error().is_some());
    assert_eq!(session.state(), SessionState::Ready);
}

// ============================================
// DOMAIN CATALOG
// ============================================

/// **VALUE**: Verifies extracted domain tags are marked against the catalog.
///
/// **BUG THIS CATCHES**: Would catch every tag being shown as recognized.
#[tokio::test]
async fn given_loaded_catalog_when_domain_tags_then_recognition_is_marked() {
    let service = Arc::new(ScriptedService::new());
    service.push_domains(Scripted::ready(Ok(listing(&["nlp", "computer vision"]))));
    let mut result = extraction(&["transformers"], 0.9);
    result.domain_tags = keywords(&["nlp", "astrology"]);
    service.push_extraction(Scripted::ready(Ok(result)));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    assert_eq!(session.domain_catalog().status(), CatalogStatus::Loaded);
    let tags = session.domain_tags();
    assert_eq!(tags.len(), 2);
    assert!(tags[0].recognized);
    assert!(!tags[1].recognized);
}

/// **VALUE**: Verifies a failed catalog load is non-fatal.
///
/// **WHY THIS MATTERS**: Domain recognition is decoration; curation must go on.
///
/// **BUG THIS CATCHES**: Would catch the failure blocking extraction results.
#[tokio::test]
async fn given_catalog_load_fails_when_settled_then_session_still_ready() {
    let service = Arc::new(ScriptedService::new());
    service.push_domains(Scripted::ready(Err(server_error(404))));
    let mut result = extraction(&["transformers"], 0.9);
    result.domain_tags = keywords(&["nlp"]);
    service.push_extraction(Scripted::ready(Ok(result)));
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    let updates = session.settle().await;

    assert!(updates.iter().any(|u| matches!(
        u,
        SessionUpdate::DomainsUnavailable {
            error: CurationError::DomainCatalogUnavailable { .. }
        }
    )));
    assert_eq!(service.domain_calls(), 1);
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.domain_catalog().status(), CatalogStatus::Unavailable);
    assert!(!session.domain_tags()[0].recognized);
}

/// **VALUE**: Verifies transient catalog failures are retried.
///
/// **BUG THIS CATCHES**: Would catch a single 503 leaving the catalog empty.
#[tokio::test]
async fn given_transient_catalog_failure_when_loading_then_retried_until_loaded() {
    let service = Arc::new(ScriptedService::new());
    service.push_domains(Scripted::ready(Err(server_error(503))));
    service.push_domains(Scripted::ready(Ok(listing(&["nlp"]))));
    service.push_extraction(Scripted::ready(Ok(extraction(&["a"], 0.9))));
    let (sink, _uploads) = mpsc::unbounded_channel::<FinalizedKeywords>();
    let mut session = CurationSession::new(Arc::clone(&service), sink)
        .with_domain_retry_max_elapsed(Duration::from_secs(10));

    session.present(paper()).expect("present");
    session.settle().await;

    assert_eq!(service.domain_calls(), 2);
    assert!(session.domain_catalog().contains("nlp"));
}

// ============================================
// FINALIZE
// ============================================

/// **VALUE**: Verifies finalize is blocked on an empty set and then succeeds.
///
/// **WHY THIS MATTERS**: A paper must never be uploaded without keywords.
///
/// **BUG THIS CATCHES**: Would catch an empty list reaching the upload step,
/// or a failed finalize closing the session.
#[tokio::test]
async fn given_empty_set_when_finalize_then_blocked_until_keyword_added() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&[], 0.5))));
    let (mut session, mut uploads) = session(&service);

    session.present(paper()).expect("present");
    session.settle().await;

    assert!(matches!(
        session.finalize(),
        Err(CurationError::EmptyKeywordSet { .. })
    ));
    assert_eq!(session.state(), SessionState::Ready);
    assert!(uploads.try_recv().is_err());

    session.add_keyword("transformers").expect("add");
    let finalized = session.finalize().expect("finalize");

    assert_eq!(finalized, vec!["transformers"]);
    assert_eq!(session.state(), SessionState::Finalized);

    let upload = uploads.try_recv().expect("upload record");
    assert_eq!(upload.keywords, vec!["transformers"]);
    assert_eq!(upload.paper_id, "2401.00001");
    assert_eq!(upload.session_id, session.id());
}

/// **VALUE**: Verifies the session is closed after finalize.
///
/// **BUG THIS CATCHES**: Would catch edits or late responses changing a
/// list that was already handed off.
#[tokio::test]
async fn given_finalized_session_when_mutated_or_late_response_then_rejected_or_ignored() {
    let service = Arc::new(ScriptedService::new());
    let (scripted, release) = Scripted::gated(Ok(extraction(&["late"], 0.9)));
    service.push_extraction(scripted);
    let (mut session, _uploads) = session(&service);

    session.present(paper()).expect("present");
    session.add_keyword("manual").expect("add");
    session.finalize().expect("finalize");

    assert!(matches!(
        session.add_keyword("more"),
        Err(CurationError::SessionFinalized { .. })
    ));
    assert!(matches!(
        session.remove_keyword(0),
        Err(CurationError::SessionFinalized { .. })
    ));
    assert!(matches!(
        session.finalize(),
        Err(CurationError::SessionFinalized { .. })
    ));

    release.send(()).expect("release");
    let mut ignored = false;
    while let Some(update) = session.next_update().await {
        ignored |= matches!(update, SessionUpdate::IgnoredAfterFinalize);
    }

    assert!(ignored);
    assert_eq!(session.keyword_strings(), vec!["manual"]);
    assert!(session.extraction().is_none());
}

#[tokio::test]
async fn given_closed_upload_channel_when_finalize_then_sink_unavailable_and_session_open() {
    let service = Arc::new(ScriptedService::new());
    service.push_extraction(Scripted::ready(Ok(extraction(&["a"], 0.9))));
    let (mut session, uploads) = session(&service);
    drop(uploads);

    session.present(paper()).expect("present");
    session.settle().await;

    assert!(matches!(
        session.finalize(),
        Err(CurationError::SinkUnavailable { .. })
    ));
    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.add_keyword("b").expect("still editable"));
}

#[tokio::test]
async fn given_index_out_of_range_when_remove_keyword_then_invalid_input() {
    let service = Arc::new(ScriptedService::new());
    let (mut session, _uploads) = session(&service);

    session.add_keyword("a").expect("add");

    assert!(matches!(
        session.remove_keyword(3),
        Err(CurationError::InvalidInput { .. })
    ));
    assert_eq!(session.keyword_strings(), vec!["a"]);
}

/// **VALUE**: Verifies validation and finalize need a presented paper.
///
/// **WHY THIS MATTERS**: The upload record names the paper it belongs to.
///
/// **BUG THIS CATCHES**: Would catch a keyword list being handed off with an
/// empty paper id, or a validation call made for no paper.
#[tokio::test]
async fn given_no_paper_when_validate_or_finalize_then_invalid_input_and_nothing_sent() {
    let service = Arc::new(ScriptedService::new());
    let (mut session, mut uploads) = session(&service);

    session.add_keyword("orphan").expect("add");

    assert!(matches!(
        session.validate(),
        Err(CurationError::InvalidInput { .. })
    ));
    assert!(matches!(
        session.finalize(),
        Err(CurationError::InvalidInput { .. })
    ));

    assert_eq!(service.validate_calls(), 0);
    assert!(uploads.try_recv().is_err());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.has_pending());
}

// ============================================
// TASK FAILURES
// ============================================

async fn drain_within(
    session: &mut CurationSession<PanickingService>,
    limit: Duration,
) -> Vec<SessionUpdate> {
    tokio::time::timeout(limit, async {
        let mut updates = Vec::new();
        while let Some(update) = session.next_update().await {
            updates.push(update);
        }
        updates
    })
    .await
    .expect("every issued request reports back")
}

/// **VALUE**: Verifies a panicking extraction call surfaces as a failure.
///
/// **WHY THIS MATTERS**: A crashed request task must not leave the session
/// waiting forever with the paper stuck in Extracting.
///
/// **BUG THIS CATCHES**: Would catch a detached task that never posts its
/// outcome, so the in-flight count never drops and `settle()` hangs.
#[tokio::test]
async fn given_extraction_task_panics_when_draining_then_failure_reported_and_session_usable() {
    let service = Arc::new(PanickingService);
    let (sink, mut uploads) = mpsc::unbounded_channel::<FinalizedKeywords>();
    let mut session = CurationSession::new(Arc::clone(&service), sink);

    let request = session.present(paper()).expect("present");
    let updates = drain_within(&mut session, Duration::from_secs(2)).await;

    assert!(updates.iter().any(|update| matches!(
        update,
        SessionUpdate::ExtractionFailed { request: failed, .. } if *failed == request
    )));
    assert!(session.extraction_error().is_some());
    assert!(!session.has_pending());
    assert_eq!(session.state(), SessionState::Ready);

    session.add_keyword("manual keyword").expect("add");
    assert_eq!(session.finalize().expect("finalize"), vec!["manual keyword"]);
    assert!(uploads.try_recv().is_ok());
}

/// **VALUE**: Verifies a panicking validation call surfaces as a failure.
///
/// **BUG THIS CATCHES**: Would catch the session staying in Validating after
/// the validation task died.
#[tokio::test]
async fn given_validation_task_panics_when_settled_then_validation_failed() {
    let service = Arc::new(PanickingService);
    let (sink, _uploads) = mpsc::unbounded_channel::<FinalizedKeywords>();
    let mut session = CurationSession::new(Arc::clone(&service), sink);

    session.present(paper()).expect("present");
    drain_within(&mut session, Duration::from_secs(2)).await;

    session.add_keyword("transformers").expect("add");
    let request = session
        .validate()
        .expect("validate")
        .expect("non-empty set is sent");
    let updates = drain_within(&mut session, Duration::from_secs(2)).await;

    assert!(updates.iter().any(|update| matches!(
        update,
        SessionUpdate::ValidationFailed { request: failed, .. } if *failed == request
    )));
    assert!(session.validation().is_none());
    assert!(session.validation_error().is_some());
    assert_eq!(session.state(), SessionState::Ready);
}
