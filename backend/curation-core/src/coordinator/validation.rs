use crate::coordinator::{Admission, RequestId, RequestSequencer, spawn_call};
use crate::error::{CurationError, KeywordServiceError};
use crate::keyword_set::KeywordSet;
use crate::service::KeywordService;
use crate::session::event::SessionEvent;

use common::ErrorLocation;
use models::{Keyword, ValidationReport, ValidationResult};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

/// Validation result together with the keyword set revision it was computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSnapshot {
    pub result: ValidationResult,
    pub revision: u64,
}

struct PendingValidation {
    request: RequestId,
    submitted: Vec<Keyword>,
    revision: u64,
}

/// Runs "validate the current keyword set" requests, at most one logically current.
pub struct ValidationCoordinator<S: KeywordService> {
    service: Arc<S>,
    events: UnboundedSender<SessionEvent>,
    sequencer: RequestSequencer,
    pending: Option<PendingValidation>,
}

impl<S: KeywordService> ValidationCoordinator<S> {
    pub(crate) fn new(service: Arc<S>, events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            service,
            events,
            sequencer: RequestSequencer::new(),
            pending: None,
        }
    }

    /// Start validating a snapshot of `keywords`.
    ///
    /// Returns `None` without contacting the service when the set is empty.
    /// The set is copied, so the caller may keep mutating it while the
    /// request is in flight.
    pub fn issue(&mut self, keywords: &KeywordSet) -> Option<RequestId> {
        if keywords.is_empty() {
            debug!("Nothing to validate, skipping remote call");
            return None;
        }

        let request = self.sequencer.issue();
        let submitted = keywords.as_slice().to_vec();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let payload = submitted.clone();

        debug!("Issuing validation {request} for {} keywords", submitted.len());

        self.pending = Some(PendingValidation {
            request,
            submitted,
            revision: keywords.revision(),
        });

        spawn_call(
            format!("Validation {request}"),
            async move { service.validate_keywords(&payload).await },
            move |outcome| {
                if events
                    .send(SessionEvent::ValidationCompleted { request, outcome })
                    .is_err()
                {
                    debug!("Session dropped before validation {request} completed");
                }
            },
        );

        Some(request)
    }

    /// Offer the response to `request`; only the latest request is admitted.
    pub fn admit(
        &mut self,
        request: RequestId,
        outcome: Result<ValidationReport, KeywordServiceError>,
    ) -> Admission<Result<ValidatedSnapshot, CurationError>> {
        if !self.sequencer.settle(request) {
            debug!("Discarding superseded validation {request}");
            return Admission::Superseded;
        }

        let Some(pending) = self.pending.take().filter(|p| p.request == request) else {
            warn!("Validation {request} completed without a recorded submission");
            return Admission::Superseded;
        };

        match outcome {
            Ok(report) => Admission::Current(Ok(ValidatedSnapshot {
                result: reconcile(&pending.submitted, report),
                revision: pending.revision,
            })),
            Err(e) => {
                warn!("Validation {request} failed: {e}");
                Admission::Current(Err(CurationError::ValidationFailed {
                    reason: e.reason(),
                    location: ErrorLocation::from(Location::caller()),
                }))
            }
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.sequencer.is_outstanding()
    }
}

/// Partition `submitted` into valid and invalid keywords using `report`.
///
/// A submitted keyword is valid when the report confirms it, comparing
/// case-insensitively with whitespace collapsed (the service echoes keywords
/// in its normalized spelling). Every other submitted keyword is invalid,
/// including ones the service omitted or listed only under suggestions.
///
/// Suggestions are re-keyed to the submitted spelling with the same
/// comparison, so they can be looked up by the keyword the user holds.
pub fn reconcile(submitted: &[Keyword], report: ValidationReport) -> ValidationResult {
    let confirmed: Vec<String> = report
        .valid_keywords
        .iter()
        .map(|reported| comparable(reported))
        .collect();

    let (valid_keywords, invalid_keywords): (Vec<Keyword>, Vec<Keyword>) = submitted
        .iter()
        .cloned()
        .partition(|keyword| confirmed.contains(&comparable(keyword.as_str())));

    for reported in &report.valid_keywords {
        let key = comparable(reported);
        if !submitted.iter().any(|k| comparable(k.as_str()) == key) {
            debug!("Validator confirmed '{reported}' which was not submitted");
        }
    }

    let suggestions = report
        .suggestions
        .into_iter()
        .map(|mut suggestion| {
            let key = comparable(&suggestion.original);
            if let Some(keyword) = submitted.iter().find(|k| comparable(k.as_str()) == key) {
                suggestion.original = keyword.as_str().to_string();
            }
            suggestion
        })
        .collect();

    ValidationResult {
        submitted: submitted.to_vec(),
        valid_keywords,
        invalid_keywords,
        suggestions,
        normalized_keywords: report.normalized_keywords,
    }
}

fn comparable(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
