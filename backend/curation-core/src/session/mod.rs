//! Keyword curation session for one paper.
//!
//! The session exclusively owns the curated [`KeywordSet`] and the three
//! remote-call coordinators (extraction, validation, domain catalog).
//!
//! # Event model
//!
//! User operations are plain `&mut self` methods and never wait on the
//! network. Remote calls run on spawned tasks which post their outcome back
//! over an in-process channel; the owner applies those outcomes one at a
//! time with [`next_update`](CurationSession::next_update),
//! [`poll_updates`](CurationSession::poll_updates) or
//! [`settle`](CurationSession::settle). Each coordinator admits only the
//! response to its most recently issued request.

pub(crate) mod event;
pub mod notice;
pub mod state;

pub use notice::{Notice, NoticeLevel};
pub use state::SessionState;

use event::SessionEvent;

use crate::confidence::{Confidence, classify};
use crate::config::CurationConfig;
use crate::coordinator::{
    Admission, ExtractionCoordinator, ExtractionOutcome, RequestId, ValidatedSnapshot,
    ValidationCoordinator,
};
use crate::domain_catalog::{DEFAULT_DOMAIN_RETRY_MAX_ELAPSED, DomainCatalog, DomainTag};
use crate::error::CurationError;
use crate::error::config::ConfigError;
use crate::keyword_set::KeywordSet;
use crate::service::KeywordService;
use crate::upload::{FinalizedKeywords, KeywordSink};

use common::ErrorLocation;
use models::{ExtractionResult, Keyword, PaperData, ValidationResult};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// What applying one remote outcome did to the session.
#[derive(Debug)]
pub enum SessionUpdate {
    ExtractionApplied {
        request: RequestId,
        /// Keywords auto-populated from the primary suggestions (first extraction only).
        populated: usize,
    },
    ExtractionFailed {
        request: RequestId,
        error: CurationError,
    },
    ExtractionSuperseded {
        request: RequestId,
    },
    ValidationApplied {
        request: RequestId,
    },
    ValidationFailed {
        request: RequestId,
        error: CurationError,
    },
    ValidationSuperseded {
        request: RequestId,
    },
    DomainsLoaded {
        count: usize,
    },
    DomainsUnavailable {
        error: CurationError,
    },
    /// The session was finalized before this outcome arrived.
    IgnoredAfterFinalize,
}

pub struct CurationSession<S: KeywordService> {
    id: Uuid,
    service: Arc<S>,
    paper: Option<PaperData>,
    keywords: KeywordSet,

    extractor: ExtractionCoordinator<S>,
    extraction: Option<ExtractionResult>,
    extraction_error: Option<String>,

    validator: ValidationCoordinator<S>,
    validation: Option<ValidatedSnapshot>,
    validation_error: Option<String>,

    catalog: DomainCatalog,
    domain_retry_max_elapsed: Duration,

    sink: Box<dyn KeywordSink>,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    /// Spawned calls whose outcome has not been received yet, superseded ones included.
    in_flight: usize,
    notices: Vec<Notice>,
    finalized: bool,
}

impl<S: KeywordService> CurationSession<S> {
    /// Create an idle session. Must be called within a tokio runtime before
    /// any remote operation is issued.
    pub fn new(service: Arc<S>, sink: impl KeywordSink + 'static) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        debug!("Curation session {id} created");

        Self {
            id,
            extractor: ExtractionCoordinator::new(Arc::clone(&service), events_tx.clone()),
            validator: ValidationCoordinator::new(Arc::clone(&service), events_tx.clone()),
            service,
            paper: None,
            keywords: KeywordSet::new(),
            extraction: None,
            extraction_error: None,
            validation: None,
            validation_error: None,
            catalog: DomainCatalog::new(),
            domain_retry_max_elapsed: DEFAULT_DOMAIN_RETRY_MAX_ELAPSED,
            sink: Box::new(sink),
            events_tx,
            events_rx,
            in_flight: 0,
            notices: Vec::new(),
            finalized: false,
        }
    }

    /// Create a session using the `curation` section of the app config.
    pub fn from_config(
        service: Arc<S>,
        sink: impl KeywordSink + 'static,
        config: &CurationConfig,
    ) -> Result<Self, ConfigError> {
        let retry = config.domain_retry_max_elapsed()?;
        Ok(Self::new(service, sink).with_domain_retry_max_elapsed(retry))
    }

    /// How long the domain catalog load retries transient failures.
    pub fn with_domain_retry_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.domain_retry_max_elapsed = max_elapsed;
        self
    }

    // ============================================
    // COMMANDS
    // ============================================

    /// Bring `paper` under curation: starts the domain catalog load and the
    /// first extraction.
    ///
    /// # Errors
    ///
    /// - [`CurationError::InvalidInput`] if the paper is invalid or a paper was already presented
    /// - [`CurationError::SessionFinalized`] after finalization
    #[track_caller]
    pub fn present(&mut self, paper: PaperData) -> Result<RequestId, CurationError> {
        self.ensure_not_finalized()?;

        if let Some(ref current) = self.paper {
            return Err(CurationError::InvalidInput {
                message: format!("Paper '{}' is already under curation", current.display_id()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        paper.validate()?;
        info!(
            "Session {} curating paper '{}'",
            self.id,
            paper.display_id()
        );
        self.paper = Some(paper);

        if self.catalog.begin_load(
            &self.service,
            &self.events_tx,
            self.domain_retry_max_elapsed,
        ) {
            self.in_flight += 1;
        }

        self.issue_extraction()
    }

    /// Request a fresh extraction, superseding any outstanding one.
    ///
    /// Keywords already curated are left untouched when it completes.
    #[track_caller]
    pub fn re_extract(&mut self) -> Result<RequestId, CurationError> {
        self.ensure_not_finalized()?;
        self.issue_extraction()
    }

    /// Validate the current keyword set.
    ///
    /// Returns `Ok(None)` without contacting the service when the set is empty.
    /// Fails with [`CurationError::InvalidInput`] before a paper is presented.
    #[track_caller]
    pub fn validate(&mut self) -> Result<Option<RequestId>, CurationError> {
        self.ensure_not_finalized()?;
        self.ensure_paper_presented()?;

        let request = self.validator.issue(&self.keywords);
        if request.is_some() {
            self.in_flight += 1;
        }

        Ok(request)
    }

    /// Add a keyword typed by the user or picked from a suggestion.
    ///
    /// Returns `Ok(false)` if the keyword was already present.
    #[track_caller]
    pub fn add_keyword(&mut self, text: &str) -> Result<bool, CurationError> {
        self.ensure_not_finalized()?;

        let keyword = Keyword::parse(text)?;
        let added = self.keywords.add(keyword);

        if !added {
            debug!("Keyword '{}' already selected", text.trim());
        }

        Ok(added)
    }

    /// Remove the keyword at `index` in display order.
    #[track_caller]
    pub fn remove_keyword(&mut self, index: usize) -> Result<Keyword, CurationError> {
        self.ensure_not_finalized()?;

        let len = self.keywords.len();
        self.keywords
            .remove(index)
            .ok_or_else(|| CurationError::InvalidInput {
                message: format!("Keyword index {index} out of range (have {len})"),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    pub fn clear_keywords(&mut self) -> Result<(), CurationError> {
        self.ensure_not_finalized()?;
        self.keywords.clear();
        Ok(())
    }

    /// Hand the curated keywords to the upload collaborator and close the session.
    ///
    /// # Errors
    ///
    /// - [`CurationError::EmptyKeywordSet`] if no keyword is selected; the session is unchanged
    /// - [`CurationError::SinkUnavailable`] if the collaborator refused the record
    /// - [`CurationError::SessionFinalized`] if called twice
    /// - [`CurationError::InvalidInput`] if no paper was presented
    #[track_caller]
    pub fn finalize(&mut self) -> Result<Vec<String>, CurationError> {
        self.ensure_not_finalized()?;
        let paper_id = self.ensure_paper_presented()?.id.clone();

        if self.keywords.is_empty() {
            self.notify(Notice::error("Select at least one keyword before applying"));
            return Err(CurationError::EmptyKeywordSet {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let keywords = self.keywords.to_strings();
        let finalized = FinalizedKeywords {
            session_id: self.id,
            paper_id,
            keywords: keywords.clone(),
        };

        if let Err(e) = self.sink.deliver(finalized) {
            self.notify(Notice::error(format!("Failed to apply keywords: {e}")));
            return Err(e);
        }

        self.finalized = true;
        self.notify(Notice::success(format!(
            "Keywords applied successfully ({})",
            keywords.len()
        )));

        if self.in_flight > 0 {
            debug!(
                "Session {} finalized with {} remote calls still in flight",
                self.id, self.in_flight
            );
        }

        Ok(keywords)
    }

    // ============================================
    // EVENT DISPATCH
    // ============================================

    /// Wait for the next remote outcome and apply it.
    ///
    /// Returns `None` immediately when no call is in flight.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        if self.in_flight == 0 {
            return None;
        }

        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply every outcome that has already arrived, without waiting.
    pub fn poll_updates(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();

        while self.in_flight > 0 {
            match self.events_rx.try_recv() {
                Ok(event) => updates.push(self.apply(event)),
                Err(_) => break,
            }
        }

        updates
    }

    /// Apply outcomes until no logically current request is outstanding.
    ///
    /// Superseded calls may still be in flight afterwards.
    pub async fn settle(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();

        while self.has_pending() {
            match self.next_update().await {
                Some(update) => updates.push(update),
                None => break,
            }
        }

        updates
    }

    fn apply(&mut self, event: SessionEvent) -> SessionUpdate {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.finalized {
            debug!("Session {} ignoring outcome after finalize", self.id);
            return SessionUpdate::IgnoredAfterFinalize;
        }

        match event {
            SessionEvent::ExtractionCompleted { request, outcome } => {
                match self.extractor.admit(request, outcome) {
                    Admission::Superseded => SessionUpdate::ExtractionSuperseded { request },
                    Admission::Current(ExtractionOutcome::Succeeded { result, first }) => {
                        let populated = self.apply_extraction(result, first);
                        SessionUpdate::ExtractionApplied { request, populated }
                    }
                    Admission::Current(ExtractionOutcome::Failed(error)) => {
                        self.extraction_error = Some(error.to_string());
                        self.notify(Notice::error(
                            "Failed to extract keywords; add keywords manually",
                        ));
                        SessionUpdate::ExtractionFailed { request, error }
                    }
                }
            }
            SessionEvent::ValidationCompleted { request, outcome } => {
                match self.validator.admit(request, outcome) {
                    Admission::Superseded => SessionUpdate::ValidationSuperseded { request },
                    Admission::Current(Ok(snapshot)) => {
                        self.apply_validation(snapshot);
                        SessionUpdate::ValidationApplied { request }
                    }
                    Admission::Current(Err(error)) => {
                        self.validation_error = Some(error.to_string());
                        self.notify(Notice::error("Failed to validate keywords"));
                        SessionUpdate::ValidationFailed { request, error }
                    }
                }
            }
            SessionEvent::DomainsLoaded { outcome } => match self.catalog.complete(outcome) {
                Ok(count) => SessionUpdate::DomainsLoaded { count },
                Err(error) => {
                    self.notify(Notice::warning(
                        "Domain list unavailable; domain tags are shown unverified",
                    ));
                    SessionUpdate::DomainsUnavailable { error }
                }
            },
        }
    }

    /// Replace the extraction snapshot; seed the keyword set on the first success.
    fn apply_extraction(&mut self, result: ExtractionResult, first: bool) -> usize {
        let populated = if first {
            result
                .primary_keywords
                .iter()
                .filter(|keyword| self.keywords.add((*keyword).clone()))
                .count()
        } else {
            0
        };

        let confidence = classify(result.confidence_score);
        self.notify(Notice::success(format!(
            "Extracted {} keywords with {}% confidence",
            result.primary_keywords.len(),
            confidence.percent
        )));

        self.extraction = Some(result);
        self.extraction_error = None;

        populated
    }

    fn apply_validation(&mut self, snapshot: ValidatedSnapshot) {
        let valid = snapshot.result.valid_keywords.len();
        let invalid = snapshot.result.invalid_keywords.len();

        if invalid > 0 {
            self.notify(Notice::warning(format!(
                "{valid} valid, {invalid} invalid keywords"
            )));
        } else {
            self.notify(Notice::success(format!("All {valid} keywords are valid")));
        }

        if snapshot.revision != self.keywords.revision() {
            debug!("Validation result is already stale on arrival");
        }

        self.validation = Some(snapshot);
        self.validation_error = None;
    }

    fn issue_extraction(&mut self) -> Result<RequestId, CurationError> {
        let request = self.extractor.issue(self.paper.as_ref())?;
        self.in_flight += 1;
        Ok(request)
    }

    #[track_caller]
    fn ensure_not_finalized(&self) -> Result<(), CurationError> {
        if self.finalized {
            return Err(CurationError::SessionFinalized {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    #[track_caller]
    fn ensure_paper_presented(&self) -> Result<&PaperData, CurationError> {
        self.paper.as_ref().ok_or_else(|| CurationError::InvalidInput {
            message: String::from("No paper presented"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!("Session {}: {}", self.id, notice.message),
            NoticeLevel::Warning => warn!("Session {}: {}", self.id, notice.message),
            NoticeLevel::Info | NoticeLevel::Success => {
                info!("Session {}: {}", self.id, notice.message)
            }
        }

        self.notices.push(notice);
    }

    // ============================================
    // READ-ONLY PROJECTION
    // ============================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn paper(&self) -> Option<&PaperData> {
        self.paper.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.finalized {
            SessionState::Finalized
        } else if self.paper.is_none() {
            SessionState::Idle
        } else if self.extractor.is_outstanding() {
            SessionState::Extracting
        } else if self.validator.is_outstanding() {
            SessionState::Validating
        } else {
            SessionState::Ready
        }
    }

    /// Whether an extraction, validation or catalog load is still logically current.
    pub fn has_pending(&self) -> bool {
        self.extractor.is_outstanding()
            || self.validator.is_outstanding()
            || self.catalog.is_loading()
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn keyword_strings(&self) -> Vec<String> {
        self.keywords.to_strings()
    }

    pub fn extraction(&self) -> Option<&ExtractionResult> {
        self.extraction.as_ref()
    }

    pub fn confidence(&self) -> Option<Confidence> {
        self.extraction
            .as_ref()
            .map(|result| classify(result.confidence_score))
    }

    /// Reason of the most recent extraction failure, cleared by the next success.
    pub fn extraction_error(&self) -> Option<&str> {
        self.extraction_error.as_deref()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref().map(|snapshot| &snapshot.result)
    }

    /// Whether the keyword set changed since the current validation result was requested.
    ///
    /// A stale result is advisory only. `false` when there is no result.
    pub fn validation_is_stale(&self) -> bool {
        self.validation
            .as_ref()
            .is_some_and(|snapshot| snapshot.revision != self.keywords.revision())
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn domain_catalog(&self) -> &DomainCatalog {
        &self.catalog
    }

    /// Domain tags of the current extraction, marked against the catalog.
    pub fn domain_tags(&self) -> Vec<DomainTag> {
        self.extraction
            .as_ref()
            .map(|result| self.catalog.cross_reference(&result.domain_tags))
            .unwrap_or_default()
    }

    /// Take the notices raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
