use crate::coordinator::{Admission, RequestId, RequestSequencer, spawn_call};
use crate::error::{CurationError, KeywordServiceError};
use crate::service::KeywordService;
use crate::session::event::SessionEvent;

use common::ErrorLocation;
use models::{ExtractionResult, PaperData};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

/// Admitted result of an extraction request.
#[derive(Debug)]
pub enum ExtractionOutcome {
    Succeeded {
        result: ExtractionResult,
        /// First successful extraction in this session.
        first: bool,
    },
    Failed(CurationError),
}

/// Runs "extract keywords for this paper" requests, at most one logically current.
pub struct ExtractionCoordinator<S: KeywordService> {
    service: Arc<S>,
    events: UnboundedSender<SessionEvent>,
    sequencer: RequestSequencer,
    successes: u64,
}

impl<S: KeywordService> ExtractionCoordinator<S> {
    pub(crate) fn new(service: Arc<S>, events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            service,
            events,
            sequencer: RequestSequencer::new(),
            successes: 0,
        }
    }

    /// Start an extraction for `paper`, superseding any outstanding one.
    ///
    /// # Errors
    ///
    /// Returns [`CurationError::InvalidInput`] without contacting the service
    /// if there is no paper or it is missing required fields.
    #[track_caller]
    pub fn issue(&mut self, paper: Option<&PaperData>) -> Result<RequestId, CurationError> {
        let paper = paper.ok_or_else(|| CurationError::InvalidInput {
            message: String::from("No paper presented for extraction"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        paper.validate()?;

        if let Some(previous) = self.sequencer.latest()
            && self.sequencer.is_outstanding()
        {
            debug!("Extraction {previous} superseded before completing");
        }

        let request = self.sequencer.issue();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let paper = paper.clone();

        debug!("Issuing extraction {request} for paper '{}'", paper.display_id());

        spawn_call(
            format!("Extraction {request}"),
            async move { service.extract_keywords(&paper).await },
            move |outcome| {
                if events
                    .send(SessionEvent::ExtractionCompleted { request, outcome })
                    .is_err()
                {
                    debug!("Session dropped before extraction {request} completed");
                }
            },
        );

        Ok(request)
    }

    /// Offer the response to `request`; only the latest request is admitted.
    pub fn admit(
        &mut self,
        request: RequestId,
        outcome: Result<ExtractionResult, KeywordServiceError>,
    ) -> Admission<ExtractionOutcome> {
        if !self.sequencer.settle(request) {
            debug!("Discarding superseded extraction {request}");
            return Admission::Superseded;
        }

        match outcome {
            Ok(result) => {
                self.successes += 1;
                Admission::Current(ExtractionOutcome::Succeeded {
                    result,
                    first: self.successes == 1,
                })
            }
            Err(e) => {
                warn!("Extraction {request} failed: {e}");
                Admission::Current(ExtractionOutcome::Failed(
                    CurationError::ExtractionFailed {
                        reason: e.reason(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                ))
            }
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.sequencer.is_outstanding()
    }
}
