//! Hand-off of finalized keywords to the upload pipeline.

use crate::error::CurationError;

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// The record emitted when a session is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedKeywords {
    pub session_id: Uuid,
    pub paper_id: String,
    pub keywords: Vec<String>,
}

/// Receiver of finalized keyword lists (the upload-to-archive collaborator).
pub trait KeywordSink: Send {
    /// Take ownership of the finalized keywords.
    ///
    /// # Errors
    ///
    /// Returns [`CurationError::SinkUnavailable`] if the collaborator cannot
    /// accept the record; the session then stays unfinalized.
    fn deliver(&self, finalized: FinalizedKeywords) -> Result<(), CurationError>;
}

impl KeywordSink for UnboundedSender<FinalizedKeywords> {
    #[track_caller]
    fn deliver(&self, finalized: FinalizedKeywords) -> Result<(), CurationError> {
        self.send(finalized).map_err(|e| CurationError::SinkUnavailable {
            message: format!("Upload channel closed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
