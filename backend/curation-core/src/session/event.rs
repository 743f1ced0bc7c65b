use crate::coordinator::RequestId;
use crate::error::KeywordServiceError;

use models::{DomainListing, ExtractionResult, ValidationReport};

/// Completion of a remote call, posted back to the owning session.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    ExtractionCompleted {
        request: RequestId,
        outcome: Result<ExtractionResult, KeywordServiceError>,
    },
    ValidationCompleted {
        request: RequestId,
        outcome: Result<ValidationReport, KeywordServiceError>,
    },
    DomainsLoaded {
        outcome: Result<DomainListing, KeywordServiceError>,
    },
}
