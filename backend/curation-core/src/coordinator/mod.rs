//! Coordinators for the session's re-entrant remote calls.
//!
//! Each coordinator numbers its requests with a [`RequestSequencer`]. A
//! response is admitted only if it answers the most recently issued request;
//! anything older was superseded while in flight and is dropped. Issue order
//! wins, never response order.
//!
//! Cancellation is advisory: a superseded task still runs to completion, its
//! result is simply not admitted.

pub mod extraction;
pub mod validation;

pub use extraction::{ExtractionCoordinator, ExtractionOutcome};
pub use validation::{ValidatedSnapshot, ValidationCoordinator, reconcile};

use crate::error::KeywordServiceError;

use std::fmt;
use std::future::Future;

use log::{debug, error};

/// Identifier of one issued remote request, unique per coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of offering a response to a coordinator.
#[derive(Debug)]
pub enum Admission<T> {
    /// The response answers the latest request and should be applied.
    Current(T),
    /// A newer request was issued after this one; drop the response.
    Superseded,
}

/// Monotonic request counter implementing the supersede rule.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
    outstanding: bool,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id. Any earlier id is superseded from now on.
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.outstanding = true;
        RequestId(self.latest)
    }

    /// Settle the response to `request`.
    ///
    /// Returns `true` exactly once for the latest issued request; returns
    /// `false` for superseded ids and for repeated deliveries.
    pub fn settle(&mut self, request: RequestId) -> bool {
        if self.outstanding && request.0 == self.latest {
            self.outstanding = false;
            return true;
        }

        false
    }

    /// Whether the latest issued request is still waiting for its response.
    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }

    pub fn latest(&self) -> Option<RequestId> {
        (self.latest > 0).then_some(RequestId(self.latest))
    }
}

/// Run `call` on its own task and hand its outcome to `deliver`.
///
/// `deliver` runs exactly once even if the call task panics or is aborted;
/// the outcome is then [`KeywordServiceError::TaskFailed`]. Every issued
/// request therefore produces a session event.
pub(crate) fn spawn_call<T, F, D>(label: String, call: F, deliver: D)
where
    T: Send + 'static,
    F: Future<Output = Result<T, KeywordServiceError>> + Send + 'static,
    D: FnOnce(Result<T, KeywordServiceError>) + Send + 'static,
{
    let handle = tokio::spawn(call);

    tokio::spawn(async move {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{label} task ended without a result: {e}");
                Err(KeywordServiceError::from(e))
            }
        };

        debug!("{label} finished");
        deliver(outcome);
    });
}
