//! Recognized keyword domains, loaded once per curation session.
//!
//! A failed load is non-fatal: the catalog stays empty and domain tags are
//! simply shown without a recognition mark. Transient failures are retried
//! with exponential backoff before giving up.

use crate::coordinator::spawn_call;
use crate::error::{CurationError, KeywordServiceError};
use crate::service::KeywordService;
use crate::session::event::SessionEvent;

use common::ErrorLocation;
use models::{DomainListing, Keyword};

use std::collections::BTreeSet;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, info, trace, warn};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep as TokioSleep;

pub const DEFAULT_DOMAIN_RETRY_MAX_ELAPSED: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CatalogStatus {
    NotLoaded,
    Loading,
    Loaded,
    Unavailable,
}

/// A domain tag suggested by extraction, cross-referenced against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainTag {
    pub name: Keyword,
    pub recognized: bool,
}

#[derive(Debug)]
pub struct DomainCatalog {
    status: CatalogStatus,
    domains: BTreeSet<String>,
}

impl DomainCatalog {
    pub fn new() -> Self {
        Self {
            status: CatalogStatus::NotLoaded,
            domains: BTreeSet::new(),
        }
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Mark each tag as recognized or not.
    pub fn cross_reference(&self, tags: &[Keyword]) -> Vec<DomainTag> {
        tags.iter()
            .map(|tag| DomainTag {
                name: tag.clone(),
                recognized: self.contains(tag.as_str()),
            })
            .collect()
    }

    /// Start the one-time load. Returns `false` if a load was already started.
    pub(crate) fn begin_load<S: KeywordService>(
        &mut self,
        service: &Arc<S>,
        events: &UnboundedSender<SessionEvent>,
        max_elapsed: Duration,
    ) -> bool {
        if self.status != CatalogStatus::NotLoaded {
            debug!("Domain catalog load already started ({:?})", self.status);
            return false;
        }

        self.status = CatalogStatus::Loading;

        let service = Arc::clone(service);
        let events = events.clone();

        spawn_call(
            String::from("Domain catalog load"),
            async move { load_with_retry(service.as_ref(), max_elapsed).await },
            move |outcome| {
                if events.send(SessionEvent::DomainsLoaded { outcome }).is_err() {
                    debug!("Session dropped before domain catalog load completed");
                }
            },
        );

        true
    }

    /// Record the load outcome. The catalog is never reloaded afterwards.
    pub(crate) fn complete(
        &mut self,
        outcome: Result<DomainListing, KeywordServiceError>,
    ) -> Result<usize, CurationError> {
        match outcome {
            Ok(listing) => {
                self.domains = listing
                    .domains
                    .into_iter()
                    .map(|domain| domain.trim().to_string())
                    .filter(|domain| !domain.is_empty())
                    .collect();
                self.status = CatalogStatus::Loaded;

                info!("Domain catalog loaded with {} domains", self.domains.len());
                Ok(self.domains.len())
            }
            Err(e) => {
                self.status = CatalogStatus::Unavailable;

                warn!("Domain catalog unavailable: {e}");
                Err(CurationError::DomainCatalogUnavailable {
                    reason: e.reason(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}

impl Default for DomainCatalog {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_with_retry<S: KeywordService>(
    service: &S,
    max_elapsed: Duration,
) -> Result<DomainListing, KeywordServiceError> {
    let mut backoff = ExponentialBackoff {
        max_elapsed_time: Some(max_elapsed),
        ..Default::default()
    };

    loop {
        match service.available_domains().await {
            Ok(listing) => return Ok(listing),
            Err(e) if e.is_retryable() => match backoff.next_backoff() {
                Some(duration) => {
                    trace!("Domain catalog load failed ({e}), retrying after {duration:?}");
                    TokioSleep(duration).await;
                }
                None => return Err(e),
            },
            Err(e) => return Err(e),
        }
    }
}
