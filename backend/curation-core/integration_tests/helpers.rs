//! Test helpers for curation session integration tests.
//!
//! - `ScriptedService`: in-memory `KeywordService` replaying queued outcomes
//! - Gates: hold a scripted response back until the test releases it
//! - Fixture builders for papers, extraction results and validation reports

use curation_core::KeywordService;
use curation_core::error::KeywordServiceError;

use common::{ErrorLocation, HttpStatusCode};
use models::{
    DomainListing, ExtractionResult, Keyword, PaperData, PaperDataBuilder, ValidationReport,
};

use std::collections::VecDeque;
use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::oneshot;

/// One queued response, optionally held back by a gate.
pub struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<T, KeywordServiceError>,
}

impl<T> Scripted<T> {
    pub fn ready(outcome: Result<T, KeywordServiceError>) -> Self {
        Self {
            gate: None,
            outcome,
        }
    }

    /// Response delivered only after the returned sender fires (or is dropped).
    pub fn gated(outcome: Result<T, KeywordServiceError>) -> (Self, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        (
            Self {
                gate: Some(gate),
                outcome,
            },
            release,
        )
    }

    async fn deliver(self) -> Result<T, KeywordServiceError> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.outcome
    }
}

/// Keyword service that replays scripted outcomes in call order.
///
/// An empty domain queue answers with an empty listing; empty extraction or
/// validation queues answer with a contract error.
#[derive(Default)]
pub struct ScriptedService {
    extractions: Mutex<VecDeque<Scripted<ExtractionResult>>>,
    validations: Mutex<VecDeque<Scripted<ValidationReport>>>,
    domains: Mutex<VecDeque<Scripted<DomainListing>>>,
    validated: Mutex<Vec<Vec<String>>>,
    extract_calls: AtomicUsize,
    validate_calls: AtomicUsize,
    domain_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_extraction(&self, scripted: Scripted<ExtractionResult>) {
        self.extractions.lock().expect("lock").push_back(scripted);
    }

    pub fn push_validation(&self, scripted: Scripted<ValidationReport>) {
        self.validations.lock().expect("lock").push_back(scripted);
    }

    pub fn push_domains(&self, scripted: Scripted<DomainListing>) {
        self.domains.lock().expect("lock").push_back(scripted);
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn domain_calls(&self) -> usize {
        self.domain_calls.load(Ordering::SeqCst)
    }

    /// Keyword lists submitted for validation, in call order.
    pub fn validated(&self) -> Vec<Vec<String>> {
        self.validated.lock().expect("lock").clone()
    }
}

impl KeywordService for ScriptedService {
    async fn extract_keywords(
        &self,
        _paper: &PaperData,
    ) -> Result<ExtractionResult, KeywordServiceError> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.extractions.lock().expect("lock").pop_front();

        match next {
            Some(scripted) => scripted.deliver().await,
            None => Err(contract_error("no scripted extraction")),
        }
    }

    async fn validate_keywords(
        &self,
        keywords: &[Keyword],
    ) -> Result<ValidationReport, KeywordServiceError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.validated
            .lock()
            .expect("lock")
            .push(keywords.iter().map(|k| k.as_str().to_string()).collect());
        let next = self.validations.lock().expect("lock").pop_front();

        match next {
            Some(scripted) => scripted.deliver().await,
            None => Err(contract_error("no scripted validation")),
        }
    }

    async fn available_domains(&self) -> Result<DomainListing, KeywordServiceError> {
        self.domain_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.domains.lock().expect("lock").pop_front();

        match next {
            Some(scripted) => scripted.deliver().await,
            None => Ok(DomainListing::default()),
        }
    }
}

// ============================================
// FIXTURES
// ============================================

pub fn paper() -> PaperData {
    PaperDataBuilder::default()
        .with_id("2401.00001")
        .with_title("Attention Is All You Need")
        .with_author("A. Vaswani")
        .with_summary("We propose the Transformer, based solely on attention.")
        .build()
        .expect("valid paper")
}

pub fn keywords(texts: &[&str]) -> Vec<Keyword> {
    texts
        .iter()
        .map(|text| Keyword::parse(text).expect("valid keyword"))
        .collect()
}

pub fn extraction(primary: &[&str], confidence_score: f64) -> ExtractionResult {
    ExtractionResult {
        primary_keywords: keywords(primary),
        secondary_keywords: Vec::new(),
        technical_terms: Vec::new(),
        domain_tags: Vec::new(),
        confidence_score,
        extraction_method: Some("scripted".to_string()),
    }
}

pub fn report(valid: &[&str], invalid: &[&str]) -> ValidationReport {
    ValidationReport {
        valid_keywords: valid.iter().map(|s| s.to_string()).collect(),
        invalid_keywords: invalid.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

pub fn listing(domains: &[&str]) -> DomainListing {
    DomainListing {
        domains: domains.iter().map(|s| s.to_string()).collect(),
        technical_terms: Vec::new(),
    }
}

#[track_caller]
pub fn server_error(status: u16) -> KeywordServiceError {
    KeywordServiceError::Server {
        status_code: HttpStatusCode::from(status),
        message: "scripted failure".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
pub fn contract_error(message: &str) -> KeywordServiceError {
    KeywordServiceError::Contract {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Keyword service whose extraction and validation calls panic.
///
/// Domain listings still answer, empty.
#[derive(Default)]
pub struct PanickingService;

impl KeywordService for PanickingService {
    async fn extract_keywords(
        &self,
        _paper: &PaperData,
    ) -> Result<ExtractionResult, KeywordServiceError> {
        panic!("extraction backend crashed");
    }

    async fn validate_keywords(
        &self,
        _keywords: &[Keyword],
    ) -> Result<ValidationReport, KeywordServiceError> {
        panic!("validation backend crashed");
    }

    async fn available_domains(&self) -> Result<DomainListing, KeywordServiceError> {
        Ok(DomainListing::default())
    }
}
