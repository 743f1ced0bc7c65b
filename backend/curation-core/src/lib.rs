pub mod confidence;
pub mod config;
pub mod coordinator;
pub mod domain_catalog;
pub mod error;
pub mod importer_client;
pub mod keyword_set;
pub mod service;
pub mod session;
pub mod upload;

#[cfg(test)]
mod tests;

pub use confidence::{Confidence, ConfidenceLabel, classify};
pub use importer_client::ImporterClient;
pub use keyword_set::KeywordSet;
pub use service::KeywordService;
pub use session::{CurationSession, SessionState, SessionUpdate};
pub use upload::{FinalizedKeywords, KeywordSink};

pub const IMPORTER_SERVICE_HOSTNAME: &str = "127.0.0.1";
pub const IMPORTER_SERVICE_PORT: u16 = 8000;
pub const IMPORTER_SERVICE_BASE_URL: &str = const_format::concatcp!(
    "http://",
    IMPORTER_SERVICE_HOSTNAME,
    ":",
    IMPORTER_SERVICE_PORT,
    "/api/"
);

/// Environment variable that overrides the configured service base URL.
pub const IMPORTER_SERVICE_URL_ENV: &str = "KDB_API_URL";
