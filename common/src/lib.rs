//! Shared primitives for the keyword curation workspace.
//!
//! Everything here is dependency-light and used by every other crate:
//!
//! - **common** (this crate): error location tracking, HTTP status classification
//! - **models**: pure data structures (papers, keywords, extraction/validation snapshots)
//! - **curation-core**: the curation session and the remote keyword service adapter
//! - **curator**: command-line wiring

pub mod error;
pub mod http_status;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;
