use serde::Serialize;

/// Observable lifecycle state of a curation session.
///
/// ```text
/// Idle -> Extracting -> Ready <-> Validating
///                         |
///                         v
///                     Finalized
/// ```
///
/// Extraction and validation may overlap; while both are outstanding the
/// session reports `Extracting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Extracting,
    Ready,
    Validating,
    Finalized,
}
