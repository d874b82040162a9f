//! Error types for the triage_core library.

use crate::record::Violation;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for triage_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Master-data source for the criteria catalog is unreachable
    #[error("criteria catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Assessment record failed pre-save validation; carries every
    /// violation found, not just the first
    #[error("assessment record failed validation ({} violation(s))", .0.len())]
    Validation(Vec<Violation>),

    /// Persistence sink rejected the record; never retried automatically
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// Session state error (e.g. saving a locked assessment)
    #[error("session state error: {0}")]
    State(String),
}
