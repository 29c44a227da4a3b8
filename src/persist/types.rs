//! Data types for painting persistence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draw::SurfaceError;

/// A stored painting, as listed by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingRecord {
    /// Unique painting identifier.
    pub id: String,
    /// Owner identifier the painting was saved under (usually an email).
    pub owner: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// PNG file name relative to the store directory.
    pub file: String,
}

/// Errors that can occur while persisting a painting.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("No owner given; sign in before saving paintings")]
    MissingOwner,

    #[error("Owner '{0}' has no characters usable in a file name")]
    InvalidOwner(String),

    #[error("Failed to encode painting: {0}")]
    Encode(#[from] SurfaceError),

    #[error("Painting store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Painting index is unreadable: {0}")]
    Index(#[from] serde_json::Error),

    #[error("Painting store rejected the request: {0}")]
    Rejected(String),

    #[error("Persist task failed: {0}")]
    Task(String),
}

/// Decided result of one persist attempt, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Saved(PaintingRecord),
    Failed(String),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved(_))
    }
}

/// Turns a store result into an outcome, capturing the error message.
pub fn decide(result: Result<PaintingRecord, PersistError>) -> PersistOutcome {
    match result {
        Ok(record) => PersistOutcome::Saved(record),
        Err(err) => PersistOutcome::Failed(err.to_string()),
    }
}
