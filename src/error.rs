//! Error types for campus-records
//!
//! Every error here is recoverable: the engine resolves each one to a safe
//! default or a reported warning, never a terminated session.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// campus-records error types
#[derive(Error, Debug)]
pub enum Error {
    /// A student-scoped operation ran before the engine finished loading
    #[error("Engine not ready: student records are still loading")]
    NotReady,

    /// A persisted collection snapshot could not be parsed or validated
    #[error("Malformed stored data under key '{key}': {reason}\nFalling back to seed data")]
    MalformedStoredData {
        /// Collection key that failed
        key: String,
        /// Parse or validation failure
        reason: String,
    },

    /// The durable write after a mutation failed (in-memory change is kept)
    #[error("Persistence write failed for key '{key}': {reason}")]
    PersistenceWrite {
        /// Collection key that failed
        key: String,
        /// Underlying failure
        reason: String,
    },

    /// Input rejected at the boundary (unknown enum value, bad marks, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
