//! Error types for the analytics core.

use thiserror::Error;

/// Errors surfaced by the registry, pattern store, and snapshot layer.
#[derive(Error, Debug)]
pub enum AgentError {
    /// An observation carried a value outside its contract
    /// (hour outside [0, 24), negative duration or speed).
    #[error("invalid observation: {field} = {value}")]
    InvalidObservation { field: &'static str, value: f64 },

    /// Snapshot file I/O error
    #[error("snapshot io error: {0}")]
    SnapshotIo(#[from] std::io::Error),

    /// Snapshot JSON encode/decode error
    #[error("snapshot json error: {0}")]
    SnapshotJson(#[from] serde_json::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, AgentError>;
