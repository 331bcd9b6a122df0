//! Audit record error types.

use thiserror::Error;

/// Errors that can occur when moving snapshots across the persistence edge
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Snapshot serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Snapshot deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot metrics fall outside [0, 1]
    #[error("Snapshot {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Returned when an actor string is not `user:<id>` or `system:<id>`
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid actor '{0}', expected 'user:<id>' or 'system:<id>'")]
pub struct InvalidActor(pub String);
