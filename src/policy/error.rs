//! Policy loading errors.

use thiserror::Error;

/// Errors that can occur when loading or building a policy
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Policy field {field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Invalid policy: {0}")]
    Invalid(String),
}
