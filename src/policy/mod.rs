//! Tunable weights and thresholds for the metrics and the summary.
//!
//! The default policy reproduces the standard scoring exactly; the plain
//! metric functions always use it. A host application can load another
//! policy from JSON and pass it to the `*_with` variants.
//!
//! # Example
//!
//! ```rust
//! use workspace_reasoning::policy::{PolicyBuilder, ReasoningPolicy};
//!
//! let policy = PolicyBuilder::new()
//!     .blocking_weight(0.5)
//!     .high_risk_threshold(7.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(policy.blocking_weight, 0.5);
//!
//! let loaded = ReasoningPolicy::from_json(r#"{ "nonBlockingWeight": 0.05 }"#).unwrap();
//! assert_eq!(loaded.non_blocking_weight, 0.05);
//! assert_eq!(loaded.blocking_weight, 0.3);
//! ```

pub mod builder;
pub mod error;

pub use builder::PolicyBuilder;
pub use error::PolicyError;

use serde::{Deserialize, Serialize};

/// Weights and thresholds used to score a workspace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReasoningPolicy {
    /// Uncertainty added per unresolved blocking gap
    pub blocking_weight: f64,
    /// Uncertainty added per unresolved non-blocking gap
    pub non_blocking_weight: f64,
    pub no_facts_penalty: f64,
    /// Applied when there are some facts but fewer than `sparse_facts_threshold`
    pub sparse_facts_penalty: f64,
    pub sparse_facts_threshold: usize,
    pub unconfirmed_context_penalty: f64,
    /// Scaled by the share of obligations lacking a citation
    pub missing_legal_ref_penalty: f64,
    pub user_provided_penalty: f64,
    /// Share of user-provided facts above which the penalty applies
    pub user_provided_ratio: f64,
    /// Risks scoring at or above this count as high
    pub high_risk_threshold: f64,
}

impl Default for ReasoningPolicy {
    fn default() -> Self {
        Self {
            blocking_weight: 0.3,
            non_blocking_weight: 0.1,
            no_facts_penalty: 0.4,
            sparse_facts_penalty: 0.2,
            sparse_facts_threshold: 3,
            unconfirmed_context_penalty: 0.3,
            missing_legal_ref_penalty: 0.1,
            user_provided_penalty: 0.2,
            user_provided_ratio: 0.5,
            high_risk_threshold: 6.0,
        }
    }
}

impl ReasoningPolicy {
    /// Parse a policy from JSON. Missing keys keep their default value.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check that every weight can keep the metrics within [0, 1].
    pub fn validate(&self) -> Result<(), PolicyError> {
        let unit_fields = [
            ("blockingWeight", self.blocking_weight),
            ("nonBlockingWeight", self.non_blocking_weight),
            ("noFactsPenalty", self.no_facts_penalty),
            ("sparseFactsPenalty", self.sparse_facts_penalty),
            ("unconfirmedContextPenalty", self.unconfirmed_context_penalty),
            ("missingLegalRefPenalty", self.missing_legal_ref_penalty),
            ("userProvidedPenalty", self.user_provided_penalty),
            ("userProvidedRatio", self.user_provided_ratio),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::OutOfRange { field, value });
            }
        }

        if !self.high_risk_threshold.is_finite() || self.high_risk_threshold < 0.0 {
            return Err(PolicyError::Invalid(format!(
                "highRiskThreshold must be a non-negative number, got {}",
                self.high_risk_threshold
            )));
        }

        Ok(())
    }
}
