//! Builder API for creating scoring policies.

use crate::policy::{PolicyError, ReasoningPolicy};

/// Builder for creating a [`ReasoningPolicy`], starting from the defaults
pub struct PolicyBuilder {
    policy: ReasoningPolicy,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy: ReasoningPolicy::default(),
        }
    }

    /// Set uncertainty added per unresolved blocking gap
    pub fn blocking_weight(mut self, weight: f64) -> Self {
        self.policy.blocking_weight = weight;
        self
    }

    /// Set uncertainty added per unresolved non-blocking gap
    pub fn non_blocking_weight(mut self, weight: f64) -> Self {
        self.policy.non_blocking_weight = weight;
        self
    }

    /// Set the fact sparsity penalties and the count below which facts are sparse
    pub fn fact_penalties(mut self, none: f64, sparse: f64, threshold: usize) -> Self {
        self.policy.no_facts_penalty = none;
        self.policy.sparse_facts_penalty = sparse;
        self.policy.sparse_facts_threshold = threshold;
        self
    }

    pub fn unconfirmed_context_penalty(mut self, penalty: f64) -> Self {
        self.policy.unconfirmed_context_penalty = penalty;
        self
    }

    pub fn missing_legal_ref_penalty(mut self, penalty: f64) -> Self {
        self.policy.missing_legal_ref_penalty = penalty;
        self
    }

    /// Set the provenance penalty and the user-provided share that triggers it
    pub fn user_provided_penalty(mut self, penalty: f64, ratio: f64) -> Self {
        self.policy.user_provided_penalty = penalty;
        self.policy.user_provided_ratio = ratio;
        self
    }

    pub fn high_risk_threshold(mut self, threshold: f64) -> Self {
        self.policy.high_risk_threshold = threshold;
        self
    }

    /// Build the policy, rejecting out-of-range values
    pub fn build(self) -> Result<ReasoningPolicy, PolicyError> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
