//! Derived uncertainty and quality scores.
//!
//! Both scores are pure functions of the workspace content: identical
//! content always yields identical scores. They feed audit snapshots and
//! display, so they must be reproducible.

use crate::core::WorkspaceReasoning;
use crate::policy::ReasoningPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Freshly computed metrics, ready to be merged into the aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPatch {
    pub uncertainty_level: f64,
    pub reasoning_quality: f64,
    pub updated_at: DateTime<Utc>,
}

/// How uncertain the reasoning is, from 0.0 (no open gaps) to 1.0.
///
/// Each unresolved blocking gap weighs 0.3, each unresolved non-blocking gap
/// 0.1. The sum is kept within [0, 1]. A workspace with no missing elements
/// scores exactly 0.0.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{MissingElement, SourceType, WorkspaceReasoning};
/// use workspace_reasoning::metrics::calculate_uncertainty_level;
///
/// let mut workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// assert_eq!(calculate_uncertainty_level(&workspace), 0.0);
///
/// workspace.missing_elements = vec![
///     MissingElement::blocking("Signed lease"),
///     MissingElement::non_blocking("Tenant phone number"),
/// ];
/// assert!((calculate_uncertainty_level(&workspace) - 0.4).abs() < 1e-9);
/// ```
pub fn calculate_uncertainty_level(workspace: &WorkspaceReasoning) -> f64 {
    calculate_uncertainty_level_with(workspace, &ReasoningPolicy::default())
}

pub fn calculate_uncertainty_level_with(
    workspace: &WorkspaceReasoning,
    policy: &ReasoningPolicy,
) -> f64 {
    if workspace.missing_elements.is_empty() {
        return 0.0;
    }

    let blocking = workspace.blocking_unresolved_count() as f64;
    let non_blocking = workspace.non_blocking_unresolved_count() as f64;
    let score = blocking * policy.blocking_weight + non_blocking * policy.non_blocking_weight;

    unit_interval(score, 1.0)
}

/// How well-founded the reasoning is, from 0.0 to 1.0.
///
/// Starts at 1.0 and subtracts every applicable penalty in one pass:
/// - no facts: 0.4, or fewer than three facts: 0.2
/// - no confirmed context hypothesis: 0.3
/// - obligations without a legal citation: 0.1 scaled by their share
/// - more than half of the facts user-provided: 0.2
///
/// The result is floored at 0.0 once, at the end. Under a custom policy
/// it is also capped at 1.0.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning};
/// use workspace_reasoning::metrics::calculate_reasoning_quality;
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// assert!((calculate_reasoning_quality(&workspace) - 0.3).abs() < 1e-9);
/// ```
pub fn calculate_reasoning_quality(workspace: &WorkspaceReasoning) -> f64 {
    calculate_reasoning_quality_with(workspace, &ReasoningPolicy::default())
}

pub fn calculate_reasoning_quality_with(
    workspace: &WorkspaceReasoning,
    policy: &ReasoningPolicy,
) -> f64 {
    let mut quality = 1.0;

    let fact_count = workspace.facts.len();
    if fact_count == 0 {
        quality -= policy.no_facts_penalty;
    } else if fact_count < policy.sparse_facts_threshold {
        quality -= policy.sparse_facts_penalty;
    }

    if !workspace.has_confirmed_context() {
        quality -= policy.unconfirmed_context_penalty;
    }

    if !workspace.obligations.is_empty() {
        let uncited = workspace.obligations_without_legal_ref() as f64;
        let share = uncited / workspace.obligations.len() as f64;
        quality -= policy.missing_legal_ref_penalty * share;
    }

    let user_provided = workspace.user_provided_fact_count() as f64;
    if user_provided > policy.user_provided_ratio * fact_count as f64 {
        quality -= policy.user_provided_penalty;
    }

    unit_interval(quality, 0.0)
}

/// Clamp a score into [0, 1]. An unvalidated policy can push a score out of
/// range or to NaN; NaN collapses to `nan_as`.
fn unit_interval(value: f64, nan_as: f64) -> f64 {
    if value.is_nan() {
        nan_as
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Recompute both metrics and stamp the patch with the current time.
pub fn update_workspace_metrics(workspace: &WorkspaceReasoning) -> MetricsPatch {
    update_workspace_metrics_with(workspace, &ReasoningPolicy::default())
}

pub fn update_workspace_metrics_with(
    workspace: &WorkspaceReasoning,
    policy: &ReasoningPolicy,
) -> MetricsPatch {
    MetricsPatch {
        uncertainty_level: calculate_uncertainty_level_with(workspace, policy),
        reasoning_quality: calculate_reasoning_quality_with(workspace, policy),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CertaintyLevel, ContextHypothesis, Fact, FactSource, MissingElement, Obligation,
        SourceType,
    };
    use crate::policy::PolicyBuilder;

    const EPSILON: f64 = 1e-9;

    fn workspace() -> WorkspaceReasoning {
        WorkspaceReasoning::new("ws-metrics", SourceType::DocumentUpload)
    }

    fn extracted(n: usize) -> Vec<Fact> {
        (0..n)
            .map(|i| Fact::new(format!("fact {i}"), FactSource::DocumentExtracted))
            .collect()
    }

    fn confirmed() -> ContextHypothesis {
        ContextHypothesis::new("Employment law", CertaintyLevel::Confirmed)
    }

    #[test]
    fn uncertainty_is_zero_without_missing_elements() {
        assert_eq!(calculate_uncertainty_level(&workspace()), 0.0);
    }

    #[test]
    fn uncertainty_weighs_blocking_and_non_blocking_gaps() {
        let mut ws = workspace();
        ws.missing_elements = vec![
            MissingElement::blocking("Contract"),
            MissingElement::non_blocking("Payslips"),
        ];

        assert!((calculate_uncertainty_level(&ws) - 0.4).abs() < EPSILON);
    }

    #[test]
    fn resolved_gaps_add_no_uncertainty() {
        let mut ws = workspace();
        ws.missing_elements = vec![
            MissingElement::blocking("Contract").resolved(),
            MissingElement::non_blocking("Payslips").resolved(),
        ];

        assert_eq!(calculate_uncertainty_level(&ws), 0.0);
    }

    #[test]
    fn uncertainty_is_capped_at_one() {
        let mut ws = workspace();
        ws.missing_elements = (0..5)
            .map(|i| MissingElement::blocking(format!("gap {i}")))
            .collect();

        assert_eq!(calculate_uncertainty_level(&ws), 1.0);
    }

    #[test]
    fn empty_workspace_quality_applies_fact_and_context_penalties() {
        assert!((calculate_reasoning_quality(&workspace()) - 0.3).abs() < EPSILON);
    }

    #[test]
    fn well_founded_workspace_scores_full_quality() {
        let mut ws = workspace();
        ws.facts = extracted(3);
        ws.context_hypotheses.push(confirmed());
        ws.obligations
            .push(Obligation::new("Pay notice period").with_legal_ref("Labour Code L1234-1"));

        assert_eq!(calculate_reasoning_quality(&ws), 1.0);
    }

    #[test]
    fn sparse_facts_cost_less_than_no_facts() {
        let mut ws = workspace();
        ws.context_hypotheses.push(confirmed());
        ws.facts = extracted(2);

        assert!((calculate_reasoning_quality(&ws) - 0.8).abs() < EPSILON);
    }

    #[test]
    fn uncited_obligations_are_penalised_by_share() {
        let mut ws = workspace();
        ws.facts = extracted(4);
        ws.context_hypotheses.push(confirmed());
        ws.obligations = vec![
            Obligation::new("Deliver goods").with_legal_ref("Sale of Goods Act s.27"),
            Obligation::new("Accept delivery"),
        ];

        assert!((calculate_reasoning_quality(&ws) - 0.95).abs() < EPSILON);
    }

    #[test]
    fn mostly_user_provided_facts_are_penalised() {
        let mut ws = workspace();
        ws.context_hypotheses.push(confirmed());
        ws.facts = vec![
            Fact::new("Employer shouted", FactSource::UserProvided),
            Fact::new("No written warning", FactSource::UserProvided),
            Fact::new("Dismissal letter dated 3 May", FactSource::DocumentExtracted),
        ];

        assert!((calculate_reasoning_quality(&ws) - 0.8).abs() < EPSILON);
    }

    #[test]
    fn exactly_half_user_provided_is_not_penalised() {
        let mut ws = workspace();
        ws.context_hypotheses.push(confirmed());
        ws.facts = vec![
            Fact::new("a", FactSource::UserProvided),
            Fact::new("b", FactSource::UserProvided),
            Fact::new("c", FactSource::Inferred),
            Fact::new("d", FactSource::DocumentExtracted),
        ];

        assert_eq!(calculate_reasoning_quality(&ws), 1.0);
    }

    #[test]
    fn quality_is_floored_at_zero() {
        let policy = PolicyBuilder::new()
            .fact_penalties(1.0, 0.2, 3)
            .unconfirmed_context_penalty(1.0)
            .build()
            .unwrap();

        assert_eq!(calculate_reasoning_quality_with(&workspace(), &policy), 0.0);
    }

    #[test]
    fn metrics_are_deterministic() {
        let mut ws = workspace();
        ws.facts = extracted(1);
        ws.missing_elements = vec![MissingElement::non_blocking("Receipts")];

        assert_eq!(
            calculate_uncertainty_level(&ws),
            calculate_uncertainty_level(&ws)
        );
        assert_eq!(
            calculate_reasoning_quality(&ws),
            calculate_reasoning_quality(&ws)
        );
    }

    #[test]
    fn update_patch_carries_both_metrics() {
        let mut ws = workspace();
        ws.missing_elements = vec![MissingElement::blocking("ID document")];
        let before = Utc::now();

        let patch = update_workspace_metrics(&ws);

        assert!((patch.uncertainty_level - 0.3).abs() < EPSILON);
        assert!((patch.reasoning_quality - 0.3).abs() < EPSILON);
        assert!(patch.updated_at >= before);

        ws.apply_metrics(patch);
        assert_eq!(ws.uncertainty_level, patch.uncertainty_level);
        assert_eq!(ws.updated_at, patch.updated_at);
    }

    #[test]
    fn custom_policy_changes_weights() {
        let policy = PolicyBuilder::new().blocking_weight(0.5).build().unwrap();
        let mut ws = workspace();
        ws.missing_elements = vec![MissingElement::blocking("Deed")];

        assert!((calculate_uncertainty_level_with(&ws, &policy) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn unvalidated_policy_cannot_push_metrics_out_of_range() {
        let policy = ReasoningPolicy {
            blocking_weight: -2.0,
            unconfirmed_context_penalty: -5.0,
            ..ReasoningPolicy::default()
        };
        assert!(policy.validate().is_err());

        let mut ws = workspace();
        ws.missing_elements = vec![MissingElement::blocking("Deed")];

        assert_eq!(calculate_uncertainty_level_with(&ws, &policy), 0.0);
        assert_eq!(calculate_reasoning_quality_with(&ws, &policy), 1.0);

        let patch = update_workspace_metrics_with(&ws, &policy);
        assert!((0.0..=1.0).contains(&patch.uncertainty_level));
        assert!((0.0..=1.0).contains(&patch.reasoning_quality));
    }

    #[test]
    fn nan_policy_weights_collapse_to_the_pessimistic_bound() {
        let policy = ReasoningPolicy {
            blocking_weight: f64::NAN,
            no_facts_penalty: f64::NAN,
            ..ReasoningPolicy::default()
        };
        let mut ws = workspace();
        ws.missing_elements = vec![MissingElement::blocking("Deed")];

        assert_eq!(calculate_uncertainty_level_with(&ws, &policy), 1.0);
        assert_eq!(calculate_reasoning_quality_with(&ws, &policy), 0.0);
    }
}
