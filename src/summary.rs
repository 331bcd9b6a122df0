//! Human-readable executive summary of a workspace.
//!
//! The summary is for display only and is never parsed back.

use crate::core::{WorkspaceReasoning, WorkspaceState};
use crate::policy::ReasoningPolicy;
use serde::{Deserialize, Serialize};

/// The counts surfaced by the executive summary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounts {
    pub facts: usize,
    pub confirmed_contexts: usize,
    pub obligations: usize,
    pub blocking_unresolved: usize,
    pub high_risks: usize,
    pub current_state: WorkspaceState,
    pub uncertainty_level: f64,
    pub reasoning_quality: f64,
}

impl SummaryCounts {
    pub fn of(workspace: &WorkspaceReasoning, policy: &ReasoningPolicy) -> Self {
        Self {
            facts: workspace.facts.len(),
            confirmed_contexts: workspace.confirmed_context_count(),
            obligations: workspace.obligations.len(),
            blocking_unresolved: workspace.blocking_unresolved_count(),
            high_risks: workspace.high_risk_count(policy.high_risk_threshold),
            current_state: workspace.current_state,
            uncertainty_level: workspace.uncertainty_level,
            reasoning_quality: workspace.reasoning_quality,
        }
    }
}

/// Render the summary with the default high-risk threshold (6).
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning};
/// use workspace_reasoning::summary::generate_executive_summary;
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// let summary = generate_executive_summary(&workspace);
/// assert!(summary.contains("State: RECEIVED"));
/// assert!(summary.contains("Facts: 0"));
/// ```
pub fn generate_executive_summary(workspace: &WorkspaceReasoning) -> String {
    generate_executive_summary_with(workspace, &ReasoningPolicy::default())
}

pub fn generate_executive_summary_with(
    workspace: &WorkspaceReasoning,
    policy: &ReasoningPolicy,
) -> String {
    let counts = SummaryCounts::of(workspace, policy);
    let procedure = workspace
        .procedure_type
        .as_deref()
        .unwrap_or("unclassified");

    let mut lines = vec![
        format!("Workspace {} ({procedure})", workspace.id),
        format!("State: {}", counts.current_state),
        format!("Facts: {}", counts.facts),
        format!("Confirmed contexts: {}", counts.confirmed_contexts),
        format!("Obligations: {}", counts.obligations),
        format!(
            "Unresolved blocking elements: {}",
            counts.blocking_unresolved
        ),
        format!(
            "High risks (score >= {}): {}",
            policy.high_risk_threshold, counts.high_risks
        ),
        format!("Uncertainty: {}", percent(counts.uncertainty_level)),
        format!("Reasoning quality: {}", percent(counts.reasoning_quality)),
    ];
    if workspace.locked {
        lines.push("Locked by reviewer".to_string());
    }
    lines.join("\n")
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
