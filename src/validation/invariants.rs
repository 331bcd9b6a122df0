//! Aggregate invariant audit.
//!
//! Unlike transition validation, this check does not stop at the first
//! problem: it accumulates every violation using `Validation`, so a single
//! pass reports everything wrong with a loaded workspace.

use crate::core::{WorkspaceReasoning, WorkspaceState};
use crate::metrics;
use crate::policy::ReasoningPolicy;
use chrono::{DateTime, Utc};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

const METRIC_TOLERANCE: f64 = 1e-9;

/// A broken invariant on a stored workspace.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("workspace is locked in state {state}, only READY_FOR_HUMAN can be locked")]
    LockedBeforeReady { state: WorkspaceState },

    #[error("{field} is {value}, outside [0, 1]")]
    MetricOutOfRange { field: &'static str, value: f64 },

    #[error("stored {field} {stored} differs from recomputed {computed}")]
    StaleMetric {
        field: &'static str,
        stored: f64,
        computed: f64,
    },

    #[error("updatedAt {updated_at} precedes createdAt {created_at}")]
    TimestampsReversed {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

/// Check every aggregate invariant, accumulating ALL violations.
///
/// Returns `Validation::Success(())` if the workspace is consistent.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning};
/// use workspace_reasoning::policy::ReasoningPolicy;
/// use workspace_reasoning::validation::check_invariants;
///
/// let mut workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// assert!(check_invariants(&workspace, &ReasoningPolicy::default()).is_success());
///
/// workspace.locked = true;
/// workspace.uncertainty_level = 3.0;
/// assert!(check_invariants(&workspace, &ReasoningPolicy::default()).is_failure());
/// ```
pub fn check_invariants(
    workspace: &WorkspaceReasoning,
    policy: &ReasoningPolicy,
) -> Validation<(), NonEmptyVec<InvariantViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<InvariantViolation>>> = Vec::new();

    checks.push(if workspace.locked && !workspace.current_state.is_final() {
        Validation::fail(InvariantViolation::LockedBeforeReady {
            state: workspace.current_state,
        })
    } else {
        Validation::success(())
    });

    let derived = [
        (
            "uncertaintyLevel",
            workspace.uncertainty_level,
            metrics::calculate_uncertainty_level_with(workspace, policy),
        ),
        (
            "reasoningQuality",
            workspace.reasoning_quality,
            metrics::calculate_reasoning_quality_with(workspace, policy),
        ),
    ];
    for (field, stored, computed) in derived {
        checks.push(if !(0.0..=1.0).contains(&stored) {
            Validation::fail(InvariantViolation::MetricOutOfRange {
                field,
                value: stored,
            })
        } else if (stored - computed).abs() > METRIC_TOLERANCE {
            Validation::fail(InvariantViolation::StaleMetric {
                field,
                stored,
                computed,
            })
        } else {
            Validation::success(())
        });
    }

    checks.push(if workspace.updated_at < workspace.created_at {
        Validation::fail(InvariantViolation::TimestampsReversed {
            created_at: workspace.created_at,
            updated_at: workspace.updated_at,
        })
    } else {
        Validation::success(())
    });

    Validation::all_vec(checks).map(|_| ())
}
