//! Caller-side shell that drives a workspace through the state machine.
//!
//! The pure core (validation, metrics, audit) never mutates anything. This
//! module composes it the way a service would: validate, build the audit
//! record, apply the new state, refresh metrics, and append to the trail.
//! Mutation requires `&mut self`, so the borrow checker guarantees exclusive
//! access for the whole read-validate-write cycle.

use crate::audit::{create_transition_record, Actor, ReasoningTransition};
use crate::core::{TransitionTrail, WorkspaceReasoning, WorkspaceState};
use crate::metrics;
use crate::policy::ReasoningPolicy;
use crate::validation::{self, Rejection};
use chrono::Utc;

/// A workspace together with its transition trail.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::audit::Actor;
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning, WorkspaceState};
/// use workspace_reasoning::machine::ReasoningMachine;
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::DocumentUpload);
/// let mut machine = ReasoningMachine::new(workspace);
///
/// machine.step(Actor::system("extractor"), "document parsed").unwrap();
/// assert_eq!(machine.current_state(), WorkspaceState::FactsExtracted);
///
/// // No facts yet, so context identification is refused.
/// assert!(machine.step(Actor::system("analyser"), "context").is_err());
/// assert_eq!(machine.trail().len(), 1);
/// ```
pub struct ReasoningMachine {
    workspace: WorkspaceReasoning,
    trail: TransitionTrail,
    policy: ReasoningPolicy,
}

impl ReasoningMachine {
    /// Start from a workspace with an empty trail and the default policy.
    pub fn new(workspace: WorkspaceReasoning) -> Self {
        Self::resume(workspace, TransitionTrail::new())
    }

    /// Continue from a stored workspace and its previously recorded trail.
    pub fn resume(workspace: WorkspaceReasoning, trail: TransitionTrail) -> Self {
        Self {
            workspace,
            trail,
            policy: ReasoningPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReasoningPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn workspace(&self) -> &WorkspaceReasoning {
        &self.workspace
    }

    /// Mutable access for upstream analysis appending content.
    ///
    /// Metrics are not refreshed automatically; call
    /// [`ReasoningMachine::refresh_metrics`] once the content is in place.
    pub fn workspace_mut(&mut self) -> Result<&mut WorkspaceReasoning, Rejection> {
        self.ensure_unlocked()?;
        Ok(&mut self.workspace)
    }

    pub fn trail(&self) -> &TransitionTrail {
        &self.trail
    }

    pub fn policy(&self) -> &ReasoningPolicy {
        &self.policy
    }

    pub fn current_state(&self) -> WorkspaceState {
        self.workspace.current_state
    }

    pub fn is_final(&self) -> bool {
        self.workspace.current_state.is_final()
    }

    pub fn is_locked(&self) -> bool {
        self.workspace.locked
    }

    /// Recompute the derived metrics from the current content.
    pub fn refresh_metrics(&mut self) {
        let patch = metrics::update_workspace_metrics_with(&self.workspace, &self.policy);
        tracing::debug!(
            workspace_id = %self.workspace.id,
            uncertainty_before = self.workspace.uncertainty_level,
            uncertainty_after = patch.uncertainty_level,
            quality_before = self.workspace.reasoning_quality,
            quality_after = patch.reasoning_quality,
            "workspace metrics refreshed"
        );
        self.workspace.apply_metrics(patch);
    }

    /// Attempt to move the workspace to `to`.
    ///
    /// On success the returned record has already been appended to the
    /// trail and the workspace carries the new state and refreshed metrics.
    /// On rejection nothing changes.
    pub fn advance(
        &mut self,
        to: WorkspaceState,
        triggered_by: Actor,
        reason: impl Into<String>,
    ) -> Result<ReasoningTransition, Rejection> {
        let from = self.workspace.current_state;

        let decision = self.ensure_unlocked().and_then(|()| {
            validation::validate_state_transition(from, to, &self.workspace)
        });
        if let Err(rejection) = decision {
            tracing::warn!(
                workspace_id = %self.workspace.id,
                from = %from,
                to = %to,
                actor = %triggered_by,
                kind = ?rejection.kind(),
                reason = %rejection,
                "reasoning transition rejected"
            );
            return Err(rejection);
        }

        let record = create_transition_record(&self.workspace, from, to, triggered_by, reason);
        tracing::info!(
            workspace_id = %self.workspace.id,
            transition_id = %record.id,
            from = %from,
            to = %to,
            actor = %record.triggered_by,
            "reasoning transition accepted"
        );

        self.workspace.current_state = to;
        self.refresh_metrics();
        self.trail = self.trail.record(record.clone());
        Ok(record)
    }

    /// Advance to the next state in the canonical order.
    pub fn step(
        &mut self,
        triggered_by: Actor,
        reason: impl Into<String>,
    ) -> Result<ReasoningTransition, Rejection> {
        let current = self.workspace.current_state;
        let Some(next) = current.next() else {
            tracing::warn!(
                workspace_id = %self.workspace.id,
                state = %current,
                "no state follows the terminal state"
            );
            return Err(Rejection::NoNextState { state: current });
        };
        self.advance(next, triggered_by, reason)
    }

    /// Seal the workspace for human action.
    ///
    /// Re-checks readiness, since content may have changed after the
    /// workspace reached `READY_FOR_HUMAN`.
    pub fn lock(&mut self, locked_by: Actor) -> Result<(), Rejection> {
        if let Err(rejection) = validation::lock_eligibility(&self.workspace) {
            tracing::warn!(
                workspace_id = %self.workspace.id,
                state = %self.workspace.current_state,
                actor = %locked_by,
                kind = ?rejection.kind(),
                reason = %rejection,
                "workspace lock rejected"
            );
            return Err(rejection);
        }

        self.workspace.locked = true;
        self.workspace.updated_at = Utc::now();
        tracing::info!(
            workspace_id = %self.workspace.id,
            actor = %locked_by,
            "workspace locked"
        );
        Ok(())
    }

    /// Split the machine back into the workspace and its trail for persisting.
    pub fn into_parts(self) -> (WorkspaceReasoning, TransitionTrail) {
        (self.workspace, self.trail)
    }

    fn ensure_unlocked(&self) -> Result<(), Rejection> {
        if self.workspace.locked {
            return Err(Rejection::AlreadyLocked {
                workspace_id: self.workspace.id.clone(),
            });
        }
        Ok(())
    }
}
