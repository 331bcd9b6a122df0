//! Transition trail tracking.
//!
//! Provides immutable, append-only tracking of the audit records produced
//! for a workspace, following functional programming principles.

use super::state::WorkspaceState;
use crate::audit::ReasoningTransition;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Ways a recorded trail can fail to replay as a sequential progression.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrailError {
    #[error("Record {position} moves {from} -> {to}, expected a single step forward")]
    NotSingleStep {
        position: usize,
        from: WorkspaceState,
        to: WorkspaceState,
    },

    #[error("Record {position} starts at {found} but the previous record ended at {expected}")]
    Discontinuous {
        position: usize,
        expected: WorkspaceState,
        found: WorkspaceState,
    },

    #[error("Record {position} belongs to workspace '{found}', expected '{expected}'")]
    ForeignRecord {
        position: usize,
        expected: String,
        found: String,
    },
}

/// Ordered trail of transition records for one workspace.
///
/// The trail is immutable - the `record` method returns a new trail with
/// the transition appended.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::audit::{create_transition_record, Actor};
/// use workspace_reasoning::core::{SourceType, TransitionTrail, WorkspaceReasoning, WorkspaceState};
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// let record = create_transition_record(
///     &workspace,
///     WorkspaceState::Received,
///     WorkspaceState::FactsExtracted,
///     Actor::system("intake"),
///     "facts extracted",
/// );
///
/// let trail = TransitionTrail::new().record(record);
/// assert_eq!(
///     trail.get_path(),
///     vec![WorkspaceState::Received, WorkspaceState::FactsExtracted]
/// );
/// assert!(trail.verify_progression().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionTrail {
    transitions: Vec<ReasoningTransition>,
}

impl TransitionTrail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Rebuild a trail from records loaded out of storage, oldest first.
    pub fn from_records(transitions: Vec<ReasoningTransition>) -> Self {
        Self { transitions }
    }

    /// Record a transition, returning a new trail.
    ///
    /// This does not mutate the existing trail.
    pub fn record(&self, transition: ReasoningTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first record, then the `to` state of
    /// each record.
    pub fn get_path(&self) -> Vec<WorkspaceState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from_state);
        }
        path.extend(self.transitions.iter().map(|t| t.to_state));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty trail.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.triggered_at
            .signed_duration_since(first.triggered_at)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[ReasoningTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&ReasoningTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Replay the trail and confirm it is a contiguous, single-step
    /// progression for a single workspace.
    pub fn verify_progression(&self) -> Result<(), TrailError> {
        let Some(first) = self.transitions.first() else {
            return Ok(());
        };

        let mut expected_from = first.from_state;
        for (position, transition) in self.transitions.iter().enumerate() {
            if transition.workspace_id != first.workspace_id {
                return Err(TrailError::ForeignRecord {
                    position,
                    expected: first.workspace_id.clone(),
                    found: transition.workspace_id.clone(),
                });
            }
            if transition.from_state != expected_from {
                return Err(TrailError::Discontinuous {
                    position,
                    expected: expected_from,
                    found: transition.from_state,
                });
            }
            if transition.from_state.next() != Some(transition.to_state) {
                return Err(TrailError::NotSingleStep {
                    position,
                    from: transition.from_state,
                    to: transition.to_state,
                });
            }
            expected_from = transition.to_state;
        }
        Ok(())
    }
}
