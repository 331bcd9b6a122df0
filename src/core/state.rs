//! Workspace states and their canonical order.
//!
//! A workspace's reasoning moves through a fixed, totally ordered sequence
//! of states. All methods here are pure: states are immutable values that
//! describe a position in that sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a workspace's reasoning in the canonical progression.
///
/// `Received` is the initial state and `ReadyForHuman` is terminal. The
/// declaration order of the variants is the canonical order.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::WorkspaceState;
///
/// let state = WorkspaceState::Received;
/// assert_eq!(state.index(), 0);
/// assert_eq!(state.next(), Some(WorkspaceState::FactsExtracted));
/// assert!(WorkspaceState::ReadyForHuman.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceState {
    Received,
    FactsExtracted,
    ContextIdentified,
    ObligationsDeduced,
    MissingIdentified,
    RiskEvaluated,
    ActionProposed,
    ReadyForHuman,
}

impl WorkspaceState {
    /// Every state, in canonical order.
    pub const ORDER: [WorkspaceState; 8] = [
        Self::Received,
        Self::FactsExtracted,
        Self::ContextIdentified,
        Self::ObligationsDeduced,
        Self::MissingIdentified,
        Self::RiskEvaluated,
        Self::ActionProposed,
        Self::ReadyForHuman,
    ];

    /// The state a workspace must have reached before it can be handed to a human.
    pub const PRE_TERMINAL: WorkspaceState = Self::ActionProposed;

    /// Get the state's persisted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::FactsExtracted => "FACTS_EXTRACTED",
            Self::ContextIdentified => "CONTEXT_IDENTIFIED",
            Self::ObligationsDeduced => "OBLIGATIONS_DEDUCED",
            Self::MissingIdentified => "MISSING_IDENTIFIED",
            Self::RiskEvaluated => "RISK_EVALUATED",
            Self::ActionProposed => "ACTION_PROPOSED",
            Self::ReadyForHuman => "READY_FOR_HUMAN",
        }
    }

    /// Position of this state in [`WorkspaceState::ORDER`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The state immediately after this one, or `None` for the terminal state.
    pub fn next(&self) -> Option<WorkspaceState> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    /// Check if this is the terminal state of the machine.
    ///
    /// Anything that happens after `ReadyForHuman` belongs to the human
    /// review workflow, not to this machine.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::ReadyForHuman)
    }

    /// Check if this is the initial state.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Received)
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::Received
    }
}

impl fmt::Display for WorkspaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a state name that is not part of the canonical order.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown workspace state '{0}'")]
pub struct UnknownState(pub String);

impl FromStr for WorkspaceState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .iter()
            .find(|state| state.name() == s)
            .copied()
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}
