//! Rejection reasons for transition and lock attempts.

use crate::core::WorkspaceState;
use thiserror::Error;

/// Why a transition or lock attempt was refused.
///
/// Rejections are expected and frequent; they are part of normal control
/// flow. The `Display` output is the operator-facing reason. It names
/// internal states, so it is not meant for end clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejection {
    #[error("cannot return to a previous state without explicit validation ({from} -> {to})")]
    Rewind {
        from: WorkspaceState,
        to: WorkspaceState,
    },

    #[error("cannot skip states, sequential progression required ({from} -> {to})")]
    Skip {
        from: WorkspaceState,
        to: WorkspaceState,
    },

    #[error("workspace is already in state {state}")]
    AlreadyInState { state: WorkspaceState },

    #[error("no state follows {state}")]
    NoNextState { state: WorkspaceState },

    #[error("at least one fact must be extracted before identifying context")]
    NoFacts,

    #[error("at least one context must be confirmed before deducing obligations")]
    NoConfirmedContext,

    #[error("{} blocking {} not resolved", .count, element_noun(.count))]
    BlockingElementsUnresolved { count: usize },

    #[error("workspace is in state {current}; previous steps must be completed first")]
    StepsIncomplete { current: WorkspaceState },

    #[error("workspace is in state {current}, only READY_FOR_HUMAN can be locked")]
    NotReadyForHuman { current: WorkspaceState },

    #[error("workspace {workspace_id} is locked")]
    AlreadyLocked { workspace_id: String },
}

fn element_noun(count: &usize) -> &'static str {
    if *count == 1 {
        "element"
    } else {
        "elements"
    }
}

/// Broad category of a [`Rejection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Rewind, skip or non-move in the state order
    SequenceViolation,
    /// A target-specific content requirement is unsatisfied
    PreconditionNotMet,
    BlockingElementsUnresolved,
    /// Raised by callers, never by the validator itself
    AlreadyLocked,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::Rewind { .. }
            | Self::Skip { .. }
            | Self::AlreadyInState { .. }
            | Self::NoNextState { .. } => RejectionKind::SequenceViolation,
            Self::NoFacts
            | Self::NoConfirmedContext
            | Self::StepsIncomplete { .. }
            | Self::NotReadyForHuman { .. } => RejectionKind::PreconditionNotMet,
            Self::BlockingElementsUnresolved { .. } => RejectionKind::BlockingElementsUnresolved,
            Self::AlreadyLocked { .. } => RejectionKind::AlreadyLocked,
        }
    }

    /// The operator-facing reason.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
