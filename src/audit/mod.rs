//! Audit trail records for accepted transitions.
//!
//! Every accepted transition produces exactly one [`ReasoningTransition`].
//! Records are immutable once built: confirming a record returns a new one.
//! Apart from the generated id and the timestamp, building a record is a
//! pure function of its inputs.

pub mod error;
pub mod snapshot;

pub use error::{InvalidActor, SnapshotError};
pub use snapshot::StateSnapshot;

use crate::core::{WorkspaceReasoning, WorkspaceState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who triggered a transition.
///
/// Persisted as `user:<id>` or `system:<id>`. The id may be empty; any
/// actor the constructors accept parses back from its string form.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Actor {
    User(String),
    System(String),
}

impl Actor {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn system(id: impl Into<String>) -> Self {
        Self::System(id.into())
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::System(id) => write!(f, "system:{id}"),
        }
    }
}

impl FromStr for Actor {
    type Err = InvalidActor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("user", id)) => Ok(Self::user(id)),
            Some(("system", id)) => Ok(Self::system(id)),
            _ => Err(InvalidActor(s.to_string())),
        }
    }
}

impl From<Actor> for String {
    fn from(actor: Actor) -> Self {
        actor.to_string()
    }
}

impl TryFrom<String> for Actor {
    type Error = InvalidActor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable record of one accepted transition.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningTransition {
    pub id: String,
    /// Lookup only; the record does not own the workspace
    pub workspace_id: String,
    pub from_state: WorkspaceState,
    pub to_state: WorkspaceState,
    pub triggered_by: Actor,
    pub triggered_at: DateTime<Utc>,
    pub reason: String,
    pub auto_approved: bool,
    pub validated_by: Option<Actor>,
    pub validated_at: Option<DateTime<Utc>>,
    pub state_before: StateSnapshot,
    pub state_after: StateSnapshot,
    /// Filled by the persistence layer, which sees the full row
    pub hash: Option<String>,
}

impl ReasoningTransition {
    /// Return a copy of this record confirmed by a human reviewer.
    pub fn confirm(&self, validator: Actor, at: DateTime<Utc>) -> Self {
        Self {
            validated_by: Some(validator),
            validated_at: Some(at),
            ..self.clone()
        }
    }

    pub fn is_validated(&self) -> bool {
        self.validated_by.is_some()
    }

    /// Number of positions this record advances in the canonical order.
    pub fn step_size(&self) -> isize {
        self.to_state.index() as isize - self.from_state.index() as isize
    }
}

/// Build the audit record for an accepted transition.
///
/// `workspace` must be the pre-transition aggregate. Both snapshots carry
/// the workspace's stored metrics; refreshing metrics after the move is the
/// caller's job and is not reflected here.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::audit::{create_transition_record, Actor};
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning, WorkspaceState};
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::DocumentUpload);
/// let record = create_transition_record(
///     &workspace,
///     WorkspaceState::Received,
///     WorkspaceState::FactsExtracted,
///     Actor::system("extractor"),
///     "document parsed",
/// );
///
/// assert_eq!(record.state_before.current_state, WorkspaceState::Received);
/// assert_eq!(record.state_after.current_state, WorkspaceState::FactsExtracted);
/// assert!(!record.auto_approved);
/// assert!(record.hash.is_none());
/// ```
pub fn create_transition_record(
    workspace: &WorkspaceReasoning,
    from_state: WorkspaceState,
    to_state: WorkspaceState,
    triggered_by: Actor,
    reason: impl Into<String>,
) -> ReasoningTransition {
    let before = StateSnapshot::of(workspace);

    ReasoningTransition {
        id: Uuid::new_v4().to_string(),
        workspace_id: workspace.id.clone(),
        from_state,
        to_state,
        triggered_by,
        triggered_at: Utc::now(),
        reason: reason.into(),
        auto_approved: false,
        validated_by: None,
        validated_at: None,
        state_before: before,
        state_after: before.with_state(to_state),
        hash: None,
    }
}
