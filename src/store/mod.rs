//! Persistence interface for workspaces and their transition records.
//!
//! The relational store behind a production deployment lives outside this
//! crate. This module fixes the contract it must honour:
//! - a transition's state change, metrics update and audit record are
//!   written atomically, or not at all
//! - concurrent writers are serialised per workspace with an optimistic
//!   version the store owns: every successful commit bumps it, so any
//!   writer still holding an older version is refused, whatever it changed

mod memory;

pub use memory::InMemoryWorkspaceStore;

use crate::audit::ReasoningTransition;
use crate::core::{TransitionTrail, WorkspaceReasoning};
use crate::machine::ReasoningMachine;
use thiserror::Error;

/// A workspace as stored, with the version to pass back to
/// [`WorkspaceStore::commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWorkspace {
    pub workspace: WorkspaceReasoning,
    /// Starts at 1 on insert; incremented by every successful commit
    pub version: u64,
}

/// Storage errors
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Workspace not found: {0}")]
    NotFound(String),

    #[error("Workspace already exists: {0}")]
    AlreadyExists(String),

    #[error("Workspace {workspace_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        workspace_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Transition {transition_id} belongs to workspace {found}, not {expected}")]
    ForeignTransition {
        transition_id: String,
        expected: String,
        found: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Workspace persistence.
pub trait WorkspaceStore: Send + Sync {
    /// Store a newly created workspace and return its first version.
    fn insert(&self, workspace: &WorkspaceReasoning) -> Result<u64, StoreError>;

    /// Load a workspace together with its current version.
    fn load(&self, workspace_id: &str) -> Result<Option<StoredWorkspace>, StoreError>;

    /// Atomically replace the workspace and append `transition`, if any.
    ///
    /// Succeeds only while the stored version is still `expected_version`,
    /// and returns the new version. A commit without a transition still
    /// bumps the version, so content edits invalidate every other writer's
    /// snapshot just as state changes do.
    fn commit(
        &self,
        expected_version: u64,
        workspace: &WorkspaceReasoning,
        transition: Option<&ReasoningTransition>,
    ) -> Result<u64, StoreError>;

    /// All transition records for a workspace, oldest first.
    fn transitions(&self, workspace_id: &str) -> Result<Vec<ReasoningTransition>, StoreError>;
}

/// Load a workspace and its trail into a machine.
///
/// The returned version must be passed to [`WorkspaceStore::commit`] when
/// writing the machine's changes back.
pub fn load_machine(
    store: &dyn WorkspaceStore,
    workspace_id: &str,
) -> Result<(ReasoningMachine, u64), StoreError> {
    let stored = store
        .load(workspace_id)?
        .ok_or_else(|| StoreError::NotFound(workspace_id.to_string()))?;
    let trail = TransitionTrail::from_records(store.transitions(workspace_id)?);
    Ok((
        ReasoningMachine::resume(stored.workspace, trail),
        stored.version,
    ))
}
