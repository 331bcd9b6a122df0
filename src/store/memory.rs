//! WorkspaceStore in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{StoreError, StoredWorkspace, WorkspaceStore};
use crate::audit::ReasoningTransition;
use crate::core::WorkspaceReasoning;

const INITIAL_VERSION: u64 = 1;

struct Entry {
    workspace: WorkspaceReasoning,
    version: u64,
    transitions: Vec<ReasoningTransition>,
}

/// In-memory implementation for development and testing.
///
/// A workspace, its version and its transitions share one lock, so a commit
/// is atomic.
#[derive(Default)]
pub struct InMemoryWorkspaceStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkspaceStore for InMemoryWorkspaceStore {
    fn insert(&self, workspace: &WorkspaceReasoning) -> Result<u64, StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        if entries.contains_key(&workspace.id) {
            return Err(StoreError::AlreadyExists(workspace.id.clone()));
        }
        entries.insert(
            workspace.id.clone(),
            Entry {
                workspace: workspace.clone(),
                version: INITIAL_VERSION,
                transitions: Vec::new(),
            },
        );
        Ok(INITIAL_VERSION)
    }

    fn load(&self, workspace_id: &str) -> Result<Option<StoredWorkspace>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(entries.get(workspace_id).map(|e| StoredWorkspace {
            workspace: e.workspace.clone(),
            version: e.version,
        }))
    }

    fn commit(
        &self,
        expected_version: u64,
        workspace: &WorkspaceReasoning,
        transition: Option<&ReasoningTransition>,
    ) -> Result<u64, StoreError> {
        if let Some(t) = transition {
            if t.workspace_id != workspace.id {
                return Err(StoreError::ForeignTransition {
                    transition_id: t.id.clone(),
                    expected: workspace.id.clone(),
                    found: t.workspace_id.clone(),
                });
            }
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let entry = entries
            .get_mut(&workspace.id)
            .ok_or_else(|| StoreError::NotFound(workspace.id.clone()))?;

        if entry.version != expected_version {
            tracing::warn!(
                workspace_id = %workspace.id,
                expected = expected_version,
                found = entry.version,
                "rejected stale workspace commit"
            );
            return Err(StoreError::Conflict {
                workspace_id: workspace.id.clone(),
                expected: expected_version,
                found: entry.version,
            });
        }

        entry.workspace = workspace.clone();
        entry.version = entry.version.saturating_add(1);
        if let Some(t) = transition {
            entry.transitions.push(t.clone());
        }
        Ok(entry.version)
    }

    fn transitions(&self, workspace_id: &str) -> Result<Vec<ReasoningTransition>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        entries
            .get(workspace_id)
            .map(|e| e.transitions.clone())
            .ok_or_else(|| StoreError::NotFound(workspace_id.to_string()))
    }
}
