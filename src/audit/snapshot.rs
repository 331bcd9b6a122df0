//! Before/after snapshots captured on each transition.
//!
//! Snapshots stay structured in memory and are only turned into a string or
//! bytes at the persistence edge.

use super::error::SnapshotError;
use crate::core::{WorkspaceState, WorkspaceReasoning};
use serde::{Deserialize, Serialize};

/// The part of a workspace captured for replay and debugging.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub current_state: WorkspaceState,
    pub uncertainty_level: f64,
    pub reasoning_quality: f64,
}

impl StateSnapshot {
    /// Capture the workspace's current state and stored metrics.
    pub fn of(workspace: &WorkspaceReasoning) -> Self {
        Self {
            current_state: workspace.current_state,
            uncertainty_level: workspace.uncertainty_level,
            reasoning_quality: workspace.reasoning_quality,
        }
    }

    /// Same metrics, different state.
    pub fn with_state(self, state: WorkspaceState) -> Self {
        Self {
            current_state: state,
            ..self
        }
    }

    /// Serialize to the JSON column format.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Parse a JSON column, rejecting metrics outside [0, 1].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validated()
    }

    /// Serialize to a compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validated()
    }

    fn validated(self) -> Result<Self, SnapshotError> {
        for (field, value) in [
            ("uncertaintyLevel", self.uncertainty_level),
            ("reasoningQuality", self.reasoning_quality),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SnapshotError::OutOfRange { field, value });
            }
        }
        Ok(self)
    }
}
