//! The workspace reasoning aggregate and the content it accumulates.
//!
//! The aggregate is owned by the calling service. This crate only reads it
//! and produces patches; it never validates the *content* of the lists,
//! only their presence and flags.

use super::state::WorkspaceState;
use crate::metrics::{self, MetricsPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the intake for a workspace came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    DocumentUpload,
    ManualEntry,
    EmailImport,
}

/// Provenance of an extracted fact.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactSource {
    /// Asserted by a user, unverified
    UserProvided,
    /// Extracted from an uploaded document
    DocumentExtracted,
    /// Derived from other facts
    Inferred,
}

/// How sure the analysis is about a context hypothesis.
///
/// `Confirmed` is the only trusted value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertaintyLevel {
    Tentative,
    Probable,
    Confirmed,
}

/// A factual claim feeding the reasoning process.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub statement: String,
    pub source: FactSource,
}

impl Fact {
    pub fn new(statement: impl Into<String>, source: FactSource) -> Self {
        Self {
            statement: statement.into(),
            source,
        }
    }
}

/// A candidate interpretation of the applicable legal framework.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextHypothesis {
    pub framework: String,
    pub certainty_level: CertaintyLevel,
}

impl ContextHypothesis {
    pub fn new(framework: impl Into<String>, certainty_level: CertaintyLevel) -> Self {
        Self {
            framework: framework.into(),
            certainty_level,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.certainty_level == CertaintyLevel::Confirmed
    }
}

/// A deduced duty or requirement, optionally tied to a legal citation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub description: String,
    pub legal_ref: Option<String>,
}

impl Obligation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            legal_ref: None,
        }
    }

    pub fn with_legal_ref(mut self, legal_ref: impl Into<String>) -> Self {
        self.legal_ref = Some(legal_ref.into());
        self
    }

    /// An empty citation string counts as missing.
    pub fn has_legal_ref(&self) -> bool {
        self.legal_ref
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty())
    }
}

/// An identified gap in the information available.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingElement {
    pub description: String,
    pub blocking: bool,
    pub resolved: bool,
}

impl MissingElement {
    /// A gap that must be resolved before the workspace reaches a human.
    pub fn blocking(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            blocking: true,
            resolved: false,
        }
    }

    pub fn non_blocking(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            blocking: false,
            resolved: false,
        }
    }

    pub fn resolved(mut self) -> Self {
        self.resolved = true;
        self
    }

    pub fn is_blocking_unresolved(&self) -> bool {
        self.blocking && !self.resolved
    }
}

/// An evaluated risk item. Scores run from 0 to 10.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub description: String,
    pub risk_score: f64,
}

impl Risk {
    pub fn new(description: impl Into<String>, risk_score: f64) -> Self {
        Self {
            description: description.into(),
            risk_score,
        }
    }
}

/// In-progress reasoning for a single legal matter.
///
/// `uncertainty_level` and `reasoning_quality` are derived values. They are
/// filled by [`crate::metrics`] and should only be changed through
/// [`WorkspaceReasoning::apply_metrics`].
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{
///     Fact, FactSource, SourceType, WorkspaceReasoning, WorkspaceState,
/// };
///
/// let mut workspace = WorkspaceReasoning::new("ws-1", SourceType::DocumentUpload);
/// assert_eq!(workspace.current_state, WorkspaceState::Received);
///
/// workspace
///     .facts
///     .push(Fact::new("Lease signed on 2024-03-01", FactSource::DocumentExtracted));
/// assert_eq!(workspace.facts.len(), 1);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceReasoning {
    pub id: String,
    pub source_type: SourceType,
    pub procedure_type: Option<String>,
    pub current_state: WorkspaceState,
    pub facts: Vec<Fact>,
    pub context_hypotheses: Vec<ContextHypothesis>,
    pub obligations: Vec<Obligation>,
    pub missing_elements: Vec<MissingElement>,
    pub risks: Vec<Risk>,
    pub uncertainty_level: f64,
    pub reasoning_quality: f64,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceReasoning {
    /// Create an empty workspace in the initial state with metrics computed
    /// from its (empty) content.
    pub fn new(id: impl Into<String>, source_type: SourceType) -> Self {
        let now = Utc::now();
        let mut workspace = Self {
            id: id.into(),
            source_type,
            procedure_type: None,
            current_state: WorkspaceState::Received,
            facts: Vec::new(),
            context_hypotheses: Vec::new(),
            obligations: Vec::new(),
            missing_elements: Vec::new(),
            risks: Vec::new(),
            uncertainty_level: 0.0,
            reasoning_quality: 0.0,
            locked: false,
            created_at: now,
            updated_at: now,
        };
        workspace.uncertainty_level = metrics::calculate_uncertainty_level(&workspace);
        workspace.reasoning_quality = metrics::calculate_reasoning_quality(&workspace);
        workspace
    }

    pub fn with_procedure_type(mut self, procedure_type: impl Into<String>) -> Self {
        self.procedure_type = Some(procedure_type.into());
        self
    }

    /// Missing elements that still block the hand-off to a human.
    pub fn blocking_unresolved(&self) -> impl Iterator<Item = &MissingElement> {
        self.missing_elements
            .iter()
            .filter(|m| m.is_blocking_unresolved())
    }

    pub fn blocking_unresolved_count(&self) -> usize {
        self.blocking_unresolved().count()
    }

    pub fn non_blocking_unresolved_count(&self) -> usize {
        self.missing_elements
            .iter()
            .filter(|m| !m.blocking && !m.resolved)
            .count()
    }

    pub fn confirmed_context_count(&self) -> usize {
        self.context_hypotheses
            .iter()
            .filter(|c| c.is_confirmed())
            .count()
    }

    pub fn has_confirmed_context(&self) -> bool {
        self.context_hypotheses.iter().any(|c| c.is_confirmed())
    }

    pub fn user_provided_fact_count(&self) -> usize {
        self.facts
            .iter()
            .filter(|f| f.source == FactSource::UserProvided)
            .count()
    }

    pub fn obligations_without_legal_ref(&self) -> usize {
        self.obligations
            .iter()
            .filter(|o| !o.has_legal_ref())
            .count()
    }

    /// Number of risks scoring at or above `threshold`.
    pub fn high_risk_count(&self, threshold: f64) -> usize {
        self.risks
            .iter()
            .filter(|r| r.risk_score >= threshold)
            .count()
    }

    /// Merge a freshly computed metrics patch into the aggregate.
    pub fn apply_metrics(&mut self, patch: MetricsPatch) {
        self.uncertainty_level = patch.uncertainty_level;
        self.reasoning_quality = patch.reasoning_quality;
        self.updated_at = patch.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> WorkspaceReasoning {
        WorkspaceReasoning::new("ws-test", SourceType::ManualEntry)
    }

    #[test]
    fn new_workspace_starts_received_and_unlocked() {
        let ws = workspace();
        assert_eq!(ws.current_state, WorkspaceState::Received);
        assert!(!ws.locked);
        assert_eq!(ws.created_at, ws.updated_at);
        assert!(ws.procedure_type.is_none());
    }

    #[test]
    fn new_workspace_metrics_reflect_empty_content() {
        let ws = workspace();
        assert_eq!(ws.uncertainty_level, 0.0);
        assert!((ws.reasoning_quality - 0.3).abs() < 1e-9);
    }

    #[test]
    fn counts_blocking_and_non_blocking_gaps() {
        let mut ws = workspace();
        ws.missing_elements = vec![
            MissingElement::blocking("Signed contract"),
            MissingElement::blocking("Proof of notice").resolved(),
            MissingElement::non_blocking("Witness list"),
            MissingElement::non_blocking("Phone records").resolved(),
        ];

        assert_eq!(ws.blocking_unresolved_count(), 1);
        assert_eq!(ws.non_blocking_unresolved_count(), 1);
    }

    #[test]
    fn blank_legal_ref_counts_as_missing() {
        let mut ws = workspace();
        ws.obligations = vec![
            Obligation::new("Pay rent").with_legal_ref("Civil Code art. 1728"),
            Obligation::new("Return deposit").with_legal_ref("  "),
            Obligation::new("Notify landlord"),
        ];

        assert_eq!(ws.obligations_without_legal_ref(), 2);
    }

    #[test]
    fn high_risk_threshold_is_inclusive() {
        let mut ws = workspace();
        ws.risks = vec![
            Risk::new("Limitation period", 6.0),
            Risk::new("Counterclaim", 5.9),
            Risk::new("Costs", 9.5),
        ];

        assert_eq!(ws.high_risk_count(6.0), 2);
    }

    #[test]
    fn confirmed_context_is_detected() {
        let mut ws = workspace();
        ws.context_hypotheses
            .push(ContextHypothesis::new("Commercial lease", CertaintyLevel::Tentative));
        assert!(!ws.has_confirmed_context());

        ws.context_hypotheses
            .push(ContextHypothesis::new("Residential lease", CertaintyLevel::Confirmed));
        assert!(ws.has_confirmed_context());
        assert_eq!(ws.confirmed_context_count(), 1);
    }

    #[test]
    fn workspace_serializes_with_camel_case_keys() {
        let mut ws = workspace().with_procedure_type("EVICTION");
        ws.facts
            .push(Fact::new("Tenant in arrears", FactSource::UserProvided));

        let json = serde_json::to_value(&ws).unwrap();
        assert_eq!(json["currentState"], "RECEIVED");
        assert_eq!(json["procedureType"], "EVICTION");
        assert_eq!(json["facts"][0]["source"], "USER_PROVIDED");

        let back: WorkspaceReasoning = serde_json::from_value(json).unwrap();
        assert_eq!(back, ws);
    }
}
