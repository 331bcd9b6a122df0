//! Guard predicates for controlling state transitions.
//!
//! Guards are pure checks over the workspace content. Each guard carries
//! the rejection it produces when its predicate does not hold.

use super::workspace::WorkspaceReasoning;
use crate::validation::Rejection;

/// Pure predicate that determines if a transition may proceed.
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{Guard, SourceType, WorkspaceReasoning};
/// use workspace_reasoning::validation::Rejection;
///
/// let has_facts = Guard::new(|w: &WorkspaceReasoning| !w.facts.is_empty(), Rejection::NoFacts);
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::ManualEntry);
/// assert_eq!(has_facts.check(&workspace), Err(Rejection::NoFacts));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&WorkspaceReasoning) -> bool + Send + Sync>,
    rejection: Rejection,
}

impl Guard {
    /// Create a guard from a pure predicate and the rejection returned when
    /// it fails.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F, rejection: Rejection) -> Self
    where
        F: Fn(&WorkspaceReasoning) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            rejection,
        }
    }

    /// Evaluate the guard without side effects.
    pub fn check(&self, workspace: &WorkspaceReasoning) -> Result<(), Rejection> {
        if (self.predicate)(workspace) {
            Ok(())
        } else {
            Err(self.rejection.clone())
        }
    }
}
