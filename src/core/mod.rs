//! Core state machine types.
//!
//! This module contains the data the machine operates on:
//! - The canonical `WorkspaceState` order
//! - The `WorkspaceReasoning` aggregate and its content
//! - Guard predicates for transition preconditions
//! - The immutable transition trail
//!
//! Nothing in this module performs I/O.

mod guard;
mod history;
mod state;
mod workspace;

pub use guard::Guard;
pub use history::{TrailError, TransitionTrail};
pub use state::{UnknownState, WorkspaceState};
pub use workspace::{
    CertaintyLevel, ContextHypothesis, Fact, FactSource, MissingElement, Obligation, Risk,
    SourceType, WorkspaceReasoning,
};
