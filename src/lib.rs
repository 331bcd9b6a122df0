//! Workspace Reasoning: a controlled-progression state machine
//!
//! Models how a legal matter's reasoning advances from raw intake to a state
//! a human can act on. The core is pure: validation, metrics and audit
//! record construction are deterministic functions of their inputs, apart
//! from generated ids and timestamps. Persistence, routing and review
//! workflows stay outside and talk to the core through plain function calls.
//!
//! # Core Concepts
//!
//! - **States**: the canonical, totally ordered `WorkspaceState` sequence
//! - **Validation**: sequential progression with per-state preconditions
//! - **Metrics**: uncertainty and reasoning quality derived from content
//! - **Audit**: one immutable `ReasoningTransition` per accepted move
//!
//! # Example
//!
//! ```rust
//! use workspace_reasoning::audit::{create_transition_record, Actor};
//! use workspace_reasoning::core::{SourceType, WorkspaceReasoning, WorkspaceState};
//! use workspace_reasoning::metrics::update_workspace_metrics;
//! use workspace_reasoning::validation::validate_state_transition;
//!
//! let mut workspace = WorkspaceReasoning::new("ws-1", SourceType::DocumentUpload);
//! let target = WorkspaceState::FactsExtracted;
//!
//! validate_state_transition(workspace.current_state, target, &workspace).unwrap();
//! let record = create_transition_record(
//!     &workspace,
//!     workspace.current_state,
//!     target,
//!     Actor::system("intake"),
//!     "document parsed",
//! );
//! workspace.current_state = target;
//! workspace.apply_metrics(update_workspace_metrics(&workspace));
//!
//! assert_eq!(record.to_state, WorkspaceState::FactsExtracted);
//! ```

pub mod audit;
pub mod core;
pub mod machine;
pub mod metrics;
pub mod policy;
pub mod store;
pub mod summary;
pub mod validation;

// Re-export commonly used types
pub use crate::audit::{create_transition_record, Actor, ReasoningTransition, StateSnapshot};
pub use crate::core::{TransitionTrail, WorkspaceReasoning, WorkspaceState};
pub use crate::machine::ReasoningMachine;
pub use crate::metrics::{
    calculate_reasoning_quality, calculate_uncertainty_level, update_workspace_metrics,
};
pub use crate::policy::ReasoningPolicy;
pub use crate::summary::generate_executive_summary;
pub use crate::validation::{
    can_lock_workspace, can_transition_to_ready_for_human, validate_state_transition, Rejection,
};
