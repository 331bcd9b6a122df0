//! State transition validation.
//!
//! Every function here is a pure function of its inputs. Business-rule
//! failures are returned as a [`Rejection`], never raised as panics: they
//! are expected, frequent, and part of normal control flow. The caller
//! decides whether to retry, surface the reason to an operator, or abort.
//!
//! # Concurrency
//!
//! These checks assume a consistent snapshot of the workspace. A caller
//! validating and then writing must hold exclusive access to that workspace
//! (a `&mut` borrow, a transaction, or an optimistic
//! [`crate::store::WorkspaceStore::commit`]) for the whole
//! read-validate-write cycle.

pub mod invariants;
pub mod rejection;
pub mod rules;

pub use invariants::{check_invariants, InvariantViolation};
pub use rejection::{Rejection, RejectionKind};
pub use rules::{
    can_lock_workspace, can_transition_to_ready_for_human, lock_eligibility,
    validate_state_transition,
};
