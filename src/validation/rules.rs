//! Transition rules over the canonical state order.

use crate::core::{Guard, WorkspaceReasoning, WorkspaceState};
use crate::validation::rejection::Rejection;

/// Decide whether moving from `current_state` to `target_state` is legal.
///
/// `current_state` must equal `workspace.current_state`; passing anything
/// else is a programming error and panics in debug builds.
///
/// Rules, in order:
/// - moving backwards is a rewind
/// - moving more than one position forward is a skip
/// - staying in place is not a move
/// - a single step forward must satisfy the target state's precondition
///
/// # Example
///
/// ```rust
/// use workspace_reasoning::core::{SourceType, WorkspaceReasoning, WorkspaceState};
/// use workspace_reasoning::validation::{validate_state_transition, Rejection};
///
/// let workspace = WorkspaceReasoning::new("ws-1", SourceType::DocumentUpload);
///
/// assert!(validate_state_transition(
///     WorkspaceState::Received,
///     WorkspaceState::FactsExtracted,
///     &workspace,
/// )
/// .is_ok());
///
/// assert!(matches!(
///     validate_state_transition(
///         WorkspaceState::Received,
///         WorkspaceState::ContextIdentified,
///         &workspace,
///     ),
///     Err(Rejection::Skip { .. })
/// ));
/// ```
pub fn validate_state_transition(
    current_state: WorkspaceState,
    target_state: WorkspaceState,
    workspace: &WorkspaceReasoning,
) -> Result<(), Rejection> {
    debug_assert_eq!(
        current_state, workspace.current_state,
        "current_state must match the workspace being validated"
    );

    let current = current_state.index();
    let target = target_state.index();

    if target < current {
        return Err(Rejection::Rewind {
            from: current_state,
            to: target_state,
        });
    }
    if target > current + 1 {
        return Err(Rejection::Skip {
            from: current_state,
            to: target_state,
        });
    }
    if target == current {
        return Err(Rejection::AlreadyInState {
            state: current_state,
        });
    }

    match target_state {
        WorkspaceState::ReadyForHuman => can_transition_to_ready_for_human(workspace),
        other => precondition_for(other).map_or(Ok(()), |guard| guard.check(workspace)),
    }
}

/// Content requirement for entering `target`, if it has one.
///
/// Obligations, missing elements and risks may all legitimately be empty,
/// so only context identification and obligation deduction are guarded.
fn precondition_for(target: WorkspaceState) -> Option<Guard> {
    match target {
        WorkspaceState::ContextIdentified => Some(Guard::new(
            |w: &WorkspaceReasoning| !w.facts.is_empty(),
            Rejection::NoFacts,
        )),
        WorkspaceState::ObligationsDeduced => Some(Guard::new(
            |w: &WorkspaceReasoning| w.has_confirmed_context(),
            Rejection::NoConfirmedContext,
        )),
        _ => None,
    }
}

/// Check whether the workspace may be handed to a human.
///
/// Fails when any blocking gap is unresolved, whatever else the workspace
/// contains. Otherwise the workspace must have reached at least
/// `ACTION_PROPOSED`.
pub fn can_transition_to_ready_for_human(workspace: &WorkspaceReasoning) -> Result<(), Rejection> {
    let count = workspace.blocking_unresolved_count();
    if count > 0 {
        return Err(Rejection::BlockingElementsUnresolved { count });
    }

    if workspace.current_state < WorkspaceState::PRE_TERMINAL {
        return Err(Rejection::StepsIncomplete {
            current: workspace.current_state,
        });
    }

    Ok(())
}

/// Whether a human may seal the workspace.
///
/// True only for an unlocked workspace in `READY_FOR_HUMAN` that still
/// passes the readiness check.
pub fn can_lock_workspace(workspace: &WorkspaceReasoning) -> bool {
    lock_eligibility(workspace).is_ok()
}

/// Same decision as [`can_lock_workspace`], with the reason when refused.
pub fn lock_eligibility(workspace: &WorkspaceReasoning) -> Result<(), Rejection> {
    if workspace.locked {
        return Err(Rejection::AlreadyLocked {
            workspace_id: workspace.id.clone(),
        });
    }
    if !workspace.current_state.is_final() {
        return Err(Rejection::NotReadyForHuman {
            current: workspace.current_state,
        });
    }
    can_transition_to_ready_for_human(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        CertaintyLevel, ContextHypothesis, Fact, FactSource, MissingElement, SourceType,
    };
    use crate::validation::RejectionKind;

    fn in_state(state: WorkspaceState) -> WorkspaceReasoning {
        let mut ws = WorkspaceReasoning::new("ws-rules", SourceType::DocumentUpload);
        ws.current_state = state;
        ws
    }

    fn validate(ws: &WorkspaceReasoning, target: WorkspaceState) -> Result<(), Rejection> {
        validate_state_transition(ws.current_state, target, ws)
    }

    #[test]
    fn facts_extracted_has_no_precondition() {
        let ws = in_state(WorkspaceState::Received);
        assert_eq!(validate(&ws, WorkspaceState::FactsExtracted), Ok(()));
    }

    #[test]
    fn skipping_is_a_sequence_violation() {
        let ws = in_state(WorkspaceState::Received);

        let err = validate(&ws, WorkspaceState::ContextIdentified).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::SequenceViolation);
        assert!(err.reason().contains("cannot skip states"));
    }

    #[test]
    fn rewinding_is_a_sequence_violation() {
        let ws = in_state(WorkspaceState::RiskEvaluated);

        assert_eq!(
            validate(&ws, WorkspaceState::FactsExtracted),
            Err(Rejection::Rewind {
                from: WorkspaceState::RiskEvaluated,
                to: WorkspaceState::FactsExtracted,
            })
        );
    }

    #[test]
    fn staying_in_place_is_rejected() {
        let ws = in_state(WorkspaceState::MissingIdentified);

        assert_eq!(
            validate(&ws, WorkspaceState::MissingIdentified),
            Err(Rejection::AlreadyInState {
                state: WorkspaceState::MissingIdentified
            })
        );
    }

    #[test]
    fn context_requires_a_fact() {
        let mut ws = in_state(WorkspaceState::FactsExtracted);

        let err = validate(&ws, WorkspaceState::ContextIdentified).unwrap_err();
        assert_eq!(err, Rejection::NoFacts);
        assert!(err.reason().contains("at least one fact"));

        ws.facts
            .push(Fact::new("Parcel lost in transit", FactSource::UserProvided));
        assert_eq!(validate(&ws, WorkspaceState::ContextIdentified), Ok(()));
    }

    #[test]
    fn obligations_require_a_confirmed_context() {
        let mut ws = in_state(WorkspaceState::ContextIdentified);
        ws.context_hypotheses
            .push(ContextHypothesis::new("Carriage contract", CertaintyLevel::Tentative));

        assert_eq!(
            validate(&ws, WorkspaceState::ObligationsDeduced),
            Err(Rejection::NoConfirmedContext)
        );

        ws.context_hypotheses
            .push(ContextHypothesis::new("Consumer sale", CertaintyLevel::Confirmed));
        assert_eq!(validate(&ws, WorkspaceState::ObligationsDeduced), Ok(()));
    }

    #[test]
    fn middle_states_accept_empty_content() {
        for (from, to) in [
            (
                WorkspaceState::ObligationsDeduced,
                WorkspaceState::MissingIdentified,
            ),
            (WorkspaceState::MissingIdentified, WorkspaceState::RiskEvaluated),
            (WorkspaceState::RiskEvaluated, WorkspaceState::ActionProposed),
        ] {
            assert_eq!(validate(&in_state(from), to), Ok(()), "{from} -> {to}");
        }
    }

    #[test]
    fn ready_for_human_requires_resolved_blocking_elements() {
        let mut ws = in_state(WorkspaceState::ActionProposed);
        ws.missing_elements = vec![MissingElement::blocking("Power of attorney")];

        let err = validate(&ws, WorkspaceState::ReadyForHuman).unwrap_err();
        assert_eq!(err.reason(), "1 blocking element not resolved");
        assert_eq!(err.kind(), RejectionKind::BlockingElementsUnresolved);

        ws.missing_elements[0].resolved = true;
        assert_eq!(validate(&ws, WorkspaceState::ReadyForHuman), Ok(()));
    }

    #[test]
    fn non_blocking_gaps_do_not_block_readiness() {
        let mut ws = in_state(WorkspaceState::ActionProposed);
        ws.missing_elements = vec![MissingElement::non_blocking("Courier receipt")];

        assert_eq!(can_transition_to_ready_for_human(&ws), Ok(()));
    }

    #[test]
    fn readiness_requires_the_pre_terminal_state() {
        let ws = in_state(WorkspaceState::RiskEvaluated);

        assert_eq!(
            can_transition_to_ready_for_human(&ws),
            Err(Rejection::StepsIncomplete {
                current: WorkspaceState::RiskEvaluated
            })
        );
    }

    #[test]
    fn blocking_gaps_are_reported_before_position() {
        let mut ws = in_state(WorkspaceState::Received);
        ws.missing_elements = vec![
            MissingElement::blocking("ID"),
            MissingElement::blocking("Deed"),
        ];

        assert_eq!(
            can_transition_to_ready_for_human(&ws),
            Err(Rejection::BlockingElementsUnresolved { count: 2 })
        );
    }

    #[test]
    fn lock_requires_ready_unlocked_and_still_ready() {
        let mut ws = in_state(WorkspaceState::ReadyForHuman);
        assert!(can_lock_workspace(&ws));

        ws.missing_elements
            .push(MissingElement::blocking("Late-discovered lien"));
        assert!(!can_lock_workspace(&ws));
        assert_eq!(
            lock_eligibility(&ws),
            Err(Rejection::BlockingElementsUnresolved { count: 1 })
        );

        ws.missing_elements.clear();
        ws.locked = true;
        assert!(!can_lock_workspace(&ws));
    }

    #[test]
    fn lock_is_refused_before_ready_for_human() {
        let ws = in_state(WorkspaceState::ActionProposed);

        assert!(!can_lock_workspace(&ws));
        assert_eq!(
            lock_eligibility(&ws),
            Err(Rejection::NotReadyForHuman {
                current: WorkspaceState::ActionProposed
            })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "current_state must match")]
    fn mismatched_current_state_panics() {
        let ws = in_state(WorkspaceState::Received);
        let _ = validate_state_transition(
            WorkspaceState::FactsExtracted,
            WorkspaceState::ContextIdentified,
            &ws,
        );
    }
}
