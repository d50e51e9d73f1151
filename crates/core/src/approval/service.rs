//! Approval request state machine.
//!
//! The service is stateless: callers load a [`RequestState`] snapshot,
//! apply one operation, and persist the returned transition in the
//! same storage transaction that re-checks the current status. Two
//! concurrent decisions therefore resolve to one winner; the loser
//! observes the decided status on re-read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use diagna_shared::types::UserId;

use super::error::ApprovalError;
use super::routing::RoutingEngine;
use super::types::{
    ApprovalAction, ApprovalEvent, ApprovalStatus, RequestState, SubmitRequestInput, ThresholdRule,
};

/// The acting approver, as resolved by the caller.
#[derive(Debug, Clone)]
pub struct ActorContext {
    /// The actor's user ID.
    pub user_id: UserId,
    /// Whether the actor holds the currently assigned approver slot.
    pub is_assigned: bool,
    /// The actor's own maximum approvable amount.
    pub max_amount: Decimal,
}

/// Result of submitting a request: where it was routed.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The approver slot the request was routed to.
    pub routed_to: ThresholdRule,
    /// The initial status (always pending).
    pub status: ApprovalStatus,
    /// The submission event to append to the request history.
    pub event: ApprovalEvent,
}

/// Result of an approver action on a request.
#[derive(Debug, Clone)]
pub enum DecideOutcome {
    /// The request transitioned; persist the new state and event.
    Transitioned {
        /// The status to persist.
        new_status: ApprovalStatus,
        /// New assigned authority, when the action re-routed the request.
        new_authority: Option<i16>,
        /// The history event to append.
        event: ApprovalEvent,
        /// True when the caller must run the subject-specific side
        /// effect (e.g. the petty-cash ledger posting). Set only on the
        /// single transition into Approved, never on replays.
        triggers_side_effect: bool,
    },
    /// Approve was called on an already-approved request. Idempotent:
    /// persist nothing and run no side effect.
    AlreadyApproved,
}

/// Stateless service driving the approval workflow.
pub struct ApprovalService;

impl ApprovalService {
    /// Validate a submission and compute its initial routing.
    ///
    /// # Errors
    /// * `AmountNotPositive` if the amount is zero or negative
    /// * `JustificationRequired` if the justification is blank
    /// * Routing errors from [`RoutingEngine::route`]
    pub fn submit(
        input: &SubmitRequestInput,
        rules: &[ThresholdRule],
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, ApprovalError> {
        if input.amount <= Decimal::ZERO {
            return Err(ApprovalError::AmountNotPositive);
        }
        if input.justification.trim().is_empty() {
            return Err(ApprovalError::JustificationRequired);
        }

        let routed_to = RoutingEngine::route(rules, input.amount)?;
        let event = ApprovalEvent::Submitted {
            actor: input.requester,
            at: now,
            routed_to_authority: routed_to.authority,
        };

        Ok(SubmitOutcome {
            routed_to,
            status: ApprovalStatus::Pending,
            event,
        })
    }

    /// Apply an approver action to a request.
    ///
    /// Approve and Reject require the actor's threshold to cover the
    /// amount; Query and Refer only require the assigned slot, since
    /// both exist precisely for approvers who cannot or will not decide
    /// themselves.
    ///
    /// Approving an already-approved request returns
    /// [`DecideOutcome::AlreadyApproved`]; any other action on a
    /// decided request fails with `AlreadyDecided`.
    ///
    /// # Errors
    /// Authorization, validation, and transition errors per
    /// [`ApprovalError`].
    pub fn decide(
        state: &RequestState,
        actor: &ActorContext,
        rules: &[ThresholdRule],
        action: &ApprovalAction,
        now: DateTime<Utc>,
    ) -> Result<DecideOutcome, ApprovalError> {
        if state.status == ApprovalStatus::Approved
            && matches!(action, ApprovalAction::Approve { .. })
        {
            return Ok(DecideOutcome::AlreadyApproved);
        }
        if state.status.is_decided() {
            return Err(ApprovalError::AlreadyDecided(state.status));
        }
        if !state.status.is_actionable() {
            return Err(ApprovalError::InvalidTransition {
                status: state.status,
                action: action.as_str(),
            });
        }

        match action {
            ApprovalAction::Approve { notes } => {
                RoutingEngine::authorize(actor.is_assigned, actor.max_amount, state.amount)?;
                Ok(DecideOutcome::Transitioned {
                    new_status: ApprovalStatus::Approved,
                    new_authority: None,
                    event: ApprovalEvent::Approved {
                        actor: actor.user_id,
                        at: now,
                        notes: notes.clone(),
                    },
                    triggers_side_effect: true,
                })
            }
            ApprovalAction::Reject { reason } => {
                RoutingEngine::authorize(actor.is_assigned, actor.max_amount, state.amount)?;
                if reason.trim().is_empty() {
                    return Err(ApprovalError::RejectionReasonRequired);
                }
                Ok(DecideOutcome::Transitioned {
                    new_status: ApprovalStatus::Rejected,
                    new_authority: None,
                    event: ApprovalEvent::Rejected {
                        actor: actor.user_id,
                        at: now,
                        reason: reason.clone(),
                    },
                    triggers_side_effect: false,
                })
            }
            ApprovalAction::Query { text } => {
                if !actor.is_assigned {
                    return Err(ApprovalError::NotAssignedApprover);
                }
                if text.trim().is_empty() {
                    return Err(ApprovalError::QueryTextRequired);
                }
                Ok(DecideOutcome::Transitioned {
                    new_status: ApprovalStatus::Queried,
                    new_authority: None,
                    event: ApprovalEvent::Queried {
                        actor: actor.user_id,
                        at: now,
                        text: text.clone(),
                    },
                    triggers_side_effect: false,
                })
            }
            ApprovalAction::Refer { reason } => {
                if !actor.is_assigned {
                    return Err(ApprovalError::NotAssignedApprover);
                }
                if reason.trim().is_empty() {
                    return Err(ApprovalError::ReferralReasonRequired);
                }
                let target =
                    RoutingEngine::escalate(rules, state.amount, state.assigned_authority)?;
                Ok(DecideOutcome::Transitioned {
                    new_status: ApprovalStatus::Referred,
                    new_authority: Some(target.authority),
                    event: ApprovalEvent::Referred {
                        actor: actor.user_id,
                        at: now,
                        reason: reason.clone(),
                        to_authority: target.authority,
                    },
                    triggers_side_effect: false,
                })
            }
        }
    }

    /// Answer an open query, returning the request to the approver's
    /// queue.
    ///
    /// # Errors
    /// * `InvalidTransition` if the request is not in Queried status
    /// * `NotRequester` if someone other than the requester responds
    /// * `ResponseTextRequired` if the response is blank
    pub fn respond_to_query(
        state: &RequestState,
        responder: UserId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<DecideOutcome, ApprovalError> {
        if state.status != ApprovalStatus::Queried {
            return Err(ApprovalError::InvalidTransition {
                status: state.status,
                action: "respond",
            });
        }
        if responder != state.requester {
            return Err(ApprovalError::NotRequester);
        }
        if text.trim().is_empty() {
            return Err(ApprovalError::ResponseTextRequired);
        }
        Ok(DecideOutcome::Transitioned {
            new_status: ApprovalStatus::Pending,
            new_authority: None,
            event: ApprovalEvent::QueryResponded {
                actor: responder,
                at: now,
                text: text.to_string(),
            },
            triggers_side_effect: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::types::{Priority, SubjectType};
    use diagna_shared::types::{TenantId, UserId};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn rules() -> Vec<ThresholdRule> {
        vec![
            ThresholdRule {
                role: "supervisor".to_string(),
                authority: 1,
                max_amount: dec!(100_000),
            },
            ThresholdRule {
                role: "branch_manager".to_string(),
                authority: 2,
                max_amount: dec!(1_000_000),
            },
        ]
    }

    fn submit_input(amount: Decimal) -> SubmitRequestInput {
        SubmitRequestInput {
            tenant_id: TenantId::new(),
            branch_id: None,
            subject_type: SubjectType::PettyCash,
            subject_id: Uuid::new_v4(),
            amount,
            requester: UserId::new(),
            priority: Priority::Normal,
            justification: "Reagent restock".to_string(),
        }
    }

    fn pending_state(amount: Decimal, authority: i16) -> RequestState {
        RequestState {
            status: ApprovalStatus::Pending,
            amount,
            requester: UserId::new(),
            assigned_authority: authority,
        }
    }

    fn assigned_actor(max_amount: Decimal) -> ActorContext {
        ActorContext {
            user_id: UserId::new(),
            is_assigned: true,
            max_amount,
        }
    }

    #[test]
    fn test_submit_routes_to_lowest_covering_authority() {
        let outcome = ApprovalService::submit(&submit_input(dec!(50_000)), &rules(), Utc::now())
            .unwrap();
        assert_eq!(outcome.routed_to.role, "supervisor");
        assert_eq!(outcome.status, ApprovalStatus::Pending);
        assert!(matches!(
            outcome.event,
            ApprovalEvent::Submitted {
                routed_to_authority: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_submit_rejects_nonpositive_amount() {
        let result = ApprovalService::submit(&submit_input(Decimal::ZERO), &rules(), Utc::now());
        assert_eq!(result.unwrap_err(), ApprovalError::AmountNotPositive);
    }

    #[test]
    fn test_submit_rejects_blank_justification() {
        let mut input = submit_input(dec!(100));
        input.justification = "   ".to_string();
        let result = ApprovalService::submit(&input, &rules(), Utc::now());
        assert_eq!(result.unwrap_err(), ApprovalError::JustificationRequired);
    }

    #[test]
    fn test_submit_amount_above_all_thresholds() {
        let result = ApprovalService::submit(&submit_input(dec!(5_000_000)), &rules(), Utc::now());
        assert!(matches!(
            result,
            Err(ApprovalError::NoApproverAvailable { .. })
        ));
    }

    #[test]
    fn test_approve_pending_request() {
        let state = pending_state(dec!(50_000), 1);
        let actor = assigned_actor(dec!(100_000));
        let outcome = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        )
        .unwrap();

        match outcome {
            DecideOutcome::Transitioned {
                new_status,
                triggers_side_effect,
                ..
            } => {
                assert_eq!(new_status, ApprovalStatus::Approved);
                assert!(triggers_side_effect);
            }
            DecideOutcome::AlreadyApproved => panic!("expected transition"),
        }
    }

    #[test]
    fn test_reapprove_is_noop() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Approved;
        let actor = assigned_actor(dec!(100_000));
        let outcome = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        )
        .unwrap();
        assert!(matches!(outcome, DecideOutcome::AlreadyApproved));
    }

    #[test]
    fn test_reject_approved_request_fails() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Approved;
        let actor = assigned_actor(dec!(100_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Reject {
                reason: "changed my mind".to_string(),
            },
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ApprovalError::AlreadyDecided(ApprovalStatus::Approved)
        );
    }

    #[test]
    fn test_approve_rejected_request_fails() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Rejected;
        let actor = assigned_actor(dec!(100_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ApprovalError::AlreadyDecided(ApprovalStatus::Rejected)
        );
    }

    #[test]
    fn test_approve_requires_assigned_slot() {
        let state = pending_state(dec!(50_000), 1);
        let actor = ActorContext {
            user_id: UserId::new(),
            is_assigned: false,
            max_amount: dec!(100_000),
        };
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), ApprovalError::NotAssignedApprover);
    }

    #[test]
    fn test_approve_requires_covering_threshold() {
        let state = pending_state(dec!(500_000), 2);
        let actor = assigned_actor(dec!(100_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(ApprovalError::ThresholdExceeded { .. })
        ));
    }

    #[test]
    fn test_reject_requires_reason() {
        let state = pending_state(dec!(50_000), 1);
        let actor = assigned_actor(dec!(100_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Reject {
                reason: String::new(),
            },
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), ApprovalError::RejectionReasonRequired);
    }

    #[test]
    fn test_query_moves_request_out_of_queue() {
        let state = pending_state(dec!(50_000), 1);
        let actor = assigned_actor(dec!(100_000));
        let outcome = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Query {
                text: "Which vendor?".to_string(),
            },
            Utc::now(),
        )
        .unwrap();

        match outcome {
            DecideOutcome::Transitioned {
                new_status,
                triggers_side_effect,
                ..
            } => {
                assert_eq!(new_status, ApprovalStatus::Queried);
                assert!(!triggers_side_effect);
            }
            DecideOutcome::AlreadyApproved => panic!("expected transition"),
        }
    }

    #[test]
    fn test_approver_cannot_decide_while_queried() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Queried;
        let actor = assigned_actor(dec!(100_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_respond_reenters_pending() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Queried;
        let outcome =
            ApprovalService::respond_to_query(&state, state.requester, "Vendor A", Utc::now())
                .unwrap();

        match outcome {
            DecideOutcome::Transitioned { new_status, .. } => {
                assert_eq!(new_status, ApprovalStatus::Pending);
            }
            DecideOutcome::AlreadyApproved => panic!("expected transition"),
        }
    }

    #[test]
    fn test_only_requester_may_respond() {
        let mut state = pending_state(dec!(50_000), 1);
        state.status = ApprovalStatus::Queried;
        let result =
            ApprovalService::respond_to_query(&state, UserId::new(), "Vendor A", Utc::now());
        assert_eq!(result.unwrap_err(), ApprovalError::NotRequester);
    }

    #[test]
    fn test_refer_escalates_and_stays_actionable() {
        let state = pending_state(dec!(50_000), 1);
        let actor = assigned_actor(dec!(100_000));
        let outcome = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Refer {
                reason: "Unusual vendor".to_string(),
            },
            Utc::now(),
        )
        .unwrap();

        match outcome {
            DecideOutcome::Transitioned {
                new_status,
                new_authority,
                ..
            } => {
                assert_eq!(new_status, ApprovalStatus::Referred);
                assert_eq!(new_authority, Some(2));
                assert!(new_status.is_actionable());
            }
            DecideOutcome::AlreadyApproved => panic!("expected transition"),
        }
    }

    #[test]
    fn test_refer_from_top_authority_fails() {
        let state = pending_state(dec!(50_000), 2);
        let actor = assigned_actor(dec!(1_000_000));
        let result = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Refer {
                reason: "Not my call".to_string(),
            },
            Utc::now(),
        );
        assert!(matches!(
            result,
            Err(ApprovalError::NoHigherAuthority { .. })
        ));
    }

    #[test]
    fn test_escalated_approver_can_approve_referred_request() {
        let mut state = pending_state(dec!(50_000), 2);
        state.status = ApprovalStatus::Referred;
        let actor = assigned_actor(dec!(1_000_000));
        let outcome = ApprovalService::decide(
            &state,
            &actor,
            &rules(),
            &ApprovalAction::Approve { notes: None },
            Utc::now(),
        )
        .unwrap();
        assert!(matches!(
            outcome,
            DecideOutcome::Transitioned {
                new_status: ApprovalStatus::Approved,
                ..
            }
        ));
    }
}
