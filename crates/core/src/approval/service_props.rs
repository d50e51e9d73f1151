//! Property-based tests for the approval state machine.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use diagna_shared::types::UserId;

use crate::approval::error::ApprovalError;
use crate::approval::service::{ActorContext, ApprovalService, DecideOutcome};
use crate::approval::types::{ApprovalAction, ApprovalStatus, RequestState, ThresholdRule};

fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Pending),
        Just(ApprovalStatus::Approved),
        Just(ApprovalStatus::Rejected),
        Just(ApprovalStatus::Queried),
        Just(ApprovalStatus::Referred),
    ]
}

fn arb_action() -> impl Strategy<Value = ApprovalAction> {
    prop_oneof![
        Just(ApprovalAction::Approve { notes: None }),
        Just(ApprovalAction::Reject {
            reason: "over budget".to_string()
        }),
        Just(ApprovalAction::Query {
            text: "why".to_string()
        }),
        Just(ApprovalAction::Refer {
            reason: "escalate".to_string()
        }),
    ]
}

fn table() -> Vec<ThresholdRule> {
    vec![
        ThresholdRule {
            role: "supervisor".to_string(),
            authority: 1,
            max_amount: Decimal::from(100_000),
        },
        ThresholdRule {
            role: "manager".to_string(),
            authority: 2,
            max_amount: Decimal::from(1_000_000),
        },
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Terminal statuses admit no further transition. The single
    /// exception is approve-on-approved, which is an explicit no-op.
    #[test]
    fn prop_decided_requests_are_frozen(
        status in arb_status(),
        action in arb_action(),
        amount in 1i64..1_000_000,
    ) {
        prop_assume!(status.is_decided());

        let state = RequestState {
            status,
            amount: Decimal::from(amount),
            requester: UserId::new(),
            assigned_authority: 1,
        };
        let actor = ActorContext {
            user_id: UserId::new(),
            is_assigned: true,
            max_amount: Decimal::from(1_000_000),
        };

        let result = ApprovalService::decide(&state, &actor, &table(), &action, Utc::now());
        if status == ApprovalStatus::Approved
            && matches!(action, ApprovalAction::Approve { .. })
        {
            prop_assert!(matches!(result, Ok(DecideOutcome::AlreadyApproved)));
        } else {
            prop_assert_eq!(result.unwrap_err(), ApprovalError::AlreadyDecided(status));
        }
    }

    /// The side effect fires only on the transition into Approved.
    #[test]
    fn prop_side_effect_only_on_approval_transition(
        status in arb_status(),
        action in arb_action(),
        amount in 1i64..100_000,
    ) {
        let state = RequestState {
            status,
            amount: Decimal::from(amount),
            requester: UserId::new(),
            assigned_authority: 1,
        };
        let actor = ActorContext {
            user_id: UserId::new(),
            is_assigned: true,
            max_amount: Decimal::from(1_000_000),
        };

        if let Ok(DecideOutcome::Transitioned {
            new_status,
            triggers_side_effect,
            ..
        }) = ApprovalService::decide(&state, &actor, &table(), &action, Utc::now())
        {
            prop_assert_eq!(
                triggers_side_effect,
                new_status == ApprovalStatus::Approved
            );
        }
    }

    /// An unassigned actor can never transition a request.
    #[test]
    fn prop_unassigned_actor_never_transitions(
        status in arb_status(),
        action in arb_action(),
        amount in 1i64..100_000,
    ) {
        prop_assume!(status.is_actionable());

        let state = RequestState {
            status,
            amount: Decimal::from(amount),
            requester: UserId::new(),
            assigned_authority: 1,
        };
        let actor = ActorContext {
            user_id: UserId::new(),
            is_assigned: false,
            max_amount: Decimal::from(1_000_000),
        };

        let result = ApprovalService::decide(&state, &actor, &table(), &action, Utc::now());
        prop_assert_eq!(result.unwrap_err(), ApprovalError::NotAssignedApprover);
    }
}
