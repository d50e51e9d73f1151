//! Approval repository for approval workflow database operations.
//!
//! Decisions are persisted with a status-guarded update keyed on the
//! status the snapshot was loaded with, so of two concurrent deciders
//! exactly one wins. The petty-cash ledger posting runs in the same
//! transaction as the winning approval.

use chrono::Utc;
use diagna_core::approval::{
    ActorContext, ApprovalAction, ApprovalError, ApprovalEvent, ApprovalService, ApprovalStatus,
    DecideOutcome, RequestState, SubjectType, SubmitRequestInput, ThresholdRule,
};
use diagna_core::ledger::{CreateJournalEntryInput, LineItemInput, Reference, ReferenceType};
use diagna_shared::types::{TenantId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{approval_events, approval_requests, approval_thresholds, sea_orm_active_enums};
use crate::repositories::journal::{JournalRepoError, JournalRepository};
use crate::rls::set_rls_context;

/// Error types for approval operations.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalRepoError {
    /// Domain-level approval error.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// The petty-cash side-effect posting failed.
    #[error(transparent)]
    Posting(#[from] JournalRepoError),

    /// The approving transition needs ledger accounts for its
    /// disbursement posting and none were given.
    #[error("Petty cash approval requires posting accounts")]
    PostingAccountsRequired,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Ledger accounts for the petty-cash posting on approval.
#[derive(Debug, Clone, Copy)]
pub struct PettyCashPosting {
    /// The expense account to debit.
    pub expense_account_id: Uuid,
    /// The petty cash account to credit.
    pub cash_account_id: Uuid,
}

/// Result of a persisted decision.
#[derive(Debug, Clone)]
pub struct DecisionRecord {
    /// The request after the decision.
    pub request: approval_requests::Model,
    /// The journal entry posted by the side effect, when one ran.
    pub journal_entry_id: Option<Uuid>,
}

/// Approval repository for workflow operations.
#[derive(Debug, Clone)]
pub struct ApprovalRepository {
    db: DatabaseConnection,
}

impl ApprovalRepository {
    /// Creates a new approval repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the threshold table for one subject type.
    ///
    /// # Errors
    ///
    /// Returns a database error if the replacement fails.
    pub async fn replace_thresholds(
        &self,
        tenant_id: TenantId,
        subject_type: SubjectType,
        rules: &[ThresholdRule],
    ) -> Result<Vec<approval_thresholds::Model>, ApprovalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let db_subject: sea_orm_active_enums::SubjectType = subject_type.into();
        approval_thresholds::Entity::delete_many()
            .filter(approval_thresholds::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(approval_thresholds::Column::SubjectType.eq(db_subject.clone()))
            .exec(&txn)
            .await?;

        let now = Utc::now().into();
        let mut created = Vec::with_capacity(rules.len());
        for rule in rules {
            let row = approval_thresholds::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(tenant_id.into_inner()),
                subject_type: Set(db_subject.clone()),
                role: Set(rule.role.clone()),
                authority: Set(rule.authority),
                max_amount: Set(rule.max_amount),
                created_at: Set(now),
                updated_at: Set(now),
            };
            created.push(row.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(created)
    }

    /// Submits a request, routing it to the lowest covering authority.
    ///
    /// # Errors
    ///
    /// Returns validation and routing errors from the approval service
    /// or a database error.
    pub async fn submit(
        &self,
        input: SubmitRequestInput,
    ) -> Result<approval_requests::Model, ApprovalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, input.tenant_id.into_inner()).await?;

        let rules = Self::load_rules(&txn, input.tenant_id.into_inner(), input.subject_type).await?;
        let outcome = ApprovalService::submit(&input, &rules, Utc::now())?;

        let now = Utc::now().into();
        let request = approval_requests::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(input.tenant_id.into_inner()),
            branch_id: Set(input.branch_id.map(diagna_shared::types::BranchId::into_inner)),
            subject_type: Set(input.subject_type.into()),
            subject_id: Set(input.subject_id),
            amount: Set(input.amount),
            requester: Set(input.requester.into_inner()),
            priority: Set(input.priority.into()),
            justification: Set(input.justification.clone()),
            status: Set(outcome.status.into()),
            assigned_authority: Set(outcome.routed_to.authority),
            assigned_role: Set(outcome.routed_to.role.clone()),
            decided_by: Set(None),
            decided_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let request = request.insert(&txn).await?;

        Self::insert_event(&txn, &request, &outcome.event).await?;

        txn.commit().await?;
        info!(
            request_id = %request.id,
            authority = request.assigned_authority,
            "Approval request submitted"
        );
        Ok(request)
    }

    /// Applies an approver action to a request.
    ///
    /// On the single transition into Approved of a petty-cash request,
    /// the disbursement is posted to the ledger in the same
    /// transaction using the given accounts. Approving an
    /// already-approved request is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns authorization and transition errors from the approval
    /// service, `ConcurrentDecision` if a racing decider won, or a
    /// database error.
    pub async fn decide(
        &self,
        tenant_id: TenantId,
        request_id: Uuid,
        actor: &ActorContext,
        action: &ApprovalAction,
        posting: Option<PettyCashPosting>,
    ) -> Result<DecisionRecord, ApprovalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let request = approval_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or(ApprovalError::RequestNotFound)?;
        let loaded_status: ApprovalStatus = request.status.clone().into();
        let subject_type: SubjectType = request.subject_type.clone().into();
        let state = RequestState {
            status: loaded_status,
            amount: request.amount,
            requester: UserId::from_uuid(request.requester),
            assigned_authority: request.assigned_authority,
        };
        let rules = Self::load_rules(&txn, tenant_id.into_inner(), subject_type).await?;

        let outcome = ApprovalService::decide(&state, actor, &rules, action, Utc::now())?;
        match outcome {
            DecideOutcome::AlreadyApproved => {
                txn.commit().await?;
                Ok(DecisionRecord {
                    request,
                    journal_entry_id: None,
                })
            }
            DecideOutcome::Transitioned {
                new_status,
                new_authority,
                event,
                triggers_side_effect,
            } => {
                Self::persist_transition(
                    &txn,
                    &request,
                    loaded_status,
                    new_status,
                    new_authority,
                    &rules,
                    actor.user_id,
                )
                .await?;
                Self::insert_event(&txn, &request, &event).await?;

                let mut journal_entry_id = None;
                if needs_petty_cash_posting(subject_type, triggers_side_effect) {
                    let posting = posting.ok_or(ApprovalRepoError::PostingAccountsRequired)?;
                    let entry = Self::post_petty_cash(&txn, tenant_id, &request, posting).await?;
                    journal_entry_id = Some(entry);
                }

                let request = approval_requests::Entity::find_by_id(request_id)
                    .one(&txn)
                    .await?
                    .ok_or(ApprovalError::RequestNotFound)?;

                txn.commit().await?;
                info!(
                    request_id = %request_id,
                    status = ApprovalStatus::from(request.status.clone()).as_str(),
                    "Approval decision recorded"
                );
                Ok(DecisionRecord {
                    request,
                    journal_entry_id,
                })
            }
        }
    }

    /// Answers an open query, returning the request to the approver's
    /// queue.
    ///
    /// # Errors
    ///
    /// Returns transition errors from the approval service,
    /// `ConcurrentDecision` if the request changed underneath, or a
    /// database error.
    pub async fn respond_to_query(
        &self,
        tenant_id: TenantId,
        request_id: Uuid,
        responder: UserId,
        text: &str,
    ) -> Result<approval_requests::Model, ApprovalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let request = approval_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or(ApprovalError::RequestNotFound)?;
        let loaded_status: ApprovalStatus = request.status.clone().into();
        let state = RequestState {
            status: loaded_status,
            amount: request.amount,
            requester: UserId::from_uuid(request.requester),
            assigned_authority: request.assigned_authority,
        };

        let outcome = ApprovalService::respond_to_query(&state, responder, text, Utc::now())?;
        if let DecideOutcome::Transitioned {
            new_status, event, ..
        } = outcome
        {
            Self::persist_transition(
                &txn,
                &request,
                loaded_status,
                new_status,
                None,
                &[],
                responder,
            )
            .await?;
            Self::insert_event(&txn, &request, &event).await?;
        }

        let request = approval_requests::Entity::find_by_id(request_id)
            .one(&txn)
            .await?
            .ok_or(ApprovalError::RequestNotFound)?;

        txn.commit().await?;
        Ok(request)
    }

    /// Lists a request's history events in order.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_events(
        &self,
        tenant_id: TenantId,
        request_id: Uuid,
    ) -> Result<Vec<approval_events::Model>, ApprovalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let events = approval_events::Entity::find()
            .filter(approval_events::Column::RequestId.eq(request_id))
            .order_by_asc(approval_events::Column::CreatedAt)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(events)
    }

    /// Loads the threshold table for a tenant and subject type,
    /// ordered by authority.
    async fn load_rules(
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        subject_type: SubjectType,
    ) -> Result<Vec<ThresholdRule>, ApprovalRepoError> {
        let db_subject: sea_orm_active_enums::SubjectType = subject_type.into();
        let rows = approval_thresholds::Entity::find()
            .filter(approval_thresholds::Column::TenantId.eq(tenant_id))
            .filter(approval_thresholds::Column::SubjectType.eq(db_subject))
            .order_by_asc(approval_thresholds::Column::Authority)
            .all(txn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| ThresholdRule {
                role: r.role,
                authority: r.authority,
                max_amount: r.max_amount,
            })
            .collect())
    }

    /// Persists a status transition guarded on the loaded status.
    ///
    /// Zero affected rows means a concurrent decider won.
    async fn persist_transition(
        txn: &DatabaseTransaction,
        request: &approval_requests::Model,
        loaded_status: ApprovalStatus,
        new_status: ApprovalStatus,
        new_authority: Option<i16>,
        rules: &[ThresholdRule],
        actor: UserId,
    ) -> Result<(), ApprovalRepoError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let db_new: sea_orm_active_enums::ApprovalStatus = new_status.into();
        let db_loaded: sea_orm_active_enums::ApprovalStatus = loaded_status.into();

        let mut update = approval_requests::Entity::update_many()
            .col_expr(approval_requests::Column::Status, db_new.as_enum())
            .col_expr(approval_requests::Column::UpdatedAt, Expr::value(now))
            .filter(approval_requests::Column::Id.eq(request.id))
            .filter(approval_requests::Column::Status.eq(db_loaded));

        if let Some(authority) = new_authority {
            update = update.col_expr(
                approval_requests::Column::AssignedAuthority,
                Expr::value(authority),
            );
            if let Some(rule) = rules.iter().find(|r| r.authority == authority) {
                update = update.col_expr(
                    approval_requests::Column::AssignedRole,
                    Expr::value(rule.role.clone()),
                );
            }
        }
        if new_status.is_decided() {
            update = update
                .col_expr(
                    approval_requests::Column::DecidedBy,
                    Expr::value(Some(actor.into_inner())),
                )
                .col_expr(approval_requests::Column::DecidedAt, Expr::value(Some(now)));
        }

        let result = update.exec(txn).await?;
        if result.rows_affected == 0 {
            return Err(ApprovalError::ConcurrentDecision.into());
        }
        Ok(())
    }

    /// Appends one history event row for a request.
    async fn insert_event(
        txn: &DatabaseTransaction,
        request: &approval_requests::Model,
        event: &ApprovalEvent,
    ) -> Result<(), ApprovalRepoError> {
        let (action, actor, detail, to_authority) = event_fields(event);
        let row = approval_events::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(request.tenant_id),
            request_id: Set(request.id),
            action: Set(action.to_string()),
            actor: Set(actor),
            detail: Set(detail),
            to_authority: Set(to_authority),
            created_at: Set(Utc::now().into()),
        };
        row.insert(txn).await?;
        Ok(())
    }

    /// Posts the petty-cash disbursement: debit expense, credit the
    /// petty cash float.
    async fn post_petty_cash(
        txn: &DatabaseTransaction,
        tenant_id: TenantId,
        request: &approval_requests::Model,
        posting: PettyCashPosting,
    ) -> Result<Uuid, ApprovalRepoError> {
        let input = CreateJournalEntryInput {
            tenant_id,
            branch_id: request.branch_id.map(diagna_shared::types::BranchId::from_uuid),
            entry_date: Utc::now().date_naive(),
            description: format!("Petty cash disbursement: {}", request.justification),
            reference: Some(Reference {
                reference_type: ReferenceType::PettyCash,
                reference_id: request.id.to_string(),
            }),
            line_items: vec![
                LineItemInput::debit(posting.expense_account_id, request.amount),
                LineItemInput::credit(posting.cash_account_id, request.amount),
            ],
            created_by: UserId::from_uuid(request.requester),
        };
        let entry = JournalRepository::insert_posted_entry(txn, &input).await?;
        Ok(entry.id)
    }
}

/// Whether the approving transition must carry ledger accounts for the
/// disbursement posting. Only the single transition into Approved of a
/// petty-cash request posts; skipping the posting there would commit an
/// approved disbursement with no journal entry.
fn needs_petty_cash_posting(subject_type: SubjectType, triggers_side_effect: bool) -> bool {
    triggers_side_effect && subject_type == SubjectType::PettyCash
}

/// Flattens an approval event into audit-row fields.
fn event_fields(event: &ApprovalEvent) -> (&'static str, Uuid, Option<String>, Option<i16>) {
    match event {
        ApprovalEvent::Submitted {
            actor,
            routed_to_authority,
            ..
        } => ("submit", actor.into_inner(), None, Some(*routed_to_authority)),
        ApprovalEvent::Approved { actor, notes, .. } => {
            ("approve", actor.into_inner(), notes.clone(), None)
        }
        ApprovalEvent::Rejected { actor, reason, .. } => {
            ("reject", actor.into_inner(), Some(reason.clone()), None)
        }
        ApprovalEvent::Queried { actor, text, .. } => {
            ("query", actor.into_inner(), Some(text.clone()), None)
        }
        ApprovalEvent::QueryResponded { actor, text, .. } => {
            ("respond", actor.into_inner(), Some(text.clone()), None)
        }
        ApprovalEvent::Referred {
            actor,
            reason,
            to_authority,
            ..
        } => (
            "refer",
            actor.into_inner(),
            Some(reason.clone()),
            Some(*to_authority),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_petty_cash_approval_demands_posting_accounts() {
        // The approving transition of a petty-cash request must post.
        assert!(needs_petty_cash_posting(SubjectType::PettyCash, true));
        // Rejections and intermediate transitions do not.
        assert!(!needs_petty_cash_posting(SubjectType::PettyCash, false));
        // Other subjects have no ledger side effect.
        assert!(!needs_petty_cash_posting(SubjectType::PurchaseOrder, true));
        assert!(!needs_petty_cash_posting(SubjectType::Expense, true));

        // A missing posting on the approving transition is an error,
        // not a silent skip.
        let err = None::<PettyCashPosting>
            .ok_or(ApprovalRepoError::PostingAccountsRequired)
            .unwrap_err();
        assert!(matches!(err, ApprovalRepoError::PostingAccountsRequired));
    }

    #[test]
    fn test_event_fields_flattening() {
        let actor = UserId::new();
        let now = Utc::now();

        let (action, who, detail, authority) = event_fields(&ApprovalEvent::Submitted {
            actor,
            at: now,
            routed_to_authority: 2,
        });
        assert_eq!(action, "submit");
        assert_eq!(who, actor.into_inner());
        assert!(detail.is_none());
        assert_eq!(authority, Some(2));

        let (action, _, detail, authority) = event_fields(&ApprovalEvent::Referred {
            actor,
            at: now,
            reason: "Unusual vendor".to_string(),
            to_authority: 3,
        });
        assert_eq!(action, "refer");
        assert_eq!(detail.as_deref(), Some("Unusual vendor"));
        assert_eq!(authority, Some(3));
    }
}
