//! Approval workflow domain types.
//!
//! This module defines the types used for multi-tier monetary
//! approvals of petty cash, purchase orders, and expense requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use diagna_shared::types::{BranchId, TenantId, UserId};

/// The kind of request flowing through the approval workflow.
///
/// Each subject type carries its own threshold table and its own
/// side effect on approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    /// Petty cash disbursement (posts to the ledger on approval).
    PettyCash,
    /// Purchase order authorization.
    PurchaseOrder,
    /// General expense request.
    Expense,
}

impl SubjectType {
    /// Returns the string representation of the subject type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PettyCash => "petty_cash",
            Self::PurchaseOrder => "purchase_order",
            Self::Expense => "expense",
        }
    }

    /// Parses a subject type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "petty_cash" => Some(Self::PettyCash),
            "purchase_order" => Some(Self::PurchaseOrder),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of an approval request.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
/// - Pending → Queried (query; a response re-enters Pending)
/// - Pending → Referred (refer; re-routed to a higher authority,
///   where it behaves as pending again)
///
/// Only Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision from the assigned approver.
    Pending,
    /// Approved (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
    /// The approver raised a question; awaiting the requester's response.
    Queried,
    /// Referred to a higher authority; actionable by the new approver.
    Referred,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Queried => "queried",
            Self::Referred => "referred",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "queried" => Some(Self::Queried),
            "referred" => Some(Self::Referred),
            _ => None,
        }
    }

    /// Returns true if the request has reached a terminal decision.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the assigned approver may act on the request.
    ///
    /// A referred request behaves as pending for the approver it was
    /// escalated to.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Pending | Self::Referred)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority assigned by the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Routine request.
    Normal,
    /// Needs attention within the day.
    High,
    /// Blocking operations.
    Urgent,
}

impl Priority {
    /// Returns the string representation of the priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Parses a priority from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a subject type's threshold table.
///
/// A request is routed to the lowest-authority role whose
/// `max_amount` covers the request amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// The approver role this rule grants authority to.
    pub role: String,
    /// Position in the authority hierarchy (lower = junior).
    pub authority: i16,
    /// The largest amount this role may approve.
    pub max_amount: Decimal,
}

/// Input for submitting a new approval request.
#[derive(Debug, Clone)]
pub struct SubmitRequestInput {
    /// Tenant scope.
    pub tenant_id: TenantId,
    /// Branch scope, when the request is branch specific.
    pub branch_id: Option<BranchId>,
    /// What kind of request this is.
    pub subject_type: SubjectType,
    /// The ID of the subject entity (petty cash voucher, PO, expense).
    pub subject_id: Uuid,
    /// The monetary amount requiring authorization.
    pub amount: Decimal,
    /// Who is asking.
    pub requester: UserId,
    /// Requester-assigned priority.
    pub priority: Priority,
    /// Why the money is needed.
    pub justification: String,
}

/// An action an approver takes on a request.
#[derive(Debug, Clone)]
pub enum ApprovalAction {
    /// Approve the request.
    Approve {
        /// Optional notes from the approver.
        notes: Option<String>,
    },
    /// Reject the request.
    Reject {
        /// Why the request was rejected.
        reason: String,
    },
    /// Ask the requester a question; the request leaves the
    /// approver's queue until answered.
    Query {
        /// The question text.
        text: String,
    },
    /// Escalate to the next higher authority able to cover the amount.
    Refer {
        /// Why the approver is escalating.
        reason: String,
    },
}

impl ApprovalAction {
    /// Returns the string name of the action, for audit records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::Reject { .. } => "reject",
            Self::Query { .. } => "query",
            Self::Refer { .. } => "refer",
        }
    }
}

/// One append-only history event on an approval request.
///
/// Events are never edited or deleted; the full exchange between
/// requester and approvers is reconstructed by replaying them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalEvent {
    /// The request entered the workflow.
    Submitted {
        /// Who submitted.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// Authority level the request was initially routed to.
        routed_to_authority: i16,
    },
    /// The request was approved.
    Approved {
        /// The deciding approver.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// Optional approver notes.
        notes: Option<String>,
    },
    /// The request was rejected.
    Rejected {
        /// The deciding approver.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// The rejection reason.
        reason: String,
    },
    /// The approver asked the requester a question.
    Queried {
        /// The querying approver.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// The question text.
        text: String,
    },
    /// The requester answered an open query.
    QueryResponded {
        /// The responding requester.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// The response text.
        text: String,
    },
    /// The request was escalated to a higher authority.
    Referred {
        /// The referring approver.
        actor: UserId,
        /// When.
        at: DateTime<Utc>,
        /// Why it was escalated.
        reason: String,
        /// Authority level it was escalated to.
        to_authority: i16,
    },
}

/// Snapshot of the mutable state of an approval request.
///
/// The service is stateless; callers load this from storage, apply an
/// operation, and persist the resulting transition atomically.
#[derive(Debug, Clone)]
pub struct RequestState {
    /// Current workflow status.
    pub status: ApprovalStatus,
    /// The request amount.
    pub amount: Decimal,
    /// The requester.
    pub requester: UserId,
    /// Authority level of the currently assigned approver slot.
    pub assigned_authority: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_type_round_trip() {
        for st in [
            SubjectType::PettyCash,
            SubjectType::PurchaseOrder,
            SubjectType::Expense,
        ] {
            assert_eq!(SubjectType::parse(st.as_str()), Some(st));
        }
        assert_eq!(SubjectType::parse("invoice"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::Queried,
            ApprovalStatus::Referred,
        ] {
            assert_eq!(ApprovalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApprovalStatus::parse("unknown"), None);
    }

    #[test]
    fn test_status_terminality() {
        assert!(ApprovalStatus::Approved.is_decided());
        assert!(ApprovalStatus::Rejected.is_decided());
        assert!(!ApprovalStatus::Pending.is_decided());
        assert!(!ApprovalStatus::Queried.is_decided());
        assert!(!ApprovalStatus::Referred.is_decided());
    }

    #[test]
    fn test_status_actionable() {
        assert!(ApprovalStatus::Pending.is_actionable());
        assert!(ApprovalStatus::Referred.is_actionable());
        assert!(!ApprovalStatus::Queried.is_actionable());
        assert!(!ApprovalStatus::Approved.is_actionable());
        assert!(!ApprovalStatus::Rejected.is_actionable());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Normal < Priority::High);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(ApprovalAction::Approve { notes: None }.as_str(), "approve");
        assert_eq!(
            ApprovalAction::Reject {
                reason: "no".to_string()
            }
            .as_str(),
            "reject"
        );
    }
}
