//! Error types for the approval workflow.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::ApprovalStatus;

/// Errors that can occur during approval workflow operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApprovalError {
    /// The request amount must be positive.
    #[error("Request amount must be greater than zero")]
    AmountNotPositive,

    /// A justification is required when submitting.
    #[error("A justification is required")]
    JustificationRequired,

    /// The threshold table for the subject type has no rules.
    #[error("No approval thresholds are configured for this request type")]
    EmptyThresholdTable,

    /// No configured role has a threshold covering the amount.
    #[error("No approver is available for amount {amount}")]
    NoApproverAvailable {
        /// The amount that could not be routed.
        amount: Decimal,
    },

    /// No role above the current authority can cover the amount.
    #[error("No higher authority is available for amount {amount}")]
    NoHigherAuthority {
        /// The amount that could not be escalated.
        amount: Decimal,
    },

    /// The actor is not the currently assigned approver.
    #[error("Actor is not the assigned approver for this request")]
    NotAssignedApprover,

    /// The actor's threshold does not cover the request amount.
    #[error("Approval threshold {threshold} does not cover amount {amount}")]
    ThresholdExceeded {
        /// The request amount.
        amount: Decimal,
        /// The actor's maximum approvable amount.
        threshold: Decimal,
    },

    /// The request already carries a terminal decision.
    #[error("Request has already been decided: {0}")]
    AlreadyDecided(ApprovalStatus),

    /// The requested action is not valid from the current status.
    #[error("Cannot {action} a request in status {status}")]
    InvalidTransition {
        /// The current status.
        status: ApprovalStatus,
        /// The attempted action.
        action: &'static str,
    },

    /// A rejection requires a reason.
    #[error("A rejection reason is required")]
    RejectionReasonRequired,

    /// A query requires question text.
    #[error("Query text is required")]
    QueryTextRequired,

    /// A referral requires a reason.
    #[error("A referral reason is required")]
    ReferralReasonRequired,

    /// A query response requires text.
    #[error("Response text is required")]
    ResponseTextRequired,

    /// Only the requester may answer an open query.
    #[error("Only the requester may respond to a query")]
    NotRequester,

    /// The request was not found.
    #[error("Approval request not found")]
    RequestNotFound,

    /// Another decision landed first.
    #[error("Request was decided concurrently")]
    ConcurrentDecision,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ApprovalError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::JustificationRequired => "JUSTIFICATION_REQUIRED",
            Self::EmptyThresholdTable => "EMPTY_THRESHOLD_TABLE",
            Self::NoApproverAvailable { .. } => "NO_APPROVER_AVAILABLE",
            Self::NoHigherAuthority { .. } => "NO_HIGHER_AUTHORITY",
            Self::NotAssignedApprover => "NOT_ASSIGNED_APPROVER",
            Self::ThresholdExceeded { .. } => "THRESHOLD_EXCEEDED",
            Self::AlreadyDecided(_) => "ALREADY_DECIDED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::QueryTextRequired => "QUERY_TEXT_REQUIRED",
            Self::ReferralReasonRequired => "REFERRAL_REASON_REQUIRED",
            Self::ResponseTextRequired => "RESPONSE_TEXT_REQUIRED",
            Self::NotRequester => "NOT_REQUESTER",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::ConcurrentDecision => "CONCURRENT_DECISION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code a transport layer should map this to.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AmountNotPositive
            | Self::JustificationRequired
            | Self::RejectionReasonRequired
            | Self::QueryTextRequired
            | Self::ReferralReasonRequired
            | Self::ResponseTextRequired => 400,
            Self::NotAssignedApprover | Self::ThresholdExceeded { .. } | Self::NotRequester => 403,
            Self::RequestNotFound => 404,
            Self::NoApproverAvailable { .. }
            | Self::NoHigherAuthority { .. }
            | Self::AlreadyDecided(_)
            | Self::InvalidTransition { .. }
            | Self::ConcurrentDecision => 409,
            Self::EmptyThresholdTable | Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApprovalError::NoApproverAvailable { amount: dec!(100) }.error_code(),
            "NO_APPROVER_AVAILABLE"
        );
        assert_eq!(
            ApprovalError::AlreadyDecided(ApprovalStatus::Approved).error_code(),
            "ALREADY_DECIDED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ApprovalError::AmountNotPositive.http_status_code(), 400);
        assert_eq!(ApprovalError::NotAssignedApprover.http_status_code(), 403);
        assert_eq!(ApprovalError::RequestNotFound.http_status_code(), 404);
        assert_eq!(
            ApprovalError::AlreadyDecided(ApprovalStatus::Rejected).http_status_code(),
            409
        );
        assert_eq!(
            ApprovalError::Database("boom".to_string()).http_status_code(),
            500
        );
    }
}
