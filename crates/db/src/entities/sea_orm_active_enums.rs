//! `SeaORM` active enums mirroring the `PostgreSQL` enum types.
//!
//! Each enum carries `From` conversions to and from its domain
//! counterpart so repositories never match on strings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use diagna_core::approval;
use diagna_core::commission;
use diagna_core::ledger;
use diagna_core::matching;
use diagna_core::reconciliation;

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<ledger::AccountType> for AccountType {
    fn from(value: ledger::AccountType) -> Self {
        match value {
            ledger::AccountType::Asset => Self::Asset,
            ledger::AccountType::Liability => Self::Liability,
            ledger::AccountType::Equity => Self::Equity,
            ledger::AccountType::Revenue => Self::Revenue,
            ledger::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Journal entry lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_status")]
pub enum JournalStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Submitted, awaiting posting.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Posted to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Voided by a reversing entry.
    #[sea_orm(string_value = "voided")]
    Voided,
}

impl From<ledger::JournalStatus> for JournalStatus {
    fn from(value: ledger::JournalStatus) -> Self {
        match value {
            ledger::JournalStatus::Draft => Self::Draft,
            ledger::JournalStatus::Pending => Self::Pending,
            ledger::JournalStatus::Posted => Self::Posted,
            ledger::JournalStatus::Voided => Self::Voided,
        }
    }
}

impl From<JournalStatus> for ledger::JournalStatus {
    fn from(value: JournalStatus) -> Self {
        match value {
            JournalStatus::Draft => Self::Draft,
            JournalStatus::Pending => Self::Pending,
            JournalStatus::Posted => Self::Posted,
            JournalStatus::Voided => Self::Voided,
        }
    }
}

/// Approval request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Awaiting the requester's answer.
    #[sea_orm(string_value = "queried")]
    Queried,
    /// Escalated to a higher authority.
    #[sea_orm(string_value = "referred")]
    Referred,
}

impl From<approval::ApprovalStatus> for ApprovalStatus {
    fn from(value: approval::ApprovalStatus) -> Self {
        match value {
            approval::ApprovalStatus::Pending => Self::Pending,
            approval::ApprovalStatus::Approved => Self::Approved,
            approval::ApprovalStatus::Rejected => Self::Rejected,
            approval::ApprovalStatus::Queried => Self::Queried,
            approval::ApprovalStatus::Referred => Self::Referred,
        }
    }
}

impl From<ApprovalStatus> for approval::ApprovalStatus {
    fn from(value: ApprovalStatus) -> Self {
        match value {
            ApprovalStatus::Pending => Self::Pending,
            ApprovalStatus::Approved => Self::Approved,
            ApprovalStatus::Rejected => Self::Rejected,
            ApprovalStatus::Queried => Self::Queried,
            ApprovalStatus::Referred => Self::Referred,
        }
    }
}

/// Approval request subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subject_type")]
pub enum SubjectType {
    /// Petty cash disbursement.
    #[sea_orm(string_value = "petty_cash")]
    PettyCash,
    /// Purchase order.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// General expense.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<approval::SubjectType> for SubjectType {
    fn from(value: approval::SubjectType) -> Self {
        match value {
            approval::SubjectType::PettyCash => Self::PettyCash,
            approval::SubjectType::PurchaseOrder => Self::PurchaseOrder,
            approval::SubjectType::Expense => Self::Expense,
        }
    }
}

impl From<SubjectType> for approval::SubjectType {
    fn from(value: SubjectType) -> Self {
        match value {
            SubjectType::PettyCash => Self::PettyCash,
            SubjectType::PurchaseOrder => Self::PurchaseOrder,
            SubjectType::Expense => Self::Expense,
        }
    }
}

/// Request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "priority")]
pub enum Priority {
    /// Routine.
    #[sea_orm(string_value = "normal")]
    Normal,
    /// Needs attention within the day.
    #[sea_orm(string_value = "high")]
    High,
    /// Blocking operations.
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl From<approval::Priority> for Priority {
    fn from(value: approval::Priority) -> Self {
        match value {
            approval::Priority::Normal => Self::Normal,
            approval::Priority::High => Self::High,
            approval::Priority::Urgent => Self::Urgent,
        }
    }
}

impl From<Priority> for approval::Priority {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Normal => Self::Normal,
            Priority::High => Self::High,
            Priority::Urgent => Self::Urgent,
        }
    }
}

/// Three-way match classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "match_status")]
pub enum MatchStatus {
    /// Variance within tolerance.
    #[sea_orm(string_value = "matched")]
    Matched,
    /// Variance beyond tolerance.
    #[sea_orm(string_value = "discrepancy")]
    Discrepancy,
    /// Discrepancy manually cleared.
    #[sea_orm(string_value = "approved")]
    Approved,
}

impl From<matching::MatchStatus> for MatchStatus {
    fn from(value: matching::MatchStatus) -> Self {
        match value {
            matching::MatchStatus::Matched => Self::Matched,
            matching::MatchStatus::Discrepancy => Self::Discrepancy,
            matching::MatchStatus::Approved => Self::Approved,
        }
    }
}

impl From<MatchStatus> for matching::MatchStatus {
    fn from(value: MatchStatus) -> Self {
        match value {
            MatchStatus::Matched => Self::Matched,
            MatchStatus::Discrepancy => Self::Discrepancy,
            MatchStatus::Approved => Self::Approved,
        }
    }
}

/// Purchase order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "purchase_order_status")]
pub enum PurchaseOrderStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Submitted for approval.
    #[sea_orm(string_value = "pending_approval")]
    PendingApproval,
    /// Approved for receiving.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Received and matched.
    #[sea_orm(string_value = "executed")]
    Executed,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<matching::PurchaseOrderStatus> for PurchaseOrderStatus {
    fn from(value: matching::PurchaseOrderStatus) -> Self {
        match value {
            matching::PurchaseOrderStatus::Draft => Self::Draft,
            matching::PurchaseOrderStatus::PendingApproval => Self::PendingApproval,
            matching::PurchaseOrderStatus::Approved => Self::Approved,
            matching::PurchaseOrderStatus::Executed => Self::Executed,
            matching::PurchaseOrderStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<PurchaseOrderStatus> for matching::PurchaseOrderStatus {
    fn from(value: PurchaseOrderStatus) -> Self {
        match value {
            PurchaseOrderStatus::Draft => Self::Draft,
            PurchaseOrderStatus::PendingApproval => Self::PendingApproval,
            PurchaseOrderStatus::Approved => Self::Approved,
            PurchaseOrderStatus::Executed => Self::Executed,
            PurchaseOrderStatus::Rejected => Self::Rejected,
        }
    }
}

/// Vendor invoice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vendor_invoice_status")]
pub enum VendorInvoiceStatus {
    /// Received, not yet matched.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Bound to a match.
    #[sea_orm(string_value = "matched")]
    Matched,
}

impl From<matching::VendorInvoiceStatus> for VendorInvoiceStatus {
    fn from(value: matching::VendorInvoiceStatus) -> Self {
        match value {
            matching::VendorInvoiceStatus::Pending => Self::Pending,
            matching::VendorInvoiceStatus::Matched => Self::Matched,
        }
    }
}

impl From<VendorInvoiceStatus> for matching::VendorInvoiceStatus {
    fn from(value: VendorInvoiceStatus) -> Self {
        match value {
            VendorInvoiceStatus::Pending => Self::Pending,
            VendorInvoiceStatus::Matched => Self::Matched,
        }
    }
}

/// Referral invoice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "referral_invoice_status")]
pub enum ReferralInvoiceStatus {
    /// Issued, awaiting settlement.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<commission::ReferralInvoiceStatus> for ReferralInvoiceStatus {
    fn from(value: commission::ReferralInvoiceStatus) -> Self {
        match value {
            commission::ReferralInvoiceStatus::Pending => Self::Pending,
            commission::ReferralInvoiceStatus::Paid => Self::Paid,
        }
    }
}

impl From<ReferralInvoiceStatus> for commission::ReferralInvoiceStatus {
    fn from(value: ReferralInvoiceStatus) -> Self {
        match value {
            ReferralInvoiceStatus::Pending => Self::Pending,
            ReferralInvoiceStatus::Paid => Self::Paid,
        }
    }
}

/// Settlement payout method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
pub enum PaymentMethod {
    /// Cash payout.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    /// Cheque.
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

impl From<commission::PaymentMethod> for PaymentMethod {
    fn from(value: commission::PaymentMethod) -> Self {
        match value {
            commission::PaymentMethod::Cash => Self::Cash,
            commission::PaymentMethod::BankTransfer => Self::BankTransfer,
            commission::PaymentMethod::Cheque => Self::Cheque,
        }
    }
}

impl From<PaymentMethod> for commission::PaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::BankTransfer => Self::BankTransfer,
            PaymentMethod::Cheque => Self::Cheque,
        }
    }
}

/// Bank deposit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "deposit_status")]
pub enum DepositStatus {
    /// Awaiting verification.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Verified; immutable.
    #[sea_orm(string_value = "verified")]
    Verified,
    /// Carries a discrepancy.
    #[sea_orm(string_value = "flagged")]
    Flagged,
}

impl From<reconciliation::DepositStatus> for DepositStatus {
    fn from(value: reconciliation::DepositStatus) -> Self {
        match value {
            reconciliation::DepositStatus::Pending => Self::Pending,
            reconciliation::DepositStatus::Verified => Self::Verified,
            reconciliation::DepositStatus::Flagged => Self::Flagged,
        }
    }
}

impl From<DepositStatus> for reconciliation::DepositStatus {
    fn from(value: DepositStatus) -> Self {
        match value {
            DepositStatus::Pending => Self::Pending,
            DepositStatus::Verified => Self::Verified,
            DepositStatus::Flagged => Self::Flagged,
        }
    }
}

/// Deposit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "deposit_method")]
pub enum DepositMethod {
    /// Over the counter.
    #[sea_orm(string_value = "counter")]
    Counter,
    /// Electronic transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Cheque deposit.
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

impl From<reconciliation::DepositMethod> for DepositMethod {
    fn from(value: reconciliation::DepositMethod) -> Self {
        match value {
            reconciliation::DepositMethod::Counter => Self::Counter,
            reconciliation::DepositMethod::Transfer => Self::Transfer,
            reconciliation::DepositMethod::Cheque => Self::Cheque,
        }
    }
}

impl From<DepositMethod> for reconciliation::DepositMethod {
    fn from(value: DepositMethod) -> Self {
        match value {
            DepositMethod::Counter => Self::Counter,
            DepositMethod::Transfer => Self::Transfer,
            DepositMethod::Cheque => Self::Cheque,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_round_trip() {
        for ty in [
            ledger::AccountType::Asset,
            ledger::AccountType::Liability,
            ledger::AccountType::Equity,
            ledger::AccountType::Revenue,
            ledger::AccountType::Expense,
        ] {
            assert_eq!(ledger::AccountType::from(AccountType::from(ty)), ty);
        }
    }

    #[test]
    fn test_approval_status_round_trip() {
        for status in [
            approval::ApprovalStatus::Pending,
            approval::ApprovalStatus::Approved,
            approval::ApprovalStatus::Rejected,
            approval::ApprovalStatus::Queried,
            approval::ApprovalStatus::Referred,
        ] {
            assert_eq!(
                approval::ApprovalStatus::from(ApprovalStatus::from(status)),
                status
            );
        }
    }

    #[test]
    fn test_match_status_round_trip() {
        for status in [
            matching::MatchStatus::Matched,
            matching::MatchStatus::Discrepancy,
            matching::MatchStatus::Approved,
        ] {
            assert_eq!(matching::MatchStatus::from(MatchStatus::from(status)), status);
        }
    }
}
