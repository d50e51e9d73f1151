//! Referral commission and rebate engine.
//!
//! # Modules
//!
//! - `types` - Provider terms, breakdowns, and settlement types
//! - `error` - Commission error types
//! - `engine` - Commission arithmetic and settlement rules

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::CommissionEngine;
pub use error::CommissionError;
pub use types::{
    BilledService, CommissionBreakdown, PaymentMethod, PeriodAggregate, ProviderTerms,
    QualifyingInvoice, ReferralInvoiceLine, ReferralInvoiceStatus, ServiceCommission,
    SettlementInput,
};
