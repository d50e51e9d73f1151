//! Cash-deposit reconciliation engine.
//!
//! # Modules
//!
//! - `types` - Deposit and variance domain types
//! - `error` - Reconciliation error types
//! - `engine` - Undeposited-cash and variance computation

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::ReconciliationEngine;
pub use error::ReconciliationError;
pub use types::{
    DailyVariance, DepositClassification, DepositMethod, DepositStatus, UndepositedCash,
    VarianceReport, VarianceSummary, VerifiedCashTransaction, VerifyDecision,
};
