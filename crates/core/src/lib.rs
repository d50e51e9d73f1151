//! Core business logic for Diagna.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations for the
//! Financial Control Core live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping logic
//! - `approval` - Multi-tier monetary approval state machine
//! - `matching` - Three-way procurement matching
//! - `commission` - Referral commission and rebate computation
//! - `reconciliation` - Cash-deposit reconciliation

pub mod approval;
pub mod commission;
pub mod ledger;
pub mod matching;
pub mod reconciliation;
