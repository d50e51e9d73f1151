//! Three-way procurement matching engine.
//!
//! # Modules
//!
//! - `types` - Match, PO, and invoice domain types
//! - `error` - Matching error types
//! - `engine` - Match computation and discrepancy clearance

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::MatchingEngine;
pub use error::{MatchedDocument, MatchingError};
pub use types::{
    MatchComputation, MatchInput, MatchStatus, MatchTolerance, PurchaseOrderStatus,
    VendorInvoiceStatus,
};
