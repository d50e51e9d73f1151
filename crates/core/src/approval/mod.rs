//! Multi-tier approval workflow engine.
//!
//! # Modules
//!
//! - `types` - Request, status, and threshold domain types
//! - `error` - Approval error types
//! - `routing` - Threshold-based approver routing
//! - `service` - The request state machine

pub mod error;
pub mod routing;
pub mod service;
pub mod types;

#[cfg(test)]
mod routing_props;
#[cfg(test)]
mod service_props;

pub use error::ApprovalError;
pub use routing::RoutingEngine;
pub use service::{ActorContext, ApprovalService, DecideOutcome, SubmitOutcome};
pub use types::{
    ApprovalAction, ApprovalEvent, ApprovalStatus, Priority, RequestState, SubjectType,
    SubmitRequestInput, ThresholdRule,
};
