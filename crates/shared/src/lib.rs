//! Shared types, errors, and configuration for Diagna.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management, including the externalized financial
//!   tolerances and thresholds

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FinanceConfig};
pub use error::{AppError, AppResult};
