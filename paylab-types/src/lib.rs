//! # Paylab Types
//!
//! Domain types and port traits for the payment-method demo service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the service:
//! - `domain/` - Pure domain types (LogEntry, PaymentType, PaymentReceipt)
//! - `ports/` - Trait definitions the payment methods implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{LogEntry, LogLevel, PaymentReceipt, PaymentType};
pub use dto::*;
pub use error::{AppError, FactoryError};
pub use ports::PaymentMethod;
