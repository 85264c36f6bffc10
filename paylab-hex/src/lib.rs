//! # Paylab Hex
//!
//! Application core and HTTP adapter for the payment-method demo service.
//!
//! ## Architecture
//!
//! - `sink/` - Process-wide, queryable log sink
//! - `methods/` - Payment method implementations (cash, PayPal, VNPay)
//! - `factory/` - Maps discriminators to freshly constructed methods
//! - `service/` - Application service (orchestrates the factory and methods)
//! - `inbound/` - HTTP adapter (Axum server)

pub mod factory;
pub mod inbound;
pub mod methods;
pub mod openapi;
pub mod service;
pub mod sink;


pub use factory::PaymentFactory;
pub use service::PaymentService;
pub use sink::LogSink;
