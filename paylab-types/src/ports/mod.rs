//! Port traits (interfaces for payment method implementations).
//!
//! The application layer depends on these traits, not concrete
//! implementations.

mod payment_method;

pub use payment_method::PaymentMethod;
