//! Payment method implementations.
//!
//! Each method is constructed fresh per request by the factory and holds
//! nothing but a handle to the shared log sink.

mod cash;
mod paypal;
mod vnpay;

pub use cash::CashPayment;
pub use paypal::PaypalPayment;
pub use vnpay::VnPayPayment;

use rand::Rng;

/// `yyyyMMddHHmmss` token used in cash and VNPay transaction ids.
pub(crate) fn timestamp_token() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Four-digit random suffix for transaction ids.
pub(crate) fn numeric_token() -> u32 {
    rand::rng().random_range(1000..10000)
}
