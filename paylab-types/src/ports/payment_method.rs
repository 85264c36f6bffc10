//! Payment method port trait.
//!
//! Each supported payment method implements this trait; the factory
//! decides which implementation to construct from a string discriminator.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::{PaymentReceipt, PaymentType};

/// One way of paying: validate the request, quote a fee, process it.
///
/// Implementations are constructed fresh for every request and carry no
/// mutable state, so they need no internal locking.
#[async_trait::async_trait]
pub trait PaymentMethod: Send + Sync + std::fmt::Debug {
    /// The canonical discriminator of this method.
    fn payment_type(&self) -> PaymentType;

    /// Checks the method-specific preconditions.
    ///
    /// Malformed input never panics or errors - the method logs a warning
    /// and returns `false`.
    fn validate_payment(&self, amount: Decimal, additional_data: &HashMap<String, String>) -> bool;

    /// Quotes the transaction fee for the given amount. Pure.
    fn transaction_fee(&self, amount: Decimal) -> Decimal;

    /// Runs the full payment flow: validate, simulate gateway latency,
    /// compute fee and total, synthesize a transaction id.
    ///
    /// A rejected payment is reported through the receipt, never as an
    /// error.
    async fn process_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        additional_data: &HashMap<String, String>,
    ) -> PaymentReceipt;
}
