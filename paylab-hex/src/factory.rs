//! Payment method factory.
//!
//! Maps a string discriminator to a freshly constructed payment method.
//! A new instance is built on every call - methods are never pooled or
//! cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use paylab_types::{FactoryError, PaymentMethod, PaymentType};

use crate::methods::{CashPayment, PaypalPayment, VnPayPayment};
use crate::sink::LogSink;

/// Accepted discriminator spellings and the payment type each resolves to.
///
/// Inputs are trimmed and upper-cased before lookup, so the table only
/// holds upper-case spellings. The alias set is deliberately wider than
/// the canonical list returned by `supported_payment_methods` - a type
/// can be supported through an alias that list never mentions.
const ALIASES: &[(&str, PaymentType)] = &[
    ("CASH", PaymentType::Cash),
    ("TIỀN MẶT", PaymentType::Cash),
    ("TIEN_MAT", PaymentType::Cash),
    ("PAYPAL", PaymentType::Paypal),
    ("VNPAY", PaymentType::VnPay),
    ("VN_PAY", PaymentType::VnPay),
];

/// Constructs payment methods and tracks how many of each were created.
///
/// The counter map is mutex-guarded because one factory instance is
/// shared across concurrent request handlers.
pub struct PaymentFactory {
    sink: Arc<LogSink>,
    creation_stats: Mutex<HashMap<String, u64>>,
}

impl PaymentFactory {
    /// Creates a factory wired to the shared process-wide log sink.
    pub fn new() -> Self {
        Self::with_sink(LogSink::global())
    }

    /// Creates a factory with an explicit sink (used by tests to keep
    /// log assertions isolated).
    pub fn with_sink(sink: Arc<LogSink>) -> Self {
        sink.info("payment factory initialized", "PaymentFactory");
        Self {
            sink,
            creation_stats: Mutex::new(HashMap::new()),
        }
    }

    fn resolve(normalized: &str) -> Option<PaymentType> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, payment_type)| *payment_type)
    }

    /// Builds a new instance of the payment method the discriminator
    /// resolves to.
    ///
    /// The input is trimmed and case-folded to upper before the alias
    /// lookup. Fails with [`FactoryError::UnsupportedPaymentType`] when
    /// nothing matches.
    pub fn create_payment_method(
        &self,
        payment_type: &str,
    ) -> Result<Box<dyn PaymentMethod>, FactoryError> {
        self.sink.info(
            format!("creating payment method for '{payment_type}'"),
            "PaymentFactory",
        );

        let normalized = payment_type.trim().to_uppercase();
        let Some(resolved) = Self::resolve(&normalized) else {
            return Err(FactoryError::UnsupportedPaymentType {
                requested: payment_type.trim().to_string(),
            });
        };

        let method: Box<dyn PaymentMethod> = match resolved {
            PaymentType::Cash => Box::new(CashPayment::new(self.sink.clone())),
            PaymentType::Paypal => Box::new(PaypalPayment::new(self.sink.clone())),
            PaymentType::VnPay => Box::new(VnPayPayment::new(self.sink.clone())),
        };

        let created_so_far = {
            let mut stats = self.lock_stats();
            let counter = stats.entry(normalized).or_insert(0);
            *counter += 1;
            *counter
        };
        self.sink.info(
            format!("created {resolved} payment method ({created_so_far} so far)"),
            "PaymentFactory",
        );

        Ok(method)
    }

    /// The canonical discriminators, without aliases.
    pub fn supported_payment_methods(&self) -> Vec<String> {
        PaymentType::ALL.iter().map(ToString::to_string).collect()
    }

    /// Whether the discriminator resolves to any method, aliases
    /// included.
    pub fn is_payment_method_supported(&self, payment_type: &str) -> bool {
        Self::resolve(&payment_type.trim().to_uppercase()).is_some()
    }

    /// Snapshot of the per-discriminator creation counters.
    pub fn creation_statistics(&self) -> HashMap<String, u64> {
        self.lock_stats().clone()
    }

    /// Clears the creation counters.
    pub fn reset_statistics(&self) {
        self.lock_stats().clear();
        self.sink.info("factory statistics reset", "PaymentFactory");
    }

    fn lock_stats(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.creation_stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PaymentFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> PaymentFactory {
        PaymentFactory::with_sink(Arc::new(LogSink::new()))
    }

    #[test]
    fn test_input_is_trimmed_and_case_folded() {
        let factory = factory();
        let method = factory.create_payment_method("cash ").expect("alias resolves");
        assert_eq!(method.payment_type(), PaymentType::Cash);

        let method = factory.create_payment_method(" vn_pay").expect("alias resolves");
        assert_eq!(method.payment_type(), PaymentType::VnPay);
    }

    #[test]
    fn test_unsupported_type_carries_the_offending_input() {
        let factory = factory();
        let err = factory.create_payment_method("BITCOIN").unwrap_err();
        assert!(matches!(
            err,
            FactoryError::UnsupportedPaymentType { requested } if requested == "BITCOIN"
        ));
    }

    #[test]
    fn test_alias_set_is_wider_than_the_canonical_list() {
        let factory = factory();

        assert!(factory.is_payment_method_supported("TIEN_MAT"));
        assert!(factory.is_payment_method_supported("tiền mặt"));
        assert!(factory.is_payment_method_supported("vn_pay"));

        let canonical = factory.supported_payment_methods();
        assert_eq!(canonical, vec!["CASH", "PAYPAL", "VNPAY"]);
        assert!(!canonical.contains(&"TIEN_MAT".to_string()));
    }

    #[test]
    fn test_every_call_builds_a_distinct_instance() {
        let factory = factory();
        let first = factory.create_payment_method("CASH").expect("supported");
        let second = factory.create_payment_method("CASH").expect("supported");

        let first_ptr = first.as_ref() as *const dyn PaymentMethod as *const u8;
        let second_ptr = second.as_ref() as *const dyn PaymentMethod as *const u8;
        assert_ne!(first_ptr, second_ptr);

        assert_eq!(factory.creation_statistics()["CASH"], 2);
    }

    #[test]
    fn test_statistics_key_on_the_normalized_input() {
        let factory = factory();
        factory.create_payment_method("cash").expect("supported");
        factory.create_payment_method("TIEN_MAT").expect("supported");

        let stats = factory.creation_statistics();
        assert_eq!(stats["CASH"], 1);
        assert_eq!(stats["TIEN_MAT"], 1);
    }

    #[test]
    fn test_reset_clears_the_counters() {
        let factory = factory();
        factory.create_payment_method("PAYPAL").expect("supported");
        assert!(!factory.creation_statistics().is_empty());

        factory.reset_statistics();
        assert!(factory.creation_statistics().is_empty());
    }
}
