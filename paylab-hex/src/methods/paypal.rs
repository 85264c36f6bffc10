//! PayPal payment method.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use paylab_types::{PaymentMethod, PaymentReceipt, PaymentType};

use crate::sink::LogSink;

/// Simulated round-trip to the PayPal API.
const PROCESSING_DELAY: Duration = Duration::from_millis(1500);

const SOURCE: &str = "PaypalPayment";

/// International payment through PayPal. Percentage fee plus a fixed
/// per-transaction charge; requires a payer email.
#[derive(Debug)]
pub struct PaypalPayment {
    sink: Arc<LogSink>,
}

impl PaypalPayment {
    pub fn new(sink: Arc<LogSink>) -> Self {
        sink.info("PayPal payment method created", SOURCE);
        Self { sink }
    }

    /// 3.4% of the amount.
    fn percentage_fee(amount: Decimal) -> Decimal {
        amount * Decimal::new(34, 3)
    }

    /// $0.30 fixed charge.
    fn fixed_fee() -> Decimal {
        Decimal::new(30, 2)
    }
}

#[async_trait]
impl PaymentMethod for PaypalPayment {
    fn payment_type(&self) -> PaymentType {
        PaymentType::Paypal
    }

    fn validate_payment(&self, amount: Decimal, additional_data: &HashMap<String, String>) -> bool {
        if amount <= Decimal::ZERO {
            self.sink.warning(format!("invalid amount: {amount}"), SOURCE);
            return false;
        }

        let Some(email) = additional_data.get("PaypalEmail") else {
            self.sink.warning("missing PaypalEmail field", SOURCE);
            return false;
        };
        if email.is_empty() || !email.contains('@') {
            self.sink.warning(format!("invalid PayPal email: {email}"), SOURCE);
            return false;
        }

        true
    }

    fn transaction_fee(&self, amount: Decimal) -> Decimal {
        Self::percentage_fee(amount) + Self::fixed_fee()
    }

    async fn process_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        additional_data: &HashMap<String, String>,
    ) -> PaymentReceipt {
        self.sink.info(
            format!("processing PayPal payment - order {order_id}, amount ${amount}"),
            SOURCE,
        );

        if !self.validate_payment(amount, additional_data) {
            self.sink.error("PayPal payment rejected - validation failed", SOURCE);
            return PaymentReceipt::rejected(PaymentType::Paypal, "Invalid PayPal payment details");
        }

        // validation guarantees the email is present
        let email = additional_data.get("PaypalEmail").cloned().unwrap_or_default();

        self.sink.info(format!("calling PayPal API for {email}"), SOURCE);
        tokio::time::sleep(PROCESSING_DELAY).await;

        let token: String = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        let transaction_id = format!("PAYPAL-{token}");
        let gateway_reference = format!("PP-{}", rand::rng().random_range(100_000..1_000_000));

        let additional_info = HashMap::from([
            ("PaypalEmail".to_string(), email),
            ("PaypalTransactionId".to_string(), gateway_reference),
            ("Currency".to_string(), "USD".to_string()),
            ("ExchangeRate".to_string(), "23500".to_string()),
        ]);

        self.sink.info(
            format!("PayPal payment completed - transaction {transaction_id}"),
            SOURCE,
        );

        PaymentReceipt::approved(
            PaymentType::Paypal,
            "PayPal payment completed",
            transaction_id,
            amount,
            self.transaction_fee(amount),
            additional_info,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn method() -> PaypalPayment {
        PaypalPayment::new(Arc::new(LogSink::new()))
    }

    fn data_with_email(email: &str) -> HashMap<String, String> {
        HashMap::from([("PaypalEmail".to_string(), email.to_string())])
    }

    #[test]
    fn test_validation_requires_a_plausible_email() {
        let paypal = method();

        assert!(!paypal.validate_payment(dec!(50), &HashMap::new()));
        assert!(!paypal.validate_payment(dec!(50), &data_with_email("")));
        assert!(!paypal.validate_payment(dec!(50), &data_with_email("not-an-email")));
        assert!(paypal.validate_payment(dec!(50), &data_with_email("a@b.com")));
        assert!(!paypal.validate_payment(dec!(0), &data_with_email("a@b.com")));
    }

    #[test]
    fn test_fee_is_three_point_four_percent_plus_thirty_cents() {
        let paypal = method();
        assert_eq!(paypal.transaction_fee(dec!(50)), dec!(2.00));
        assert_eq!(paypal.transaction_fee(dec!(100)), dec!(3.70));
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_success_shapes_receipt() {
        let paypal = method();
        let receipt = paypal
            .process_payment(dec!(50), "ORD-5", &data_with_email("a@b.com"))
            .await;

        assert!(receipt.success);
        let id = receipt.transaction_id.expect("success carries an id");
        assert!(id.starts_with("PAYPAL-"));
        assert_eq!(id.len(), "PAYPAL-".len() + 8);

        assert_eq!(receipt.transaction_fee, dec!(2.00));
        assert_eq!(receipt.total_amount, dec!(52.00));
        assert_eq!(receipt.additional_info["PaypalEmail"], "a@b.com");
        assert_eq!(receipt.additional_info["Currency"], "USD");
        assert_eq!(receipt.additional_info["ExchangeRate"], "23500");
        assert!(receipt.additional_info["PaypalTransactionId"].starts_with("PP-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_missing_email_is_rejected() {
        let paypal = method();
        let receipt = paypal.process_payment(dec!(50), "ORD-6", &HashMap::new()).await;

        assert!(!receipt.success);
        assert!(receipt.transaction_id.is_none());
    }
}
