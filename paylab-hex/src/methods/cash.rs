//! Cash payment method.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use paylab_types::{PaymentMethod, PaymentReceipt, PaymentType};

use crate::sink::LogSink;

/// Upper bound for a single cash payment, in VND.
const MAX_AMOUNT_VND: i64 = 100_000_000;

/// Simulated time spent counting the cash.
const PROCESSING_DELAY: Duration = Duration::from_millis(500);

const SOURCE: &str = "CashPayment";

/// Over-the-counter cash payment. No fee, capped amount.
#[derive(Debug)]
pub struct CashPayment {
    sink: Arc<LogSink>,
}

impl CashPayment {
    pub fn new(sink: Arc<LogSink>) -> Self {
        sink.info("cash payment method created", SOURCE);
        Self { sink }
    }
}

#[async_trait]
impl PaymentMethod for CashPayment {
    fn payment_type(&self) -> PaymentType {
        PaymentType::Cash
    }

    fn validate_payment(&self, amount: Decimal, _additional_data: &HashMap<String, String>) -> bool {
        if amount <= Decimal::ZERO {
            self.sink.warning(format!("invalid amount: {amount}"), SOURCE);
            return false;
        }
        if amount > Decimal::from(MAX_AMOUNT_VND) {
            self.sink.warning(
                format!("amount exceeds the {MAX_AMOUNT_VND} VND cash limit: {amount}"),
                SOURCE,
            );
            return false;
        }
        true
    }

    fn transaction_fee(&self, _amount: Decimal) -> Decimal {
        // cash carries no transaction fee
        Decimal::ZERO
    }

    async fn process_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        additional_data: &HashMap<String, String>,
    ) -> PaymentReceipt {
        self.sink.info(
            format!("processing cash payment - order {order_id}, amount {amount} VND"),
            SOURCE,
        );

        if !self.validate_payment(amount, additional_data) {
            self.sink.error("cash payment rejected - validation failed", SOURCE);
            return PaymentReceipt::rejected(PaymentType::Cash, "Invalid cash payment amount");
        }

        tokio::time::sleep(PROCESSING_DELAY).await;

        let transaction_id = format!("CASH-{}-{}", super::timestamp_token(), super::numeric_token());

        let field = |key: &str, default: &str| {
            additional_data
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };
        let additional_info = HashMap::from([
            ("ReceivedAmount".to_string(), field("ReceivedAmount", "0")),
            ("ChangeAmount".to_string(), field("ChangeAmount", "0")),
            ("Cashier".to_string(), field("Cashier", "Unknown")),
        ]);

        self.sink.info(
            format!("cash payment completed - transaction {transaction_id}"),
            SOURCE,
        );

        PaymentReceipt::approved(
            PaymentType::Cash,
            "Cash payment completed",
            transaction_id,
            amount,
            self.transaction_fee(amount),
            additional_info,
        )
    }
}
