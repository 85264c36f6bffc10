//! VNPay payment method.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;

use paylab_types::{PaymentMethod, PaymentReceipt, PaymentType};

use crate::sink::LogSink;

/// VNPay refuses payments below this amount, in VND.
const MIN_AMOUNT_VND: i64 = 10_000;

/// The 2% fee is capped at this amount, in VND.
const FEE_CAP_VND: i64 = 50_000;

/// Simulated round-trip to the VNPay gateway.
const PROCESSING_DELAY: Duration = Duration::from_millis(1200);

const SOURCE: &str = "VnPayPayment";

/// Banks the gateway accepts.
const VALID_BANK_CODES: &[&str] = &[
    "NCB",
    "VIETCOMBANK",
    "VIETINBANK",
    "TECHCOMBANK",
    "MBBANK",
    "ACB",
    "BIDV",
    "AGRIBANK",
    "SACOMBANK",
];

/// Domestic card payment through the VNPay gateway. Percentage fee with a
/// cap; requires a whitelisted bank code.
#[derive(Debug)]
pub struct VnPayPayment {
    sink: Arc<LogSink>,
}

impl VnPayPayment {
    pub fn new(sink: Arc<LogSink>) -> Self {
        sink.info("VNPay payment method created", SOURCE);
        Self { sink }
    }
}

/// Keeps the first and last four digits, hiding the middle. Anything
/// shorter than eight characters (or absent) is fully masked.
fn mask_card_number(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }
    let first: String = chars[..4].iter().collect();
    let last: String = chars[chars.len() - 4..].iter().collect();
    format!("{first} **** **** {last}")
}

#[async_trait]
impl PaymentMethod for VnPayPayment {
    fn payment_type(&self) -> PaymentType {
        PaymentType::VnPay
    }

    fn validate_payment(&self, amount: Decimal, additional_data: &HashMap<String, String>) -> bool {
        if amount <= Decimal::ZERO {
            self.sink.warning(format!("invalid amount: {amount}"), SOURCE);
            return false;
        }
        if amount < Decimal::from(MIN_AMOUNT_VND) {
            self.sink.warning(
                format!("amount below the {MIN_AMOUNT_VND} VND minimum: {amount}"),
                SOURCE,
            );
            return false;
        }

        let Some(bank_code) = additional_data.get("BankCode") else {
            self.sink.warning("missing BankCode field", SOURCE);
            return false;
        };
        if !VALID_BANK_CODES.contains(&bank_code.to_uppercase().as_str()) {
            self.sink.warning(format!("unknown bank code: {bank_code}"), SOURCE);
            return false;
        }

        true
    }

    fn transaction_fee(&self, amount: Decimal) -> Decimal {
        let fee = amount * Decimal::new(2, 2);
        fee.min(Decimal::from(FEE_CAP_VND))
    }

    async fn process_payment(
        &self,
        amount: Decimal,
        order_id: &str,
        additional_data: &HashMap<String, String>,
    ) -> PaymentReceipt {
        self.sink.info(
            format!("processing VNPay payment - order {order_id}, amount {amount} VND"),
            SOURCE,
        );

        if !self.validate_payment(amount, additional_data) {
            self.sink.error("VNPay payment rejected - validation failed", SOURCE);
            return PaymentReceipt::rejected(PaymentType::VnPay, "Invalid VNPay payment details");
        }

        // validation guarantees the bank code is present
        let bank_code = additional_data.get("BankCode").cloned().unwrap_or_default();
        let card_number = additional_data.get("CardNumber").map(String::as_str).unwrap_or("");

        self.sink.info(format!("connecting to VNPay gateway - bank {bank_code}"), SOURCE);
        tokio::time::sleep(PROCESSING_DELAY).await;

        let transaction_id = format!("VNPAY-{}{}", super::timestamp_token(), super::numeric_token());
        let gateway_reference = format!("VNP{}", rand::rng().random_range(10_000_000..100_000_000));

        let additional_info = HashMap::from([
            ("BankCode".to_string(), bank_code),
            ("CardNumber".to_string(), mask_card_number(card_number)),
            ("VNPayTransactionId".to_string(), gateway_reference),
            ("Currency".to_string(), "VND".to_string()),
            ("Gateway".to_string(), "VNPay Payment Gateway".to_string()),
        ]);

        self.sink.info(
            format!("VNPay payment completed - transaction {transaction_id}"),
            SOURCE,
        );

        PaymentReceipt::approved(
            PaymentType::VnPay,
            "VNPay payment completed",
            transaction_id,
            amount,
            self.transaction_fee(amount),
            additional_info,
        )
    }
}
