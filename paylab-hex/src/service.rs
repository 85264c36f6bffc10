//! Payment application service.
//!
//! Orchestrates the factory and the payment methods. Contains no HTTP
//! logic - the inbound adapter translates its results into responses.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use paylab_types::{
    AppError, FactoryDemoEntry, FactoryDemoResponse, FeeQuote, PaymentMethodInfo, PaymentReceipt,
    PaymentType, ProcessPaymentRequest,
};

use crate::factory::PaymentFactory;
use crate::sink::LogSink;

/// Sample amount used by the factory demo endpoint.
const DEMO_SAMPLE_AMOUNT: i64 = 1_000_000;

/// Application service for the payment demo.
///
/// One instance is constructed at startup and shared across request
/// handlers, which makes the factory's creation statistics process-wide.
pub struct PaymentService {
    sink: Arc<LogSink>,
    factory: PaymentFactory,
}

impl PaymentService {
    /// Creates a service wired to the shared process-wide log sink.
    pub fn new() -> Self {
        Self::with_sink(LogSink::global())
    }

    /// Creates a service with an explicit sink (used by tests).
    pub fn with_sink(sink: Arc<LogSink>) -> Self {
        Self {
            factory: PaymentFactory::with_sink(sink.clone()),
            sink,
        }
    }

    /// The log sink this service writes to.
    pub fn sink(&self) -> &Arc<LogSink> {
        &self.sink
    }

    /// The shared factory.
    pub fn factory(&self) -> &PaymentFactory {
        &self.factory
    }

    /// Runs one payment through the matching method.
    ///
    /// Request-shape problems (missing type, non-positive amount) and an
    /// unresolvable discriminator are errors; a payment the method itself
    /// rejects comes back as an `Ok` receipt with `success == false`.
    pub async fn process(&self, req: ProcessPaymentRequest) -> Result<PaymentReceipt, AppError> {
        self.sink.info(
            format!(
                "payment request received - type {}, amount {}",
                req.payment_type, req.amount
            ),
            "PaymentService",
        );

        if req.payment_type.trim().is_empty() {
            self.sink.error("payment type missing from request", "PaymentService");
            return Err(AppError::BadRequest("payment_type is required".into()));
        }
        if req.amount <= Decimal::ZERO {
            self.sink.error(
                format!("non-positive amount: {}", req.amount),
                "PaymentService",
            );
            return Err(AppError::BadRequest("amount must be greater than zero".into()));
        }

        let method = self.factory.create_payment_method(&req.payment_type)?;
        let receipt = method
            .process_payment(req.amount, &req.order_id, &req.additional_data)
            .await;

        if receipt.success {
            self.sink.info(
                format!(
                    "payment succeeded - transaction {}",
                    receipt.transaction_id.as_deref().unwrap_or("-")
                ),
                "PaymentService",
            );
        } else {
            self.sink.error(
                format!("payment failed - {}", receipt.message),
                "PaymentService",
            );
        }

        Ok(receipt)
    }

    /// Quotes the fee a method would charge on the given amount.
    pub fn quote_fee(&self, payment_type: &str, amount: Decimal) -> Result<FeeQuote, AppError> {
        self.sink.info(
            format!("fee quote requested - type {payment_type}, amount {amount}"),
            "PaymentService",
        );

        let method = self.factory.create_payment_method(payment_type)?;
        let transaction_fee = method.transaction_fee(amount);
        let fee_percentage = if amount > Decimal::ZERO {
            transaction_fee / amount * Decimal::from(100)
        } else {
            Decimal::ZERO
        };

        Ok(FeeQuote {
            payment_type: method.payment_type(),
            amount,
            transaction_fee,
            total_amount: amount + transaction_fee,
            fee_percentage,
        })
    }

    /// Static catalog of the supported methods.
    pub fn method_catalog(&self) -> Vec<PaymentMethodInfo> {
        vec![
            PaymentMethodInfo {
                payment_type: PaymentType::Cash,
                display_name: "Cash".to_string(),
                description: "Pay over the counter in cash".to_string(),
                min_amount: Decimal::ZERO,
                max_amount: Some(Decimal::from(100_000_000_i64)),
                fee_description: "Free".to_string(),
                required_fields: vec!["order_id".to_string(), "amount".to_string()],
            },
            PaymentMethodInfo {
                payment_type: PaymentType::Paypal,
                display_name: "PayPal".to_string(),
                description: "International payment through PayPal".to_string(),
                min_amount: Decimal::ZERO,
                max_amount: None,
                fee_description: "3.4% + $0.30 per transaction".to_string(),
                required_fields: vec![
                    "order_id".to_string(),
                    "amount".to_string(),
                    "PaypalEmail".to_string(),
                ],
            },
            PaymentMethodInfo {
                payment_type: PaymentType::VnPay,
                display_name: "VNPay".to_string(),
                description: "Domestic card payment through the VNPay gateway".to_string(),
                min_amount: Decimal::from(10_000),
                max_amount: None,
                fee_description: "2% (capped at 50,000 VND)".to_string(),
                required_fields: vec![
                    "order_id".to_string(),
                    "amount".to_string(),
                    "BankCode".to_string(),
                ],
            },
        ]
    }

    /// Builds one instance of every method through the factory and
    /// reports the fee each quotes on a sample amount - demonstrating
    /// that every call constructs a fresh object.
    pub fn demo_factory(&self) -> Result<FactoryDemoResponse, AppError> {
        self.sink.info("running factory construction demo", "PaymentService");

        let sample = Decimal::from(DEMO_SAMPLE_AMOUNT);
        let methods = PaymentType::ALL
            .iter()
            .map(|payment_type| -> Result<FactoryDemoEntry, AppError> {
                let method = self.factory.create_payment_method(&payment_type.to_string())?;
                Ok(FactoryDemoEntry {
                    payment_type: method.payment_type(),
                    sample_fee: method.transaction_fee(sample),
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(FactoryDemoResponse {
            methods,
            note: format!("each call constructed a fresh instance; sample fees are quoted on {DEMO_SAMPLE_AMOUNT}"),
        })
    }

    /// Canonical discriminator list.
    pub fn supported_methods(&self) -> Vec<String> {
        self.factory.supported_payment_methods()
    }

    /// Snapshot of the factory's creation counters.
    pub fn creation_statistics(&self) -> HashMap<String, u64> {
        self.factory.creation_statistics()
    }

    /// Clears the factory's creation counters.
    pub fn reset_statistics(&self) {
        self.factory.reset_statistics();
    }
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}
