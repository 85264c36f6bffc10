//! Payment domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// The payment methods the service can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    Cash,
    Paypal,
    VnPay,
}

impl PaymentType {
    /// Canonical discriminators, in catalog order.
    pub const ALL: [PaymentType; 3] = [PaymentType::Cash, PaymentType::Paypal, PaymentType::VnPay];
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Cash => write!(f, "CASH"),
            PaymentType::Paypal => write!(f, "PAYPAL"),
            PaymentType::VnPay => write!(f, "VNPAY"),
        }
    }
}

/// Outcome of one payment-processing call.
///
/// Receipts are immutable once created - a rejected payment yields a
/// receipt with `success == false` and no transaction id, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentReceipt {
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Gateway-style transaction id; absent when the payment was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub transaction_fee: Decimal,
    pub total_amount: Decimal,
    /// When processing finished
    pub processed_at: DateTime<Utc>,
    /// Method-specific details (bank code, masked card, payer email, ...)
    #[serde(default)]
    pub additional_info: HashMap<String, String>,
}

impl PaymentReceipt {
    /// Builds a successful receipt; the total is the amount plus the fee.
    pub fn approved(
        payment_type: PaymentType,
        message: impl Into<String>,
        transaction_id: String,
        amount: Decimal,
        transaction_fee: Decimal,
        additional_info: HashMap<String, String>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            transaction_id: Some(transaction_id),
            payment_type,
            amount,
            transaction_fee,
            total_amount: amount + transaction_fee,
            processed_at: Utc::now(),
            additional_info,
        }
    }

    /// Builds a rejection receipt carrying only the outcome message.
    pub fn rejected(payment_type: PaymentType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            transaction_id: None,
            payment_type,
            amount: Decimal::ZERO,
            transaction_fee: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            processed_at: Utc::now(),
            additional_info: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_approved_receipt_totals_amount_and_fee() {
        let receipt = PaymentReceipt::approved(
            PaymentType::Paypal,
            "ok",
            "PAYPAL-ABCD1234".to_string(),
            dec!(50),
            dec!(2.00),
            HashMap::new(),
        );
        assert!(receipt.success);
        assert_eq!(receipt.total_amount, dec!(52.00));
        assert_eq!(receipt.transaction_id.as_deref(), Some("PAYPAL-ABCD1234"));
    }

    #[test]
    fn test_rejected_receipt_has_no_transaction_id() {
        let receipt = PaymentReceipt::rejected(PaymentType::Cash, "invalid amount");
        assert!(!receipt.success);
        assert!(receipt.transaction_id.is_none());
        assert_eq!(receipt.amount, Decimal::ZERO);
    }

    #[test]
    fn test_payment_type_display_matches_wire_form() {
        assert_eq!(PaymentType::Cash.to_string(), "CASH");
        assert_eq!(PaymentType::Paypal.to_string(), "PAYPAL");
        assert_eq!(PaymentType::VnPay.to_string(), "VNPAY");
    }
}
