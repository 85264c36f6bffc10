//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::domain::{LogEntry, PaymentType};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to process a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    /// Payment method discriminator ("CASH", "PAYPAL", "VNPAY" or an alias)
    #[schema(example = "CASH")]
    pub payment_type: String,
    /// Amount to pay
    #[schema(example = 250000)]
    pub amount: Decimal,
    /// Order this payment settles
    #[schema(example = "ORD-2024-0042")]
    pub order_id: String,
    /// Method-specific fields (PaypalEmail, BankCode, CardNumber, ...)
    #[serde(default)]
    pub additional_data: HashMap<String, String>,
}

/// Catalog entry describing one supported payment method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodInfo {
    pub payment_type: PaymentType,
    #[schema(example = "PayPal")]
    pub display_name: String,
    pub description: String,
    pub min_amount: Decimal,
    /// Upper bound, if the method has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[schema(example = "3.4% + $0.30 per transaction")]
    pub fee_description: String,
    pub required_fields: Vec<String>,
}

/// Fee quote for a payment type and amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeeQuote {
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub transaction_fee: Decimal,
    pub total_amount: Decimal,
    /// Fee as a percentage of the amount (zero when the amount is zero)
    pub fee_percentage: Decimal,
}

/// One factory-constructed method in the demo response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FactoryDemoEntry {
    pub payment_type: PaymentType,
    /// Fee the method quotes on a 1,000,000 sample amount
    pub sample_fee: Decimal,
}

/// Result of constructing one instance of every payment method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FactoryDemoResponse {
    pub methods: Vec<FactoryDemoEntry>,
    pub note: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Log DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A snapshot of retained log entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogsResponse {
    pub total: usize,
    /// Identity token of the shared sink that produced the snapshot
    pub instance_id: String,
    pub entries: Vec<LogEntry>,
}

/// Per-level totals for the retained log entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogStatsResponse {
    pub total: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub instance_id: String,
}

/// Outcome of clearing the log store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearLogsResponse {
    /// How many entries were removed
    pub cleared: usize,
    pub instance_id: String,
}

/// Result of fetching the shared sink several times and comparing ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SingletonCheckResponse {
    /// True when every fetch returned the same identity
    pub consistent: bool,
    pub instance_ids: Vec<String>,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock business DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A user record (mocked, nothing is persisted).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    #[schema(example = "Nguyen Van An")]
    pub name: String,
    #[schema(example = "an.nguyen@example.com")]
    pub email: String,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A product record (mocked, nothing is persisted).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    #[schema(example = "Laptop Dell XPS 15")]
    pub name: String,
    /// Price in VND
    pub price: Decimal,
}
