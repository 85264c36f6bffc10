//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use paylab_types::domain::{LogEntry, LogLevel, PaymentReceipt, PaymentType};
use paylab_types::dto::{
    ClearLogsResponse, CreateUserRequest, FactoryDemoEntry, FactoryDemoResponse, FeeQuote,
    LogStatsResponse, LogsResponse, PaymentMethodInfo, ProcessPaymentRequest, Product,
    SingletonCheckResponse, User,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Process a payment
#[utoipa::path(
    post,
    path = "/api/payments/process",
    tag = "payments",
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment processed successfully", body = PaymentReceipt),
        (status = 400, description = "Rejected payment, unsupported payment type, or malformed request", body = PaymentReceipt)
    )
)]
async fn process_payment() {}

/// List supported payment methods
#[utoipa::path(
    get,
    path = "/api/payments/methods",
    tag = "payments",
    responses(
        (status = 200, description = "Catalog of supported methods", body = Vec<PaymentMethodInfo>)
    )
)]
async fn payment_methods() {}

/// Quote the transaction fee for a payment type and amount
#[utoipa::path(
    get,
    path = "/api/payments/fee",
    tag = "payments",
    params(
        ("payment_type" = String, Query, description = "Payment method discriminator or alias"),
        ("amount" = String, Query, description = "Amount to quote the fee for")
    ),
    responses(
        (status = 200, description = "Fee quote", body = FeeQuote),
        (status = 400, description = "Unsupported payment type")
    )
)]
async fn quote_fee() {}

/// Snapshot of the factory's creation statistics
#[utoipa::path(
    get,
    path = "/api/payments/statistics",
    tag = "payments",
    responses(
        (status = 200, description = "Creation counts per normalized discriminator")
    )
)]
async fn creation_statistics() {}

/// Reset the factory's creation statistics
#[utoipa::path(
    post,
    path = "/api/payments/statistics/reset",
    tag = "payments",
    responses(
        (status = 200, description = "Counters cleared")
    )
)]
async fn reset_statistics() {}

/// Construct one instance of every payment method
#[utoipa::path(
    get,
    path = "/api/payments/demo",
    tag = "payments",
    responses(
        (status = 200, description = "One fresh instance per method with sample fees", body = FactoryDemoResponse)
    )
)]
async fn factory_demo() {}

/// All retained log entries
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "logs",
    responses(
        (status = 200, description = "Snapshot of every retained entry", body = LogsResponse)
    )
)]
async fn list_logs() {}

/// Log entries at one level
#[utoipa::path(
    get,
    path = "/api/logs/level/{level}",
    tag = "logs",
    params(
        ("level" = String, Path, description = "INFO, WARNING or ERROR (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Entries at the given level", body = LogsResponse)
    )
)]
async fn logs_by_level() {}

/// Per-level log totals
#[utoipa::path(
    get,
    path = "/api/logs/stats",
    tag = "logs",
    responses(
        (status = 200, description = "Totals per level", body = LogStatsResponse)
    )
)]
async fn log_stats() {}

/// Clear the retained log entries
#[utoipa::path(
    delete,
    path = "/api/logs",
    tag = "logs",
    responses(
        (status = 200, description = "Entries removed", body = ClearLogsResponse)
    )
)]
async fn clear_logs() {}

/// Verify the log sink is shared
#[utoipa::path(
    get,
    path = "/api/logs/verify-singleton",
    tag = "logs",
    responses(
        (status = 200, description = "Identity comparison across repeated accesses", body = SingletonCheckResponse)
    )
)]
async fn verify_singleton() {}

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Mocked user list", body = Vec<User>)
    )
)]
async fn list_users() {}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "User not found")
    )
)]
async fn get_user() {}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Empty name")
    )
)]
async fn create_user() {}

/// List products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Mocked product list", body = Vec<Product>)
    )
)]
async fn list_products() {}

/// Search products
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "products",
    params(
        ("keyword" = String, Query, description = "Substring to match against product names")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Empty keyword")
    )
)]
async fn search_products() {}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Invalid id")
    )
)]
async fn delete_product() {}

/// OpenAPI documentation for the payment demo API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paylab Payment Demo API",
        version = "1.0.0",
        description = "A payment-method demo service: a process-wide queryable log sink, a payment method factory with per-method validation and fees, and mocked user/product endpoints.",
        license(name = "MIT"),
    ),
    paths(
        health,
        process_payment,
        payment_methods,
        quote_fee,
        creation_statistics,
        reset_statistics,
        factory_demo,
        list_logs,
        logs_by_level,
        log_stats,
        clear_logs,
        verify_singleton,
        list_users,
        get_user,
        create_user,
        list_products,
        search_products,
        delete_product,
    ),
    components(
        schemas(
            ProcessPaymentRequest,
            PaymentReceipt,
            PaymentType,
            PaymentMethodInfo,
            FeeQuote,
            FactoryDemoEntry,
            FactoryDemoResponse,
            LogEntry,
            LogLevel,
            LogsResponse,
            LogStatsResponse,
            ClearLogsResponse,
            SingletonCheckResponse,
            User,
            CreateUserRequest,
            Product,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment processing through the method factory"),
        (name = "logs", description = "Shared log sink inspection"),
        (name = "users", description = "Mocked user management"),
        (name = "products", description = "Mocked product management"),
    )
)]
pub struct ApiDoc;
