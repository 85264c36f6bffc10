//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;

use paylab_types::{
    AppError, ClearLogsResponse, CreateUserRequest, LogStatsResponse, LogsResponse, PaymentType,
    ProcessPaymentRequest, Product, SingletonCheckResponse, User,
};

use crate::sink::LogSink;
use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState {
    pub service: PaymentService,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UnsupportedPaymentType { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            AppError::Internal(detail) => {
                // the detail stays in the logs; the client gets a
                // generic message
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred while processing the request".to_string(),
                )
            }
        };

        let mut body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });
        if matches!(self.0, AppError::UnsupportedPaymentType { .. }) {
            body["supported_methods"] =
                serde_json::json!(PaymentType::ALL.map(|t| t.to_string()));
        }

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.service.sink().info("health check called", "health");
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "log_instance_id": state.service.sink().instance_id(),
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Process a payment through the method its discriminator resolves to.
#[tracing::instrument(skip(state, req), fields(payment_type = %req.payment_type, order_id = %req.order_id))]
pub async fn process_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state.service.process(req).await?;

    // a rejected payment is a client problem, not a server fault
    let status = if receipt.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(receipt)))
}

/// List the supported payment methods with their constraints and fees.
#[tracing::instrument(skip(state))]
pub async fn payment_methods(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state
        .service
        .sink()
        .info("payment method catalog requested", "payments.methods");
    Json(state.service.method_catalog())
}

#[derive(Debug, Deserialize)]
pub struct FeeQuery {
    pub payment_type: String,
    pub amount: Decimal,
}

/// Quote the transaction fee for a payment type and amount.
#[tracing::instrument(skip(state), fields(payment_type = %query.payment_type, amount = %query.amount))]
pub async fn quote_fee(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.service.quote_fee(&query.payment_type, query.amount)?;
    Ok(Json(quote))
}

/// Snapshot of the factory's creation statistics.
#[tracing::instrument(skip(state))]
pub async fn creation_statistics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state
        .service
        .sink()
        .info("creation statistics requested", "payments.statistics");
    Json(state.service.creation_statistics())
}

/// Reset the factory's creation statistics.
#[tracing::instrument(skip(state))]
pub async fn reset_statistics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.service.reset_statistics();
    Json(serde_json::json!({ "reset": true }))
}

/// Construct one instance of every method to show the factory at work.
#[tracing::instrument(skip(state))]
pub async fn factory_demo(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let demo = state.service.demo_factory()?;
    Ok(Json(demo))
}

// ─────────────────────────────────────────────────────────────────────────────
// Logs
// ─────────────────────────────────────────────────────────────────────────────

/// All retained log entries.
#[tracing::instrument(skip(state))]
pub async fn list_logs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.info("fetching all log entries", "logs.list");

    let entries = sink.all();
    Json(LogsResponse {
        total: entries.len(),
        instance_id: sink.instance_id().to_string(),
        entries,
    })
}

/// Log entries at one level (case-insensitive).
#[tracing::instrument(skip(state))]
pub async fn logs_by_level(
    State(state): State<Arc<AppState>>,
    Path(level): Path<String>,
) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.info(format!("fetching log entries at level {level}"), "logs.by_level");

    let entries = sink.by_level(&level);
    Json(LogsResponse {
        total: entries.len(),
        instance_id: sink.instance_id().to_string(),
        entries,
    })
}

/// Per-level totals.
#[tracing::instrument(skip(state))]
pub async fn log_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.info("fetching log statistics", "logs.stats");

    Json(LogStatsResponse {
        total: sink.count(),
        info: sink.by_level("INFO").len(),
        warning: sink.by_level("WARNING").len(),
        error: sink.by_level("ERROR").len(),
        instance_id: sink.instance_id().to_string(),
    })
}

/// Drop every retained log entry.
#[tracing::instrument(skip(state))]
pub async fn clear_logs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.warning("clearing all log entries", "logs.clear");

    let cleared = sink.clear();
    Json(ClearLogsResponse {
        cleared,
        instance_id: sink.instance_id().to_string(),
    })
}

/// Fetch the shared sink several times and check every handle has the
/// same identity.
#[tracing::instrument(skip(state))]
pub async fn verify_singleton(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();

    let mut instance_ids: Vec<String> = (0..3)
        .map(|_| LogSink::global().instance_id().to_string())
        .collect();
    instance_ids.push(sink.instance_id().to_string());

    let consistent = instance_ids.windows(2).all(|pair| pair[0] == pair[1]);
    sink.info(format!("singleton check: consistent = {consistent}"), "logs.verify");

    Json(SingletonCheckResponse {
        consistent,
        instance_ids,
        message: if consistent {
            "every access returned the same shared instance".to_string()
        } else {
            "instance identities diverged - the sink is not shared".to_string()
        },
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Users (mocked)
// ─────────────────────────────────────────────────────────────────────────────

fn mock_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Nguyen Van An".to_string(),
            email: "an.nguyen@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Tran Thi Binh".to_string(),
            email: "binh.tran@example.com".to_string(),
        },
        User {
            id: 3,
            name: "Le Van Cuong".to_string(),
            email: "cuong.le@example.com".to_string(),
        },
    ]
}

/// List users.
#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.info("fetching user list", "users.list");

    let users = mock_users();
    sink.info(format!("fetched {} users", users.len()), "users.list");
    Json(users)
}

/// Get a user by id.
#[tracing::instrument(skip(state), fields(user_id = id))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sink = state.service.sink();
    sink.info(format!("looking up user {id}"), "users.get");

    if id <= 0 {
        sink.warning(format!("invalid user id: {id}"), "users.get");
        return Err(AppError::BadRequest("id must be greater than zero".into()).into());
    }
    if id > 10 {
        sink.error(format!("user {id} not found"), "users.get");
        return Err(AppError::NotFound(format!("user {id}")).into());
    }

    Ok(Json(User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
    }))
}

/// Create a user.
#[tracing::instrument(skip(state, req), fields(name = %req.name))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sink = state.service.sink();
    sink.info(format!("creating user '{}'", req.name), "users.create");

    if req.name.trim().is_empty() {
        sink.error("user name must not be empty", "users.create");
        return Err(AppError::BadRequest("name must not be empty".into()).into());
    }

    let user = User {
        id: rand::rng().random_range(100..1000),
        name: req.name,
        email: req.email,
    };
    sink.info(format!("created user {}", user.id), "users.create");

    let location = [(header::LOCATION, format!("/api/users/{}", user.id))];
    Ok((StatusCode::CREATED, location, Json(user)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Products (mocked)
// ─────────────────────────────────────────────────────────────────────────────

fn mock_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Laptop Dell XPS 15".to_string(),
            price: Decimal::from(35_000_000_i64),
        },
        Product {
            id: 2,
            name: "iPhone 15 Pro Max".to_string(),
            price: Decimal::from(30_000_000_i64),
        },
        Product {
            id: 3,
            name: "Samsung Galaxy S24".to_string(),
            price: Decimal::from(25_000_000_i64),
        },
    ]
}

/// List products.
#[tracing::instrument(skip(state))]
pub async fn list_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sink = state.service.sink();
    sink.info("fetching product list", "products.list");

    let products = mock_products();
    sink.info(format!("fetched {} products", products.len()), "products.list");
    Json(products)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

/// Search products by keyword.
#[tracing::instrument(skip(state), fields(keyword = %query.keyword))]
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sink = state.service.sink();
    sink.info(format!("searching products for '{}'", query.keyword), "products.search");

    if query.keyword.trim().is_empty() {
        sink.warning("empty search keyword", "products.search");
        return Err(AppError::BadRequest("keyword must not be empty".into()).into());
    }

    let keyword = query.keyword.to_lowercase();
    let results: Vec<Product> = mock_products()
        .into_iter()
        .filter(|product| product.name.to_lowercase().contains(&keyword))
        .collect();

    sink.info(format!("found {} products", results.len()), "products.search");
    Ok(Json(results))
}

/// Delete a product by id.
#[tracing::instrument(skip(state), fields(product_id = id))]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let sink = state.service.sink();
    sink.warning(format!("deleting product {id}"), "products.delete");

    if id <= 0 {
        sink.error(format!("invalid product id for delete: {id}"), "products.delete");
        return Err(AppError::BadRequest("id must be greater than zero".into()).into());
    }

    sink.info(format!("product {id} deleted"), "products.delete");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
