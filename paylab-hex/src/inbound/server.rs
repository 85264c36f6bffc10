//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::sink::LogSink;
use crate::PaymentService;

/// HTTP Server for the payment demo API.
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/payments/process", post(handlers::process_payment))
            .route("/api/payments/methods", get(handlers::payment_methods))
            .route("/api/payments/fee", get(handlers::quote_fee))
            .route("/api/payments/statistics", get(handlers::creation_statistics))
            .route("/api/payments/statistics/reset", post(handlers::reset_statistics))
            .route("/api/payments/demo", get(handlers::factory_demo))
            .route("/api/logs", get(handlers::list_logs).delete(handlers::clear_logs))
            .route("/api/logs/level/{level}", get(handlers::logs_by_level))
            .route("/api/logs/stats", get(handlers::log_stats))
            .route("/api/logs/verify-singleton", get(handlers::verify_singleton))
            .route("/api/users", get(handlers::list_users).post(handlers::create_user))
            .route("/api/users/{id}", get(handlers::get_user))
            .route("/api/products", get(handlers::list_products))
            .route("/api/products/search", get(handlers::search_products))
            .route("/api/products/{id}", delete(handlers::delete_product))
            .merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Last line of defense: a panicking handler becomes a generic 500
/// instead of a dropped connection, and the panic is logged with its
/// payload.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!("request handler panicked: {detail}");
    LogSink::global().error(
        format!("unexpected failure while handling a request: {detail}"),
        "server",
    );

    let body = serde_json::json!({
        "error": "an unexpected error occurred while processing the request",
        "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
