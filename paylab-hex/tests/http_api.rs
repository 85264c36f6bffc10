//! Router integration tests.
//!
//! These drive the full Axum router in-process. They share the global
//! log sink, so log assertions check shape and consistency rather than
//! exact counts.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use paylab_hex::inbound::HttpServer;
use paylab_hex::PaymentService;
use paylab_types::{FeeQuote, LogsResponse, PaymentReceipt, SingletonCheckResponse};

fn router() -> Router {
    HttpServer::new(PaymentService::new()).router()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("valid json body")
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn health_reports_the_sink_identity() {
    let response = router().oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["log_instance_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test(start_paused = true)]
async fn process_cash_payment_succeeds() {
    let request = post_json(
        "/api/payments/process",
        serde_json::json!({
            "payment_type": "cash ",
            "amount": 50000,
            "order_id": "ORD-IT-1",
            "additional_data": { "Cashier": "Binh" }
        }),
    );
    let response = router().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let receipt: PaymentReceipt =
        serde_json::from_value(body_json(response).await).expect("receipt");
    assert!(receipt.success);
    assert_eq!(receipt.payment_type.to_string(), "CASH");
    assert_eq!(receipt.transaction_fee, dec!(0));
    assert!(receipt.transaction_id.is_some_and(|id| id.starts_with("CASH-")));
    assert_eq!(receipt.additional_info["Cashier"], "Binh");
}

#[tokio::test(start_paused = true)]
async fn rejected_payment_returns_the_failure_receipt() {
    // PayPal without an email: the method rejects, nothing is raised
    let request = post_json(
        "/api/payments/process",
        serde_json::json!({
            "payment_type": "PAYPAL",
            "amount": 50,
            "order_id": "ORD-IT-2"
        }),
    );
    let response = router().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let receipt: PaymentReceipt =
        serde_json::from_value(body_json(response).await).expect("receipt");
    assert!(!receipt.success);
    assert!(receipt.transaction_id.is_none());
}

#[tokio::test]
async fn unsupported_type_lists_the_supported_methods() {
    let request = post_json(
        "/api/payments/process",
        serde_json::json!({
            "payment_type": "BITCOIN",
            "amount": 100,
            "order_id": "ORD-IT-3"
        }),
    );
    let response = router().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|msg| msg.contains("BITCOIN")));
    assert_eq!(
        body["supported_methods"],
        serde_json::json!(["CASH", "PAYPAL", "VNPAY"])
    );
}

#[tokio::test]
async fn fee_endpoint_quotes_paypal() {
    let response = router()
        .oneshot(get("/api/payments/fee?payment_type=PAYPAL&amount=50"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let quote: FeeQuote = serde_json::from_value(body_json(response).await).expect("quote");
    assert_eq!(quote.transaction_fee, dec!(2.00));
    assert_eq!(quote.total_amount, dec!(52.00));
}

#[tokio::test]
async fn methods_catalog_covers_all_three() {
    let response = router().oneshot(get("/api/payments/methods")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let types: Vec<_> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["payment_type"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(types, vec!["CASH", "PAYPAL", "VNPAY"]);
}

#[tokio::test]
async fn logs_reflect_writes_and_share_one_identity() {
    let app = router();

    // drive at least one write through the sink
    let _ = app
        .clone()
        .oneshot(get("/api/users"))
        .await
        .expect("response");

    let response = app.clone().oneshot(get("/api/logs")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let logs: LogsResponse = serde_json::from_value(body_json(response).await).expect("logs");
    assert!(logs.total >= 1);
    assert_eq!(logs.total, logs.entries.len());

    // level filter only returns that level, regardless of case
    let response = app.clone().oneshot(get("/api/logs/level/info")).await.expect("response");
    let info_logs: LogsResponse =
        serde_json::from_value(body_json(response).await).expect("logs");
    assert!(info_logs.entries.iter().all(|e| e.level.to_string() == "INFO"));
    assert_eq!(info_logs.instance_id, logs.instance_id);
}

#[tokio::test]
async fn singleton_check_is_consistent() {
    let response = router()
        .oneshot(get("/api/logs/verify-singleton"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let check: SingletonCheckResponse =
        serde_json::from_value(body_json(response).await).expect("check");
    assert!(check.consistent);
    assert!(check.instance_ids.len() >= 2);
}

#[tokio::test]
async fn user_lookup_validates_the_id() {
    let app = router();

    let ok = app.clone().oneshot(get("/api/users/3")).await.expect("response");
    assert_eq!(ok.status(), StatusCode::OK);

    let bad = app.clone().oneshot(get("/api/users/0")).await.expect("response");
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let missing = app.clone().oneshot(get("/api/users/11")).await.expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_search_requires_a_keyword() {
    let app = router();

    let bad = app
        .clone()
        .oneshot(get("/api/products/search?keyword="))
        .await
        .expect("response");
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let ok = app
        .clone()
        .oneshot(get("/api/products/search?keyword=laptop"))
        .await
        .expect("response");
    assert_eq!(ok.status(), StatusCode::OK);
    let results = body_json(ok).await;
    assert_eq!(results.as_array().map(Vec::len), Some(1));
}
