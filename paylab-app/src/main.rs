//! # Paylab Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the tracing subscriber
//! - Touch the shared log sink so its identity is visible at startup
//! - Create the payment service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paylab_hex::{LogSink, PaymentService, inbound::HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paylab_app=debug,paylab_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    // First access constructs the shared sink; every later access
    // returns the same instance
    let sink = LogSink::global();
    sink.info("===== application starting =====", "main");
    sink.info(format!("log sink instance {}", sink.instance_id()), "main");

    tracing::info!("Starting paylab server on port {}", config.port);

    // Create the payment service (one shared factory, process-wide
    // creation statistics)
    let service = PaymentService::new();

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);
    sink.info(format!("listening on {addr}"), "main");

    server.run(&addr).await?;

    Ok(())
}
