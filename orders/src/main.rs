//! Order API server.
//!
//! Serves the storefront's order lifecycle: checkout-time order creation,
//! admin status transitions validated by the central transition state
//! machine, and payment-status recording.
//!
//! # Usage
//!
//! ```bash
//! STOREFRONT_ADDR=0.0.0.0:3000 RUST_LOG=info cargo run --bin storefront-orders
//! ```
//!
//! # Example Requests
//!
//! ```bash
//! # Create an order (starts PENDING / PENDING)
//! curl -X POST http://localhost:3000/api/v1/orders \
//!   -H "Content-Type: application/json" \
//!   -d '{"customer_id": "cust-123"}'
//!
//! # Confirm payment
//! curl -X PUT http://localhost:3000/api/v1/orders/order-abc123/payment \
//!   -H "Content-Type: application/json" \
//!   -d '{"payment_status": "CONFIRMED"}'
//!
//! # Ship the order
//! curl -X PUT http://localhost:3000/api/v1/orders/order-abc123/status \
//!   -H "Content-Type: application/json" \
//!   -d '{"status": "SHIPPED", "tracking_number": "TRACK-123-456-789"}'
//! ```

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use storefront_core::environment::SystemClock;
use storefront_orders::handlers::{AppState, health_check};
use storefront_orders::repository::InMemoryOrderRepository;
use storefront_orders::router::order_router;
use storefront_orders::transition::TransitionValidator;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("=== Storefront Order API Server ===");

    let state = AppState::new(
        Arc::new(InMemoryOrderRepository::new()),
        TransitionValidator::default(),
        Arc::new(SystemClock),
    );

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", order_router(state))
        .layer(TraceLayer::new_for_http());

    let addr =
        std::env::var("STOREFRONT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");
    info!("API Endpoints:");
    info!("  POST   /api/v1/orders             - Create order");
    info!("  GET    /api/v1/orders/:id         - Get order");
    info!("  PUT    /api/v1/orders/:id/status  - Transition status");
    info!("  PUT    /api/v1/orders/:id/payment - Record payment status");
    info!("  GET    /health                    - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
