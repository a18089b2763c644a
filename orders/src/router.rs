//! Order API HTTP router.
//!
//! Composes the order handlers into a single Axum router.

use crate::handlers::{self, AppState};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Create the order API router with all endpoints.
///
/// # Routes
///
/// - `POST /orders` - Create an order at checkout
/// - `GET /orders/:id` - Get the current order snapshot
/// - `PUT /orders/:id/status` - Transition the order's status
/// - `PUT /orders/:id/payment` - Record the processor-reported payment status
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(repository, TransitionValidator::default(), clock);
///
/// let app = Router::new()
///     .nest("/api/v1", order_router(state))
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn order_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/:id", get(handlers::get_order))
        .route("/orders/:id/status", put(handlers::update_status))
        .route("/orders/:id/payment", put(handlers::update_payment))
        .with_state(state)
}
