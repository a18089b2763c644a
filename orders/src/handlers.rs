//! HTTP handlers for the order API.
//!
//! The server side of the mirrored validation: handlers load the current
//! order snapshot, run the same [`TransitionValidator`] the admin client
//! pre-validates with, and apply the resulting mutation under the
//! repository's version check. A request the client should have caught
//! locally gets the identical rejection here, as a `{code, message}` body.

use crate::error::AppError;
use crate::repository::OrderRepository;
use crate::transition::TransitionValidator;
use crate::types::{CustomerId, Order, OrderId, OrderStatus, PaymentStatus, TrackingNumber};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::environment::Clock;

/// Shared state for the order API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Order storage
    pub repository: Arc<dyn OrderRepository>,
    /// The one transition validator, shared with the admin client
    pub validator: TransitionValidator,
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates handler state around the given dependencies
    #[must_use]
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        validator: TransitionValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            validator,
            clock,
        }
    }
}

/// Request to create an order at checkout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateOrderRequest {
    /// Customer placing the order.
    pub customer_id: String,
}

/// Request to transition an order's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: OrderStatus,

    /// Tracking number, required when shipping.
    #[serde(default)]
    pub tracking_number: Option<String>,

    /// Version the caller validated against; omitted means "whatever is
    /// current", which forfeits stale-snapshot detection.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Request to record the processor-reported payment status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdatePaymentRequest {
    /// Payment status as reported by the processor.
    pub payment_status: PaymentStatus,
}

/// Response with the full order snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order ID.
    pub order_id: String,

    /// Customer ID.
    pub customer_id: String,

    /// Current fulfillment status.
    pub status: OrderStatus,

    /// Current payment status.
    pub payment_status: PaymentStatus,

    /// Tracking number, present once shipped.
    pub tracking_number: Option<String>,

    /// Version for optimistic concurrency.
    pub version: u64,

    /// Created timestamp (ISO 8601).
    pub created_at: DateTime<Utc>,

    /// Last-mutated timestamp (ISO 8601).
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id.as_str().to_string(),
            customer_id: order.customer_id.as_str().to_string(),
            status: order.status,
            payment_status: order.payment_status,
            tracking_number: order
                .tracking_number
                .as_ref()
                .map(|t| TrackingNumber::as_str(t).to_string()),
            version: order.version,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Create an order at checkout.
///
/// Orders start `PENDING` on both axes; everything after that goes
/// through validated transitions.
///
/// # Endpoint
///
/// ```text
/// POST /orders
/// Content-Type: application/json
///
/// {
///   "customer_id": "cust-123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "order_id": "order-abc123",
///   "status": "PENDING",
///   "payment_status": "PENDING",
///   "tracking_number": null,
///   "version": 0,
///   ...
/// }
/// ```
///
/// # Errors
///
/// Returns a conflict if the generated id collides, which indicates a
/// broken id source rather than a client mistake.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let order_id = OrderId::new(format!("order-{}", uuid::Uuid::new_v4()));
    let order = Order::new(
        order_id,
        CustomerId::new(request.customer_id),
        state.clock.now(),
    );

    state.repository.insert(order.clone()).await?;
    tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "order created");

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Get the current order snapshot.
///
/// # Endpoint
///
/// ```text
/// GET /orders/:id
/// ```
///
/// # Errors
///
/// Returns 404 when the order does not exist.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.repository.get(OrderId::new(order_id)).await?;
    Ok(Json(order.into()))
}

/// Transition an order's status.
///
/// The authoritative copy of the transition rules: unreachable targets,
/// unconfirmed payment and missing/short tracking numbers are rejected
/// with the same codes the admin client raises locally, so a stale
/// client sees no surprises beyond `VERSION_CONFLICT`.
///
/// # Endpoint
///
/// ```text
/// PUT /orders/:id/status
/// Content-Type: application/json
///
/// {
///   "status": "SHIPPED",
///   "tracking_number": "TRACK-123-456-789",
///   "expected_version": 1
/// }
/// ```
///
/// # Response
///
/// `200` with the updated order, or `4xx` with `{code, message}`:
///
/// ```json
/// {
///   "code": "PAYMENT_NOT_CONFIRMED",
///   "message": "order cannot ship while payment status is 'Pending'"
/// }
/// ```
///
/// # Errors
///
/// `404` unknown order, `409` `INVALID_TRANSITION` / `VERSION_CONFLICT`,
/// `422` for the shipping gates.
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let mut order = state.repository.get(OrderId::new(order_id)).await?;

    let expected_version = request.expected_version.unwrap_or(order.version);
    if expected_version != order.version {
        return Err(AppError::conflict(
            "VERSION_CONFLICT",
            format!(
                "order {} is at version {}, request validated against {}",
                order.id, order.version, expected_version
            ),
        ));
    }

    let change = state.validator.validate(
        &order,
        request.status,
        request.tracking_number.as_deref(),
    )?;

    change.apply(&mut order, state.clock.now());
    state.repository.save(order.clone(), expected_version).await?;

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        version = order.version,
        "order status transitioned"
    );

    Ok(Json(order.into()))
}

/// Record the processor-reported payment status.
///
/// The payment processor owns this axis; the order service records what
/// it is told and uses it only to gate shipping.
///
/// # Endpoint
///
/// ```text
/// PUT /orders/:id/payment
/// Content-Type: application/json
///
/// {
///   "payment_status": "CONFIRMED"
/// }
/// ```
///
/// # Errors
///
/// `404` unknown order, `409` when a concurrent mutation wins the save.
pub async fn update_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let mut order = state.repository.get(OrderId::new(order_id)).await?;
    let expected_version = order.version;

    if order.payment_status != request.payment_status {
        tracing::info!(
            order_id = %order.id,
            from = %order.payment_status,
            to = %request.payment_status,
            "payment status recorded"
        );
    }

    order.payment_status = request.payment_status;
    order.version += 1;
    order.updated_at = state.clock.now();
    state.repository.save(order.clone(), expected_version).await?;

    Ok(Json(order.into()))
}

/// Simple health check endpoint (for basic liveness).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
