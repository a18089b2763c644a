//! Admin order reducer tests.
//!
//! These run as integration tests rather than unit tests because they use
//! `storefront-testing`, which itself depends on `storefront-orders`: a
//! unit-test build links a second copy of the crate and its types would
//! not unify with the ones `MockOrderApi` implements against.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use chrono::Utc;
use std::sync::Arc;
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use storefront_orders::reducer::{
    AdminOrderAction, AdminOrderEnvironment, AdminOrderReducer, AdminOrderState,
};
use storefront_orders::types::{CustomerId, Order, OrderId, OrderStatus, PaymentStatus};
use storefront_testing::mocks::MockOrderApi;

fn loaded_state(status: OrderStatus, payment: PaymentStatus) -> AdminOrderState {
    let mut order = Order::new(
        OrderId::new("order-1".to_string()),
        CustomerId::new("cust-1".to_string()),
        Utc::now(),
    );
    order.status = status;
    order.payment_status = payment;

    AdminOrderState {
        order: Some(order),
        pending_confirmation: None,
        last_rejection: None,
    }
}

fn env_with(api: MockOrderApi) -> AdminOrderEnvironment {
    AdminOrderEnvironment::new(Arc::new(api))
}

#[test]
fn local_reject_produces_no_network_effect() {
    let api = MockOrderApi::new();
    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Delivered, PaymentStatus::Confirmed);

    let effects = reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Processing,
            tracking_number: None,
            confirmed: false,
        },
        &env,
    );

    assert!(effects.iter().all(Effect::is_none));
    assert_eq!(api.call_count(), 0);
    let rejection = state.last_rejection.unwrap();
    assert_eq!(rejection.code, "INVALID_TRANSITION");
    assert_eq!(
        state.order.unwrap().status,
        OrderStatus::Delivered,
        "snapshot must be untouched on reject"
    );
}

#[test]
fn unconfirmed_cancellation_is_parked() {
    let api = MockOrderApi::new();
    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Pending, PaymentStatus::Pending);

    let effects = reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Cancelled,
            tracking_number: None,
            confirmed: false,
        },
        &env,
    );

    assert!(effects.iter().all(Effect::is_none));
    assert_eq!(api.call_count(), 0);
    assert_eq!(state.pending_confirmation, Some(OrderStatus::Cancelled));
    assert!(state.last_rejection.is_none());
}

#[tokio::test]
async fn confirmed_cancellation_dispatches_and_applies() {
    let api = MockOrderApi::new();
    let mut cancelled = loaded_state(OrderStatus::Pending, PaymentStatus::Pending)
        .order
        .unwrap();
    cancelled.status = OrderStatus::Cancelled;
    cancelled.version = 1;
    api.push_ok(cancelled);

    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Pending, PaymentStatus::Pending);

    let mut effects = reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Cancelled,
            tracking_number: None,
            confirmed: true,
        },
        &env,
    );

    let feedback = match effects.remove(0) {
        Effect::Future(fut) => fut.await.unwrap(),
        Effect::None => unreachable!("expected a backend-call effect"),
    };
    reducer.reduce(&mut state, feedback, &env);

    assert_eq!(api.call_count(), 1);
    let update = api.last_update().unwrap();
    assert_eq!(update.status, OrderStatus::Cancelled);
    assert_eq!(update.expected_version, 0);

    assert_eq!(state.order.unwrap().status, OrderStatus::Cancelled);
    assert!(state.pending_confirmation.is_none());
    assert!(state.last_rejection.is_none());
}

#[tokio::test]
async fn ship_request_carries_the_validated_tracking_number() {
    let api = MockOrderApi::new();
    let mut shipped = loaded_state(OrderStatus::Processing, PaymentStatus::Confirmed)
        .order
        .unwrap();
    shipped.status = OrderStatus::Shipped;
    shipped.version = 1;
    api.push_ok(shipped);

    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Processing, PaymentStatus::Confirmed);

    let mut effects = reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Shipped,
            tracking_number: Some("  TRACK-123-456-789  ".to_string()),
            confirmed: false,
        },
        &env,
    );

    let feedback = match effects.remove(0) {
        Effect::Future(fut) => fut.await.unwrap(),
        Effect::None => unreachable!("expected a backend-call effect"),
    };
    reducer.reduce(&mut state, feedback, &env);

    let update = api.last_update().unwrap();
    assert_eq!(update.status, OrderStatus::Shipped);
    assert_eq!(
        update.tracking_number.as_deref(),
        Some("TRACK-123-456-789"),
        "tracking is trimmed before dispatch"
    );

    assert_eq!(state.order.unwrap().status, OrderStatus::Shipped);
}

#[tokio::test]
async fn backend_reject_on_stale_snapshot_is_resurfaced() {
    let api = MockOrderApi::new();
    api.push_rejected("VERSION_CONFLICT", "order changed under you");

    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Pending, PaymentStatus::Pending);

    let mut effects = reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Processing,
            tracking_number: None,
            confirmed: false,
        },
        &env,
    );

    let feedback = match effects.remove(0) {
        Effect::Future(fut) => fut.await.unwrap(),
        Effect::None => unreachable!("expected a backend-call effect"),
    };
    reducer.reduce(&mut state, feedback, &env);

    let rejection = state.last_rejection.unwrap();
    assert_eq!(rejection.code, "VERSION_CONFLICT");
    assert_eq!(
        state.order.unwrap().status,
        OrderStatus::Pending,
        "snapshot stays unchanged until a fresh load"
    );
}

#[test]
fn local_shipping_gate_mirrors_the_backend() {
    let api = MockOrderApi::new();
    let env = env_with(api.clone());
    let reducer = AdminOrderReducer::default();
    let mut state = loaded_state(OrderStatus::Processing, PaymentStatus::Pending);

    reducer.reduce(
        &mut state,
        AdminOrderAction::RequestTransition {
            requested: OrderStatus::Shipped,
            tracking_number: Some("TRACK-123-456-789".to_string()),
            confirmed: false,
        },
        &env,
    );

    assert_eq!(api.call_count(), 0);
    assert_eq!(
        state.last_rejection.unwrap().code,
        "PAYMENT_NOT_CONFIRMED"
    );
}
