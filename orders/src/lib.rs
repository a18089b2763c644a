//! Order lifecycle domain for the storefront.
//!
//! The centerpiece is the order status transition state machine,
//! implemented once in [`transition`] and consumed from both directions:
//!
//! 1. **Server-side authority**: the HTTP handlers ([`handlers`],
//!    [`router`]) validate every `PUT /orders/:id/status` against it and
//!    apply the resulting mutation under the repository's optimistic
//!    version check.
//! 2. **Client-side pre-validation**: the admin editing flow
//!    ([`reducer`]) runs the identical validator before any network
//!    request, so a doomed request is rejected immediately with the same
//!    code the server would have produced, and no call is made.
//!
//! The lifecycle itself:
//!
//! ```text
//! Pending ──► Processing ──► Shipped ──► Delivered
//!    │             │            (Confirmed payment + tracking required)
//!    ▼             ▼
//! Cancelled ◄──────┘
//! ```
//!
//! Delivered and Cancelled are terminal. The payment axis is recorded
//! from the processor and only ever gates shipping.
//!
//! # Example
//!
//! ```
//! use storefront_orders::transition::TransitionValidator;
//! use storefront_orders::types::{CustomerId, Order, OrderId, OrderStatus, PaymentStatus};
//! use chrono::Utc;
//!
//! let mut order = Order::new(
//!     OrderId::new("order-1".to_string()),
//!     CustomerId::new("cust-1".to_string()),
//!     Utc::now(),
//! );
//! order.status = OrderStatus::Processing;
//! order.payment_status = PaymentStatus::Confirmed;
//!
//! let validator = TransitionValidator::default();
//! let change = validator
//!     .validate(&order, OrderStatus::Shipped, Some("TRACK-123-456-789"))
//!     .unwrap();
//!
//! change.apply(&mut order, Utc::now());
//! assert_eq!(order.status, OrderStatus::Shipped);
//! ```

pub mod error;
pub mod handlers;
pub mod reducer;
pub mod repository;
pub mod router;
pub mod transition;
pub mod types;

// Re-export commonly used types
pub use reducer::{AdminOrderAction, AdminOrderEnvironment, AdminOrderReducer, AdminOrderState};
pub use transition::{StatusChange, TrackingPolicy, TransitionError, TransitionValidator};
pub use types::{CustomerId, Order, OrderId, OrderStatus, PaymentStatus, TrackingNumber};
