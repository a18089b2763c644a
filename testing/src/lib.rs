//! # Storefront Testing
//!
//! Testing utilities and fixtures for the storefront order-lifecycle
//! workspace.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (`FixedClock`,
//!   `MockOrderApi`)
//! - An `OrderBuilder` fixture for putting an order into any lifecycle
//!   position without walking the whole pipeline
//!
//! ## Example
//!
//! ```
//! use storefront_testing::OrderBuilder;
//! use storefront_orders::{OrderStatus, PaymentStatus};
//!
//! let order = OrderBuilder::new("order-1")
//!     .status(OrderStatus::Processing)
//!     .payment(PaymentStatus::Confirmed)
//!     .build();
//!
//! assert_eq!(order.status, OrderStatus::Processing);
//! ```

use chrono::{DateTime, Utc};
use storefront_core::environment::Clock;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use futures::future::BoxFuture;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, PoisonError};
    use storefront_orders::reducer::{ApiError, OrderApi, StatusUpdate};
    use storefront_orders::types::{Order, OrderId};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::FixedClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Scripted backend API for admin-reducer tests
    ///
    /// Responses are queued with [`push_ok`](Self::push_ok) /
    /// [`push_rejected`](Self::push_rejected) and consumed in order; an
    /// exhausted queue answers with a transport error, so a test that
    /// dispatches more calls than it scripted fails visibly. Every call
    /// is recorded for assertion.
    #[derive(Clone, Default)]
    pub struct MockOrderApi {
        inner: Arc<Mutex<MockOrderApiInner>>,
    }

    #[derive(Default)]
    struct MockOrderApiInner {
        responses: VecDeque<Result<Order, ApiError>>,
        calls: Vec<(OrderId, StatusUpdate)>,
    }

    impl MockOrderApi {
        /// Creates a mock with an empty script
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, MockOrderApiInner> {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Queues a successful response carrying the updated order
        pub fn push_ok(&self, order: Order) {
            self.lock().responses.push_back(Ok(order));
        }

        /// Queues a business-rule rejection
        pub fn push_rejected(&self, code: &str, message: &str) {
            self.lock().responses.push_back(Err(ApiError::Rejected {
                code: code.to_string(),
                message: message.to_string(),
            }));
        }

        /// Queues a transport failure
        pub fn push_transport_failure(&self, message: &str) {
            self.lock()
                .responses
                .push_back(Err(ApiError::Transport(message.to_string())));
        }

        /// Number of `update_status` calls received so far
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.lock().calls.len()
        }

        /// The payload of the most recent `update_status` call
        #[must_use]
        pub fn last_update(&self) -> Option<StatusUpdate> {
            self.lock().calls.last().map(|(_, update)| update.clone())
        }
    }

    impl OrderApi for MockOrderApi {
        fn update_status(
            &self,
            id: OrderId,
            update: StatusUpdate,
        ) -> BoxFuture<'static, Result<Order, ApiError>> {
            let response = {
                let mut inner = self.lock();
                inner.calls.push((id, update));
                inner.responses.pop_front()
            };

            Box::pin(async move {
                response.unwrap_or_else(|| {
                    Err(ApiError::Transport(
                        "MockOrderApi: no scripted response left".to_string(),
                    ))
                })
            })
        }
    }
}

/// Test fixtures and builders.
pub mod fixtures {
    use chrono::{DateTime, Utc};
    use storefront_core::environment::Clock;
    use storefront_orders::types::{
        CustomerId, Order, OrderId, OrderStatus, PaymentStatus, TrackingNumber,
    };

    /// Builder placing an order at an arbitrary lifecycle position
    ///
    /// Bypasses transition validation on purpose: tests need to stage
    /// "an order that is already Shipped" without replaying the pipeline.
    #[derive(Debug, Clone)]
    pub struct OrderBuilder {
        id: String,
        customer_id: String,
        status: OrderStatus,
        payment: PaymentStatus,
        tracking: Option<String>,
        version: u64,
        created_at: DateTime<Utc>,
    }

    impl OrderBuilder {
        /// Starts a builder for an order with the given id
        #[must_use]
        pub fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                customer_id: "cust-test".to_string(),
                status: OrderStatus::Pending,
                payment: PaymentStatus::Pending,
                tracking: None,
                version: 0,
                created_at: super::mocks::test_clock().now(),
            }
        }

        /// Sets the customer
        #[must_use]
        pub fn customer(mut self, customer_id: &str) -> Self {
            self.customer_id = customer_id.to_string();
            self
        }

        /// Sets the fulfillment status
        #[must_use]
        pub const fn status(mut self, status: OrderStatus) -> Self {
            self.status = status;
            self
        }

        /// Sets the payment status
        #[must_use]
        pub const fn payment(mut self, payment: PaymentStatus) -> Self {
            self.payment = payment;
            self
        }

        /// Sets a tracking number
        #[must_use]
        pub fn tracking(mut self, tracking: &str) -> Self {
            self.tracking = Some(tracking.to_string());
            self
        }

        /// Sets the version counter
        #[must_use]
        pub const fn version(mut self, version: u64) -> Self {
            self.version = version;
            self
        }

        /// Builds the order
        #[must_use]
        pub fn build(self) -> Order {
            let mut order = Order::new(
                OrderId::new(self.id),
                CustomerId::new(self.customer_id),
                self.created_at,
            );
            order.status = self.status;
            order.payment_status = self.payment;
            order.tracking_number = self.tracking.map(TrackingNumber::new);
            order.version = self.version;
            order
        }
    }
}

// Re-export commonly used items
pub use fixtures::OrderBuilder;
pub use mocks::{FixedClock, MockOrderApi, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_orders::types::{OrderStatus, PaymentStatus};

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn builder_places_orders_anywhere_in_the_lifecycle() {
        let order = OrderBuilder::new("order-9")
            .status(OrderStatus::Shipped)
            .payment(PaymentStatus::Confirmed)
            .tracking("TRACK-123-456-789")
            .version(2)
            .build();

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.payment_status, PaymentStatus::Confirmed);
        assert!(order.tracking_number.is_some());
        assert_eq!(order.version, 2);
    }

    #[test]
    fn exhausted_mock_api_answers_with_transport_error() {
        use storefront_orders::reducer::{OrderApi, StatusUpdate};
        use storefront_orders::types::OrderId;

        let api = MockOrderApi::new();
        let fut = api.update_status(
            OrderId::new("order-1".to_string()),
            StatusUpdate {
                status: OrderStatus::Processing,
                tracking_number: None,
                expected_version: 0,
            },
        );

        let result = futures::executor::block_on(fut);
        assert!(result.is_err());
        assert_eq!(api.call_count(), 1);
    }
}
