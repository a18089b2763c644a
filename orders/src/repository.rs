//! Order persistence abstraction.
//!
//! The repository is the authority on stored orders and owns the
//! lost-update guard: every save carries the version the caller read, and
//! a mismatch means another admin settled the race first. The trait is
//! deliberately minimal - insert, load, compare-and-save - because orders
//! are never deleted, only terminally settled.

use crate::types::{Order, OrderId};
use futures::future::BoxFuture;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No order is stored under the given id.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// An order with the given id already exists.
    #[error("order already exists: {0}")]
    AlreadyExists(OrderId),

    /// Optimistic concurrency conflict: the caller read a version that is
    /// no longer current.
    ///
    /// This means another process mutated the order between the caller's
    /// read and its save. The caller should reload and re-validate.
    #[error("version conflict on order {order_id}: expected {expected}, found {actual}")]
    VersionConflict {
        /// The order where the conflict occurred.
        order_id: OrderId,
        /// The version the caller based its mutation on.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },
}

/// Storage abstraction for orders.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; handlers share one instance
/// behind an `Arc` and call it concurrently.
///
/// # Dyn Compatibility
///
/// Methods return boxed futures and take owned arguments so the trait can
/// be used as `Arc<dyn OrderRepository>`.
pub trait OrderRepository: Send + Sync {
    /// Stores a newly created order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::AlreadyExists`] if an order with the
    /// same id is already stored.
    fn insert(&self, order: Order) -> BoxFuture<'_, Result<(), RepositoryError>>;

    /// Loads the current snapshot of an order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no order is stored under
    /// the id.
    fn get(&self, id: OrderId) -> BoxFuture<'_, Result<Order, RepositoryError>>;

    /// Saves a mutated order, guarded by the version the caller read.
    ///
    /// `expected_version` is the `version` field of the snapshot the
    /// mutation was validated against, i.e. before the mutation bumped it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the order vanished, or
    /// [`RepositoryError::VersionConflict`] if the stored version no
    /// longer matches `expected_version`; the stored order is unchanged
    /// in both cases.
    fn save(
        &self,
        order: Order,
        expected_version: u64,
    ) -> BoxFuture<'_, Result<(), RepositoryError>>;
}

/// In-process repository backed by a `HashMap`.
///
/// The storefront keeps its working set in memory; the same
/// compare-and-save discipline applies as it would over a database row
/// lock, so handlers are written once against the trait.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: Order) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut orders = self.orders.write().await;
            if orders.contains_key(&order.id) {
                return Err(RepositoryError::AlreadyExists(order.id));
            }
            orders.insert(order.id.clone(), order);
            Ok(())
        })
    }

    fn get(&self, id: OrderId) -> BoxFuture<'_, Result<Order, RepositoryError>> {
        Box::pin(async move {
            let orders = self.orders.read().await;
            orders
                .get(&id)
                .cloned()
                .ok_or(RepositoryError::NotFound(id))
        })
    }

    fn save(
        &self,
        order: Order,
        expected_version: u64,
    ) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            let mut orders = self.orders.write().await;
            let stored = orders
                .get(&order.id)
                .ok_or_else(|| RepositoryError::NotFound(order.id.clone()))?;

            if stored.version != expected_version {
                return Err(RepositoryError::VersionConflict {
                    order_id: order.id.clone(),
                    expected: expected_version,
                    actual: stored.version,
                });
            }

            orders.insert(order.id.clone(), order);
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::{CustomerId, OrderStatus};
    use chrono::Utc;

    fn sample_order(id: &str) -> Order {
        Order::new(
            OrderId::new(id.to_string()),
            CustomerId::new("cust-1".to_string()),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let repo = InMemoryOrderRepository::new();
        let order = sample_order("order-1");

        repo.insert(order.clone()).await.unwrap();
        let loaded = repo.get(order.id.clone()).await.unwrap();

        assert_eq!(loaded, order);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let repo = InMemoryOrderRepository::new();
        let order = sample_order("order-1");

        repo.insert(order.clone()).await.unwrap();
        let err = repo.insert(order.clone()).await.unwrap_err();

        assert_eq!(err, RepositoryError::AlreadyExists(order.id));
    }

    #[tokio::test]
    async fn get_missing_order_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        let id = OrderId::new("order-missing".to_string());

        let err = repo.get(id.clone()).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound(id));
    }

    #[tokio::test]
    async fn save_with_current_version_applies() {
        let repo = InMemoryOrderRepository::new();
        let mut order = sample_order("order-1");
        repo.insert(order.clone()).await.unwrap();

        order.status = OrderStatus::Processing;
        order.version = 1;
        repo.save(order.clone(), 0).await.unwrap();

        let loaded = repo.get(order.id.clone()).await.unwrap();
        assert_eq!(loaded.status, OrderStatus::Processing);
        assert_eq!(loaded.version, 1);
    }

    #[tokio::test]
    async fn save_with_stale_version_conflicts_and_leaves_order_unchanged() {
        let repo = InMemoryOrderRepository::new();
        let order = sample_order("order-1");
        repo.insert(order.clone()).await.unwrap();

        // First admin wins the race
        let mut first = order.clone();
        first.status = OrderStatus::Processing;
        first.version = 1;
        repo.save(first, 0).await.unwrap();

        // Second admin saves against the version it read before the race
        let mut second = order.clone();
        second.status = OrderStatus::Cancelled;
        second.version = 1;
        let err = repo.save(second, 0).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::VersionConflict {
                order_id: order.id.clone(),
                expected: 0,
                actual: 1,
            }
        );

        let loaded = repo.get(order.id).await.unwrap();
        assert_eq!(loaded.status, OrderStatus::Processing);
    }
}
