//! Core domain types for the order lifecycle.
//!
//! An order moves along the fulfillment pipeline
//! Pending → Processing → Shipped → Delivered, with Cancelled reachable
//! from the two earliest stages. Payment tracking is an independent axis
//! owned by the payment processor; it gates the Shipped transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new `OrderId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a customer
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a new `CustomerId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an order in its fulfillment lifecycle
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been placed and is awaiting processing
    Pending,
    /// Order is being prepared for shipment
    Processing,
    /// Order has left the warehouse (carries a tracking number)
    Shipped,
    /// Order reached the customer (terminal)
    Delivered,
    /// Order was cancelled before shipping (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Every order status, in pipeline order
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Returns `true` for statuses that admit no further transition
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Status of the money movement for an order
///
/// This axis is owned by the payment processor; the order service records
/// what the processor reports and uses it only to gate shipping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment initiated but not yet settled
    Pending,
    /// Payment settled; the order may ship
    Confirmed,
    /// Payment attempt failed
    Failed,
    /// Payment was returned to the customer
    Refunded,
}

impl PaymentStatus {
    /// Every payment status
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Failed,
        Self::Refunded,
    ];
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Failed => write!(f, "Failed"),
            Self::Refunded => write!(f, "Refunded"),
        }
    }
}

/// Carrier-provided shipment identifier
///
/// Format policy (minimum length) is enforced by the transition validator
/// before one of these is constructed; the type itself only guarantees the
/// value is non-empty trimmed text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Creates a tracking number from already-validated text
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer purchase as held by the order service
///
/// Created `Pending`/`Pending` at checkout, mutated exclusively through
/// validated status transitions, never deleted. `version` increases on
/// every applied mutation and backs the repository's optimistic
/// concurrency check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier
    pub id: OrderId,
    /// Customer who placed the order
    pub customer_id: CustomerId,
    /// Current fulfillment status
    pub status: OrderStatus,
    /// Current payment status (processor-owned axis)
    pub payment_status: PaymentStatus,
    /// Tracking number, present once the order has shipped
    pub tracking_number: Option<TrackingNumber>,
    /// Mutation counter for optimistic concurrency
    pub version: u64,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// When the order was last mutated
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a freshly checked-out order: `Pending` status, `Pending`
    /// payment, no tracking number
    #[must_use]
    pub const fn new(id: OrderId, customer_id: CustomerId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            tracking_number: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` once the order is terminally settled
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn order_status_terminality() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn order_status_wire_form_is_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");

        let parsed: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn payment_status_wire_form_is_screaming_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        let parsed = serde_json::from_str::<OrderStatus>("\"ARCHIVED\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn new_order_starts_pending_on_both_axes() {
        let now = Utc::now();
        let order = Order::new(
            OrderId::new("order-1".to_string()),
            CustomerId::new("cust-1".to_string()),
            now,
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.tracking_number, None);
        assert_eq!(order.version, 0);
        assert!(!order.is_settled());
    }

    #[test]
    fn display_forms_are_human_readable() {
        assert_eq!(OrderStatus::Shipped.to_string(), "Shipped");
        assert_eq!(PaymentStatus::Refunded.to_string(), "Refunded");
    }
}
