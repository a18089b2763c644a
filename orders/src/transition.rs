//! Order status transition validation.
//!
//! This module centralizes the decision logic for the admin-side order
//! lifecycle: given the current order snapshot and a requested status, it
//! decides ACCEPT or REJECT and, on ACCEPT, describes exactly the mutation
//! the order record must apply. Both the HTTP handlers (server-side
//! authority) and the admin reducer (client-side pre-validation) consume
//! this one validator, so the two sides accept and reject identically.
//!
//! The state machine:
//!
//! ```text
//! Pending ──► Processing ──► Shipped ──► Delivered
//!    │             │            (requires Confirmed payment
//!    ▼             ▼             and a tracking number)
//! Cancelled ◄──────┘
//! ```
//!
//! Delivered and Cancelled are terminal: no further transition is
//! permitted, including re-requesting the current status.

use crate::types::{Order, OrderStatus, PaymentStatus, TrackingNumber};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Default minimum tracking-number length
///
/// The business minimum was never pinned down precisely, so it is a policy
/// knob rather than a hard-coded threshold; this default keeps obviously
/// truncated values like `"123"` out.
pub const DEFAULT_MIN_TRACKING_LENGTH: usize = 4;

/// Returns the set of statuses legally reachable from `current`
///
/// Terminal statuses return an empty slice.
#[must_use]
pub const fn allowed_next(current: OrderStatus) -> &'static [OrderStatus] {
    match current {
        OrderStatus::Pending => &[OrderStatus::Processing, OrderStatus::Cancelled],
        OrderStatus::Processing => &[OrderStatus::Shipped, OrderStatus::Cancelled],
        OrderStatus::Shipped => &[OrderStatus::Delivered],
        OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
}

/// Returns `true` if the UI must ask for explicit confirmation before
/// dispatching a transition to `requested`
///
/// This is a UX contract, not a data invariant: cancellation is the one
/// destructive transition an admin can reach from two different states, so
/// the interface confirms it before any request is issued.
#[must_use]
pub const fn requires_confirmation(requested: OrderStatus) -> bool {
    matches!(requested, OrderStatus::Cancelled)
}

/// Format policy for tracking numbers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackingPolicy {
    /// Minimum accepted length, counted after trimming whitespace
    pub min_length: usize,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_TRACKING_LENGTH,
        }
    }
}

/// A business-rule rejection of a requested status transition
///
/// These are expected outcomes reported synchronously to the caller, never
/// transient failures: retrying without changing the order is pointless,
/// and no side effect has occurred when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested status is unreachable from the current status
    #[error("order in status '{from}' cannot transition to '{to}'")]
    InvalidTransition {
        /// Status the order currently holds
        from: OrderStatus,
        /// Status that was requested
        to: OrderStatus,
    },

    /// Shipping was requested while payment is unconfirmed
    #[error("order cannot ship while payment status is '{payment}'")]
    PaymentNotConfirmed {
        /// Payment status the order currently holds
        payment: PaymentStatus,
    },

    /// Shipping was requested without a tracking number
    #[error("a tracking number is required to ship an order")]
    TrackingNumberRequired,

    /// The supplied tracking number fails the format policy
    #[error("tracking number '{value}' is invalid: minimum length is {min_length}")]
    TrackingNumberInvalid {
        /// The rejected value, as supplied (trimmed)
        value: String,
        /// The policy minimum in force
        min_length: usize,
    },
}

impl TransitionError {
    /// Machine-readable rejection code, stable across message rewording
    ///
    /// The backend returns this in its error body so the admin UI can
    /// match on it without parsing prose.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PaymentNotConfirmed { .. } => "PAYMENT_NOT_CONFIRMED",
            Self::TrackingNumberRequired => "TRACKING_NUMBER_REQUIRED",
            Self::TrackingNumberInvalid { .. } => "TRACKING_NUMBER_INVALID",
        }
    }
}

/// The mutation an accepted transition must apply to the order record
///
/// Returned by [`TransitionValidator::validate`] on ACCEPT; the caller
/// applies it atomically (the repository on the server side).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusChange {
    /// The status the order moves to
    pub status: OrderStatus,
    /// Tracking number to record, present exactly when `status` is Shipped
    pub tracking_number: Option<TrackingNumber>,
}

impl StatusChange {
    /// Applies this change to an order snapshot
    ///
    /// Bumps the optimistic-concurrency version and stamps `updated_at`.
    pub fn apply(&self, order: &mut Order, now: DateTime<Utc>) {
        order.status = self.status;
        if let Some(tracking) = &self.tracking_number {
            order.tracking_number = Some(tracking.clone());
        }
        order.version += 1;
        order.updated_at = now;
    }
}

/// Pure decision logic for order status transitions
///
/// Holds no state between calls: each invocation receives the full current
/// order snapshot, so concurrent callers need no coordination. Lost-update
/// protection between two admins editing the same order belongs to the
/// repository's version check, not here.
#[derive(Copy, Clone, Debug, Default)]
pub struct TransitionValidator {
    policy: TrackingPolicy,
}

impl TransitionValidator {
    /// Creates a validator with the given tracking-number policy
    #[must_use]
    pub const fn new(policy: TrackingPolicy) -> Self {
        Self { policy }
    }

    /// Decides whether `order` may transition to `requested`
    ///
    /// `tracking` is the raw tracking-number input, if any; it is only
    /// consulted when `requested` is [`OrderStatus::Shipped`].
    ///
    /// Rules, evaluated in order:
    ///
    /// 1. `requested` must be in the allowed-next set for the current
    ///    status, otherwise [`TransitionError::InvalidTransition`];
    /// 2. for `Shipped`: payment must be confirmed, and a tracking number
    ///    satisfying the policy must be supplied;
    /// 3. otherwise ACCEPT, returning the [`StatusChange`] to apply.
    ///
    /// # Errors
    ///
    /// Returns the [`TransitionError`] naming the first rule the request
    /// violates. Rejections have no side effects.
    pub fn validate(
        &self,
        order: &Order,
        requested: OrderStatus,
        tracking: Option<&str>,
    ) -> Result<StatusChange, TransitionError> {
        if !allowed_next(order.status).contains(&requested) {
            return Err(TransitionError::InvalidTransition {
                from: order.status,
                to: requested,
            });
        }

        let tracking_number = if requested == OrderStatus::Shipped {
            Some(self.validate_shipping(order, tracking)?)
        } else {
            None
        };

        Ok(StatusChange {
            status: requested,
            tracking_number,
        })
    }

    /// Checks the Shipped-specific gates: payment confirmation and the
    /// tracking-number policy
    fn validate_shipping(
        &self,
        order: &Order,
        tracking: Option<&str>,
    ) -> Result<TrackingNumber, TransitionError> {
        if order.payment_status != PaymentStatus::Confirmed {
            return Err(TransitionError::PaymentNotConfirmed {
                payment: order.payment_status,
            });
        }

        let trimmed = tracking.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(TransitionError::TrackingNumberRequired);
        }

        if trimmed.chars().count() < self.policy.min_length {
            return Err(TransitionError::TrackingNumberInvalid {
                value: trimmed.to_string(),
                min_length: self.policy.min_length,
            });
        }

        Ok(TrackingNumber::new(trimmed.to_string()))
    }
}
