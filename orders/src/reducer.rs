//! Admin-side order editing reducer.
//!
//! The admin interface pre-validates every status change with the same
//! [`TransitionValidator`] the backend enforces, so a request that the
//! backend would reject never leaves the client: a local REJECT records
//! the reason and produces no network effect. A local ACCEPT produces a
//! single effect invoking the backend, whose answer is fed back as an
//! action - including the backend-side rejection that can still happen
//! when the held snapshot has gone stale under another admin.

use crate::transition::{StatusChange, TransitionValidator, requires_confirmation};
use crate::types::{Order, OrderId, OrderStatus, TrackingNumber};
use futures::future::BoxFuture;
use std::sync::Arc;
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use thiserror::Error;

/// Payload for the backend status mutation (`PUT /orders/{id}/status`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Target status
    pub status: OrderStatus,
    /// Tracking number, present when shipping
    pub tracking_number: Option<String>,
    /// Version of the snapshot the change was validated against
    pub expected_version: u64,
}

/// Failure reported by the backend order API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend rejected the mutation on business rules
    ///
    /// Carries the machine-readable code and human-readable message from
    /// the error body. After a local ACCEPT this indicates the snapshot
    /// was stale when the request arrived.
    #[error("[{code}] {message}")]
    Rejected {
        /// Machine-readable rejection code
        code: String,
        /// Human-readable rejection message
        message: String,
    },

    /// The request never produced a business answer
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Backend order API as seen from the admin interface
///
/// # Dyn Compatibility
///
/// Methods return boxed futures and take owned arguments so the trait can
/// be injected as `Arc<dyn OrderApi>`.
pub trait OrderApi: Send + Sync {
    /// Issues the status mutation and returns the updated order
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the
    /// mutation, or [`ApiError::Transport`] when no answer was obtained.
    fn update_status(
        &self,
        id: OrderId,
        update: StatusUpdate,
    ) -> BoxFuture<'static, Result<Order, ApiError>>;
}

/// Dependencies for the admin order reducer
#[derive(Clone)]
pub struct AdminOrderEnvironment {
    /// Backend order API
    pub api: Arc<dyn OrderApi>,
}

impl AdminOrderEnvironment {
    /// Creates a new environment around the backend API
    #[must_use]
    pub fn new(api: Arc<dyn OrderApi>) -> Self {
        Self { api }
    }
}

/// A rejection surfaced to the admin, from either validation side
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    /// Machine-readable rejection code
    pub code: String,
    /// Human-readable message shown as the validation error
    pub message: String,
}

/// State of the admin order-editing screen
#[derive(Clone, Debug, Default)]
pub struct AdminOrderState {
    /// Snapshot of the order being edited (None until loaded)
    pub order: Option<Order>,
    /// Transition parked awaiting the admin's explicit confirmation
    pub pending_confirmation: Option<OrderStatus>,
    /// Last rejection, shown as a validation message
    pub last_rejection: Option<Rejection>,
}

impl AdminOrderState {
    /// Creates an empty editing state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Actions for the admin order-editing flow
#[derive(Clone, Debug)]
pub enum AdminOrderAction {
    /// A fresh order snapshot arrived from the backend
    OrderLoaded {
        /// The snapshot to edit against
        order: Order,
    },

    /// The admin requested a status transition
    RequestTransition {
        /// Target status
        requested: OrderStatus,
        /// Raw tracking-number input, if the form has one
        tracking_number: Option<String>,
        /// Whether the admin has confirmed a transition that requires it
        confirmed: bool,
    },

    /// Feedback: the backend applied the mutation
    TransitionAccepted {
        /// The updated order returned by the backend
        order: Order,
    },

    /// Feedback: the backend rejected the mutation (stale snapshot path)
    TransitionRejected {
        /// Machine-readable rejection code
        code: String,
        /// Human-readable rejection message
        message: String,
    },
}

/// Reducer for the admin order-editing flow
///
/// Pure and synchronous: every invocation receives the full current
/// snapshot, so concurrent admin sessions need no coordination here. The
/// lost-update race between two admins on the same order is settled by
/// the backend's version check, and its rejection flows back through
/// [`AdminOrderAction::TransitionRejected`].
#[derive(Clone, Debug, Default)]
pub struct AdminOrderReducer {
    validator: TransitionValidator,
}

impl AdminOrderReducer {
    /// Creates a reducer sharing the given validator configuration
    #[must_use]
    pub const fn new(validator: TransitionValidator) -> Self {
        Self { validator }
    }

    /// Builds the backend-call effect for a locally accepted change
    fn dispatch_effect(
        api: Arc<dyn OrderApi>,
        id: OrderId,
        change: &StatusChange,
        expected_version: u64,
    ) -> Effect<AdminOrderAction> {
        let update = StatusUpdate {
            status: change.status,
            tracking_number: change
                .tracking_number
                .as_ref()
                .map(|t| TrackingNumber::as_str(t).to_string()),
            expected_version,
        };

        Effect::future(async move {
            match api.update_status(id, update).await {
                Ok(order) => Some(AdminOrderAction::TransitionAccepted { order }),
                Err(ApiError::Rejected { code, message }) => {
                    Some(AdminOrderAction::TransitionRejected { code, message })
                },
                Err(ApiError::Transport(message)) => Some(AdminOrderAction::TransitionRejected {
                    code: "TRANSPORT".to_string(),
                    message,
                }),
            }
        })
    }
}

impl Reducer for AdminOrderReducer {
    type State = AdminOrderState;
    type Action = AdminOrderAction;
    type Environment = AdminOrderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            AdminOrderAction::OrderLoaded { order } => {
                state.order = Some(order);
                state.pending_confirmation = None;
                state.last_rejection = None;
                vec![Effect::None]
            },

            AdminOrderAction::RequestTransition {
                requested,
                tracking_number,
                confirmed,
            } => {
                let Some(order) = state.order.as_ref() else {
                    // Caller bug: the screen dispatched before loading
                    tracing::error!("RequestTransition dispatched with no order loaded");
                    debug_assert!(false, "RequestTransition requires a loaded order");
                    return vec![Effect::None];
                };

                let change =
                    match self
                        .validator
                        .validate(order, requested, tracking_number.as_deref())
                    {
                        Ok(change) => change,
                        Err(error) => {
                            tracing::warn!(
                                order_id = %order.id,
                                code = error.code(),
                                "transition rejected locally: {error}"
                            );
                            state.last_rejection = Some(Rejection {
                                code: error.code().to_string(),
                                message: error.to_string(),
                            });
                            return vec![Effect::None];
                        },
                    };

                if requires_confirmation(requested) && !confirmed {
                    // Park the request; the UI re-dispatches with
                    // confirmed = true once the admin agrees
                    state.pending_confirmation = Some(requested);
                    return vec![Effect::None];
                }

                state.pending_confirmation = None;
                state.last_rejection = None;

                vec![Self::dispatch_effect(
                    Arc::clone(&env.api),
                    order.id.clone(),
                    &change,
                    order.version,
                )]
            },

            AdminOrderAction::TransitionAccepted { order } => {
                tracing::info!(order_id = %order.id, status = %order.status, "transition applied");
                state.order = Some(order);
                state.last_rejection = None;
                vec![Effect::None]
            },

            AdminOrderAction::TransitionRejected { code, message } => {
                tracing::warn!(code = %code, "transition rejected by backend: {message}");
                state.last_rejection = Some(Rejection { code, message });
                vec![Effect::None]
            },
        }
    }
}

// The reducer's behavioral tests live in `tests/reducer.rs`: they use
// `storefront-testing`, whose dev-dependency cycle back onto this crate
// would give a unit-test build two non-unifying copies of our types.
