//! Checkout and subscription lifecycle handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use rzp_subs_core::{IdError, OrderId, SubscriptionId};

use crate::error::ApiError;
use crate::state::AppState;

/// Subscription created for an order.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    /// Gateway subscription id.
    pub subscription_id: String,
    /// Gateway plan id.
    pub plan_id: String,
    /// Whether a new gateway plan was created for this checkout.
    pub plan_created: bool,
}

/// Amount shown to the buyer at checkout.
#[derive(Debug, Serialize)]
pub struct DisplayAmountResponse {
    /// Recurring total plus sign-up fee, as a decimal string.
    pub amount: Decimal,
    /// Store currency.
    pub currency: String,
}

/// Cancellation result.
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    /// Always true on success.
    pub cancelled: bool,
}

/// Create the gateway subscription for an order.
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let order_id = parse_order_id(&order_id)?;

    let created = state.subscriptions.create_subscription(order_id).await?;

    Ok(Json(SubscriptionResponse {
        subscription_id: created.subscription_id.into(),
        plan_id: created.plan_id.into(),
        plan_created: created.plan_created,
    }))
}

/// Amount to display for an order at checkout.
pub async fn display_amount(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<DisplayAmountResponse>, ApiError> {
    let order_id = parse_order_id(&order_id)?;

    let display = state.subscriptions.display_amount(order_id).await?;

    Ok(Json(DisplayAmountResponse {
        amount: display.amount,
        currency: display.currency,
    }))
}

/// Cancel a gateway subscription.
pub async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
    Path(subscription_id): Path<String>,
) -> Result<Json<CancelResponse>, ApiError> {
    let subscription_id: SubscriptionId = subscription_id
        .parse()
        .map_err(|e: IdError| ApiError::BadRequest(e.to_string()))?;

    state
        .subscriptions
        .cancel_subscription(&subscription_id)
        .await?;

    Ok(Json(CancelResponse { cancelled: true }))
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|e: IdError| ApiError::BadRequest(e.to_string()))
}
