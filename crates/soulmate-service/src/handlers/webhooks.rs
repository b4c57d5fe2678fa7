//! Stripe webhook intake.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use super::payments::record_purchase;
use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{verify_webhook_signature, WebhookEvent};

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the webhook was processed.
    pub received: bool,
}

/// Handle Stripe webhooks.
///
/// Completed sessions go through the same confirmation as
/// `/api/payment-success`, including the re-check with Stripe.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookResponse>, ApiError> {
    let secret = state
        .config
        .stripe_webhook_secret
        .as_deref()
        .ok_or_else(|| ApiError::Configuration("STRIPE_WEBHOOK_SECRET not set".into()))?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Validation("Missing Stripe signature".into()))?;

    verify_webhook_signature(secret, &body, signature).map_err(|e| {
        tracing::warn!(error = %e, "Invalid Stripe webhook signature");
        ApiError::Validation("Invalid webhook signature".into())
    })?;

    let event: WebhookEvent =
        serde_json::from_str(&body).map_err(|e| ApiError::Validation(e.to_string()))?;

    tracing::info!(
        event_type = %event.event_type,
        event_id = %event.id,
        "Received Stripe webhook"
    );

    match event.event_type.as_str() {
        "checkout.session.completed" | "checkout.session.async_payment_succeeded" => {
            let session_id = event
                .data
                .object
                .get("id")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| ApiError::Validation("Missing checkout session id".into()))?;

            match record_purchase(&state, session_id).await {
                Ok(_) => {}
                // Delayed payment methods complete the session before paying;
                // the async_payment_succeeded event follows.
                Err(ApiError::PaymentNotCompleted) => {
                    tracing::info!(session_id = %session_id, "Session completed without payment");
                }
                Err(e) => return Err(e),
            }
        }
        _ => {
            tracing::debug!(event_type = %event.event_type, "Unhandled Stripe event");
        }
    }

    Ok(Json(WebhookResponse { received: true }))
}
