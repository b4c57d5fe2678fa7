//! Checkout intake.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use soulmate_core::{CheckoutMetadata, LeadForm};

use crate::error::ApiError;
use crate::state::AppState;

/// Create checkout session request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Lead fields, echoed into the session metadata.
    #[serde(flatten)]
    pub lead: LeadForm,
    /// Redirect after payment (defaults to the front-end success page).
    #[serde(default)]
    pub success_url: Option<String>,
    /// Redirect on cancel (defaults to the front-end cancel page).
    #[serde(default)]
    pub cancel_url: Option<String>,
}

/// Create checkout session response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Stripe checkout session URL.
    pub url: String,
}

/// Create a hosted checkout session carrying the lead as metadata.
///
/// Lead fields are not validated here; absent ones travel as empty strings.
/// Any failure, including an unreadable body, is a 500.
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable checkout body");
        ApiError::Internal("No data received".into())
    })?;

    let metadata = CheckoutMetadata::from_lead(&body.lead, Local::now().naive_local());

    let success_url = body
        .success_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| state.config.default_success_url());
    let cancel_url = body
        .cancel_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| state.config.default_cancel_url());

    let url = state
        .payments()?
        .create_session(
            body.lead.email.as_deref(),
            &metadata,
            &success_url,
            &cancel_url,
        )
        .await?;

    tracing::info!(
        email = %metadata.get("email"),
        "Checkout session created"
    );

    Ok(Json(CheckoutResponse { url }))
}
