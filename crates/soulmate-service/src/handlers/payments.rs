//! Payment confirmation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use soulmate_core::PurchaseRecord;

use super::SuccessResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Payment success request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    /// Checkout session to confirm.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Confirm a session's payment and append the purchase row.
///
/// There is no record of sessions already logged, so calling this twice for
/// one paid session appends two rows.
pub async fn payment_success(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PaymentSuccessRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable payment body");
        ApiError::Validation("No data received".into())
    })?;

    let session_id = body
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing sessionId".into()))?;

    record_purchase(&state, &session_id).await?;

    Ok(Json(SuccessResponse::new("Payment processed successfully")))
}

/// Re-check `session_id` with Stripe and, if paid, append it to the purchases tab.
pub(crate) async fn record_purchase(
    state: &AppState,
    session_id: &str,
) -> Result<PurchaseRecord, ApiError> {
    let session = state.payments()?.get_session(session_id).await?;

    if !session.is_paid() {
        tracing::warn!(
            session_id = %session_id,
            payment_status = %session.payment_status,
            "Checkout session not paid"
        );
        return Err(ApiError::PaymentNotCompleted);
    }

    let record =
        PurchaseRecord::from_metadata(&session.id, &session.metadata, Local::now().naive_local());

    let sheet_id = state.purchases_sheet_id()?;
    state
        .sheets()?
        .append_row(sheet_id, &state.config.purchases_tab, &record.to_row())
        .await?;

    tracing::info!(
        session_id = %record.session_id,
        email = %record.email,
        "Purchase appended"
    );

    Ok(record)
}
