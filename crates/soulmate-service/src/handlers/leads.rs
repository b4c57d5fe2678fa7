//! Form intake.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;

use soulmate_core::{LeadForm, LeadRecord};

use super::SuccessResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Validate a lead and append it to the leads tab.
///
/// Duplicate submissions append duplicate rows.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadForm>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(form) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable form body");
        ApiError::Validation("No data received".into())
    })?;

    let record = LeadRecord::from_form(&form, Local::now().naive_local())?;

    let sheet_id = state.leads_sheet_id()?;
    state
        .sheets()?
        .append_row(sheet_id, &state.config.leads_tab, &record.to_row())
        .await?;

    tracing::info!(
        email = %record.email,
        sheet_id = %sheet_id,
        "Lead appended"
    );

    Ok(Json(SuccessResponse::new("Form submitted successfully")))
}
