//! Configuration and connectivity probe.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Which required settings are present.
#[derive(Debug, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct EnvVarStatus {
    /// Leads spreadsheet id.
    #[serde(rename = "GOOGLE_SHEET1_ID")]
    pub leads_sheet_id: bool,
    /// Purchases spreadsheet id.
    #[serde(rename = "GOOGLE_SHEET2_ID")]
    pub purchases_sheet_id: bool,
    /// Stripe secret key.
    #[serde(rename = "STRIPE_SECRET_KEY")]
    pub stripe_secret_key: bool,
    /// Stripe price reference.
    #[serde(rename = "STRIPE_PRICE_ID")]
    pub stripe_price_id: bool,
    /// Google service-account credentials.
    #[serde(rename = "GOOGLE_SERVICE_ACCOUNT_JSON")]
    pub google_service_account_json: bool,
}

/// Outcome of the leads sheet probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetsProbe {
    /// The leads tab was opened.
    Connected,
    /// Configured, but opening the leads tab failed.
    Failed,
    /// Sheet id or credentials missing.
    NotConfigured,
}

/// Probe response.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    /// Whether the leads sheet is reachable.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Presence of each required setting.
    pub env_vars: EnvVarStatus,
    /// Leads sheet connectivity.
    pub google_sheets: SheetsProbe,
}

/// Report configuration presence and try to open the leads tab.
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ProbeResponse>) {
    let config = &state.config;
    let env_vars = EnvVarStatus {
        leads_sheet_id: config.leads_sheet_id.is_some(),
        purchases_sheet_id: config.purchases_sheet_id.is_some(),
        stripe_secret_key: config.stripe_secret_key.is_some(),
        stripe_price_id: config.stripe_price_id.is_some(),
        google_service_account_json: config.google_service_account_json.is_some(),
    };

    tracing::info!(?env_vars, "Configuration probe");

    let (google_sheets, message) = match config.leads_sheet_id.as_deref() {
        Some(sheet_id) if env_vars.google_service_account_json => {
            let probe = match state.sheets() {
                Ok(sheets) => sheets
                    .check_tab(sheet_id, &config.leads_tab)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match probe {
                Ok(()) => (
                    SheetsProbe::Connected,
                    "Server is working correctly".to_string(),
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "Google Sheets connection failed");
                    (
                        SheetsProbe::Failed,
                        format!("Google Sheets connection failed: {e}"),
                    )
                }
            }
        }
        _ => (
            SheetsProbe::NotConfigured,
            "Missing Google Sheets configuration".to_string(),
        ),
    };

    let success = google_sheets == SheetsProbe::Connected;
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ProbeResponse {
            success,
            message,
            env_vars,
            google_sheets,
        }),
    )
}
