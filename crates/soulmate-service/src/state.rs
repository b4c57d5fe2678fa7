//! Application state.

use std::sync::Arc;

use soulmate_sheets::{SheetsClient, SpreadsheetGateway};

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::stripe::{PaymentGateway, StripeClient};

/// A gateway handle, or the reason it could not be built.
pub type Gateway<T> = Result<Arc<T>, String>;

/// Application state shared across handlers.
///
/// Immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Google Sheets gateway.
    pub sheets: Gateway<dyn SpreadsheetGateway>,

    /// Stripe gateway.
    pub payments: Gateway<dyn PaymentGateway>,
}

impl AppState {
    /// Create application state with the real Google and Stripe clients.
    ///
    /// Missing or malformed configuration does not fail startup; the gateway
    /// is recorded as unavailable and requests that need it get a
    /// configuration error.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let sheets: Gateway<dyn SpreadsheetGateway> = match &config.google_service_account_json
        {
            None => Err("GOOGLE_SERVICE_ACCOUNT_JSON environment variable not set".into()),
            Some(json) => match SheetsClient::from_credentials_json(json) {
                Ok(client) => {
                    tracing::info!(
                        client_email = %client.credentials().client_email(),
                        "Google Sheets integration enabled"
                    );
                    Ok(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Google Sheets client");
                    Err(e.to_string())
                }
            },
        };

        if let Err(reason) = &sheets {
            tracing::warn!(reason = %reason, "Google Sheets not configured - rows will not be written");
        }

        let payments: Gateway<dyn PaymentGateway> = match &config.stripe_secret_key {
            None => Err("STRIPE_SECRET_KEY environment variable not set".into()),
            Some(key) => match StripeClient::new(key, config.stripe_price_id.clone()) {
                Ok(client) => {
                    tracing::info!("Stripe integration enabled");
                    Ok(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Stripe client");
                    Err(e.to_string())
                }
            },
        };

        if let Err(reason) = &payments {
            tracing::warn!(reason = %reason, "Stripe not configured - payments will not be available");
        }

        Self {
            config,
            sheets,
            payments,
        }
    }

    /// Create application state around existing gateways.
    #[must_use]
    pub fn with_gateways(
        config: ServiceConfig,
        sheets: Arc<dyn SpreadsheetGateway>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            sheets: Ok(sheets),
            payments: Ok(payments),
        }
    }

    /// The spreadsheet gateway, if configured.
    pub fn sheets(&self) -> Result<&dyn SpreadsheetGateway, ApiError> {
        match &self.sheets {
            Ok(gateway) => Ok(gateway.as_ref()),
            Err(reason) => Err(ApiError::Configuration(reason.clone())),
        }
    }

    /// The payment gateway, if configured.
    pub fn payments(&self) -> Result<&dyn PaymentGateway, ApiError> {
        match &self.payments {
            Ok(gateway) => Ok(gateway.as_ref()),
            Err(reason) => Err(ApiError::Configuration(reason.clone())),
        }
    }

    /// Spreadsheet id of the leads sheet.
    pub fn leads_sheet_id(&self) -> Result<&str, ApiError> {
        self.config
            .leads_sheet_id
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("GOOGLE_SHEET1_ID not set".into()))
    }

    /// Spreadsheet id of the purchases sheet.
    pub fn purchases_sheet_id(&self) -> Result<&str, ApiError> {
        self.config
            .purchases_sheet_id
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("GOOGLE_SHEET2_ID not set".into()))
    }

    /// Check if Google Sheets is configured.
    #[must_use]
    pub fn has_sheets(&self) -> bool {
        self.sheets.is_ok()
    }

    /// Check if Stripe is configured.
    #[must_use]
    pub fn has_stripe(&self) -> bool {
        self.payments.is_ok()
    }
}
