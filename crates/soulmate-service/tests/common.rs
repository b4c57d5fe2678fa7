//! Common test utilities for soulmate-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use soulmate_core::{CellValue, CheckoutMetadata};
use soulmate_service::{
    create_router, AppState, PaymentGateway, ServiceConfig, SessionStatus, StripeError,
};
use soulmate_sheets::{SheetsError, SpreadsheetGateway};

pub const LEADS_SHEET: &str = "leads-sheet-id";
pub const PURCHASES_SHEET: &str = "purchases-sheet-id";
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

/// One `append_row` call seen by the fake spreadsheet.
#[derive(Debug, Clone)]
pub struct AppendedRow {
    pub sheet_id: String,
    pub tab: String,
    pub values: Vec<CellValue>,
}

impl AppendedRow {
    /// Cell at `index` as text, panicking on numbers.
    pub fn text(&self, index: usize) -> &str {
        self.values[index]
            .as_text()
            .unwrap_or_else(|| panic!("cell {index} is not text: {:?}", self.values[index]))
    }
}

/// In-memory spreadsheet that records appended rows.
#[derive(Default)]
pub struct RecordingSheets {
    rows: Mutex<Vec<AppendedRow>>,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
}

impl RecordingSheets {
    pub fn rows(&self) -> Vec<AppendedRow> {
        self.rows.lock().unwrap().clone()
    }

    pub fn rows_for(&self, sheet_id: &str) -> Vec<AppendedRow> {
        self.rows()
            .into_iter()
            .filter(|r| r.sheet_id == sheet_id)
            .collect()
    }

    /// Make every following call fail with a permission error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make every following append take `delay` before answering.
    pub fn respond_after(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    fn check_failure(&self) -> Result<(), SheetsError> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(SheetsError::Api {
                status: 403,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SpreadsheetGateway for RecordingSheets {
    async fn append_row(
        &self,
        sheet_id: &str,
        tab: &str,
        values: &[CellValue],
    ) -> Result<(), SheetsError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_failure()?;
        self.rows.lock().unwrap().push(AppendedRow {
            sheet_id: sheet_id.to_string(),
            tab: tab.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    async fn check_tab(&self, _sheet_id: &str, _tab: &str) -> Result<(), SheetsError> {
        self.check_failure()
    }
}

/// One `create_session` call seen by the fake payment provider.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub email: Option<String>,
    pub metadata: CheckoutMetadata,
    pub success_url: String,
    pub cancel_url: String,
}

/// In-memory payment provider with scripted sessions.
#[derive(Default)]
pub struct FakePayments {
    sessions: Mutex<HashMap<String, SessionStatus>>,
    created: Mutex<Vec<CreatedSession>>,
    failure: Mutex<Option<String>>,
}

impl FakePayments {
    /// Register a session with the given status and metadata.
    pub fn add_session(&self, id: &str, payment_status: &str, metadata: CheckoutMetadata) {
        self.sessions.lock().unwrap().insert(
            id.to_string(),
            SessionStatus {
                id: id.to_string(),
                payment_status: payment_status.to_string(),
                metadata,
            },
        );
    }

    pub fn created(&self) -> Vec<CreatedSession> {
        self.created.lock().unwrap().clone()
    }

    /// Make every following call fail with a provider error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check_failure(&self) -> Result<(), StripeError> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(StripeError::Api {
                error_type: "api_error".into(),
                message,
                code: None,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakePayments {
    async fn create_session(
        &self,
        email: Option<&str>,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String, StripeError> {
        self.check_failure()?;
        let mut created = self.created.lock().unwrap();
        created.push(CreatedSession {
            email: email.map(String::from),
            metadata: metadata.clone(),
            success_url: success_url.to_string(),
            cancel_url: cancel_url.to_string(),
        });
        Ok(format!("https://checkout.stripe.test/c/pay/cs_test_{}", created.len()))
    }

    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, StripeError> {
        self.check_failure()?;
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| StripeError::Api {
                error_type: "invalid_request_error".into(),
                message: format!("No such checkout.session: '{session_id}'"),
                code: Some("resource_missing".into()),
            })
    }
}

/// Configuration with every setting present.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        leads_sheet_id: Some(LEADS_SHEET.into()),
        leads_tab: "Sheet1".into(),
        purchases_sheet_id: Some(PURCHASES_SHEET.into()),
        purchases_tab: "Sheet1".into(),
        google_service_account_json: Some("{}".into()),
        stripe_secret_key: Some("sk_test_xxx".into()),
        stripe_price_id: Some("price_reading".into()),
        stripe_webhook_secret: Some(WEBHOOK_SECRET.into()),
        frontend_url: "http://localhost:3000".into(),
        cors_origins: vec!["*".into()],
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Rows the service appended.
    pub sheets: Arc<RecordingSheets>,
    /// Sessions the service created or looked up.
    pub payments: Arc<FakePayments>,
}

impl TestHarness {
    /// Create a harness with fake gateways and full configuration.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a harness with fake gateways and the given configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let sheets = Arc::new(RecordingSheets::default());
        let payments = Arc::new(FakePayments::default());

        let state = AppState::with_gateways(config, sheets.clone(), payments.clone());
        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            sheets,
            payments,
        }
    }

    /// Create a harness whose gateways were never configured.
    pub fn unconfigured() -> TestServer {
        let state = AppState::new(ServiceConfig::default());
        TestServer::new(create_router(state)).expect("Failed to create test server")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, valid lead payload.
pub fn lead_payload() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "gender": "male",
        "birthDate": "1815-12-10",
        "country": "UK",
        "city": "London",
        "zodiacSign": "Sagittarius"
    })
}

/// Metadata as checkout would have packed it for `lead_payload`.
pub fn lead_metadata() -> CheckoutMetadata {
    [
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("email", "ada@example.com"),
        ("gender", "male"),
        ("birthDate", "1815-12-10"),
        ("zodiacSign", "Sagittarius"),
        ("country", "UK"),
        ("city", "London"),
        ("timestamp", "2025-03-02T09:05:07.000000"),
    ]
    .into_iter()
    .collect()
}
