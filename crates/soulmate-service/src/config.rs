//! Service configuration.

use std::path::Path;

/// Tab both spreadsheets use unless overridden.
pub const DEFAULT_TAB: &str = "Sheet1";

/// Front-end that checkout sessions redirect back to.
pub const DEFAULT_FRONTEND_URL: &str = "https://divinesoulmate.vercel.app";

/// Service configuration loaded from environment variables.
///
/// Built once at startup and handed to every handler through `AppState`.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:$PORT", PORT default 10000).
    pub listen_addr: String,

    /// Spreadsheet receiving leads (`GOOGLE_SHEET1_ID`).
    pub leads_sheet_id: Option<String>,

    /// Tab of the leads spreadsheet (default: "Sheet1").
    pub leads_tab: String,

    /// Spreadsheet receiving purchases (`GOOGLE_SHEET2_ID`).
    pub purchases_sheet_id: Option<String>,

    /// Tab of the purchases spreadsheet (default: "Sheet1").
    pub purchases_tab: String,

    /// Google service-account credential blob (JSON).
    pub google_service_account_json: Option<String>,

    /// Stripe secret API key.
    pub stripe_secret_key: Option<String>,

    /// Stripe price charged for a reading.
    pub stripe_price_id: Option<String>,

    /// Stripe webhook signing secret (optional).
    pub stripe_webhook_secret: Option<String>,

    /// Frontend URL for checkout redirects.
    pub frontend_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| {
            let port = std::env::var("PORT").unwrap_or_else(|_| "10000".into());
            format!("0.0.0.0:{port}")
        });

        Self {
            listen_addr,
            leads_sheet_id: non_empty_var("GOOGLE_SHEET1_ID"),
            leads_tab: non_empty_var("LEADS_SHEET_TAB").unwrap_or_else(|| DEFAULT_TAB.into()),
            purchases_sheet_id: non_empty_var("GOOGLE_SHEET2_ID"),
            purchases_tab: non_empty_var("PURCHASES_SHEET_TAB")
                .unwrap_or_else(|| DEFAULT_TAB.into()),
            google_service_account_json: load_google_credentials(),
            stripe_secret_key: non_empty_var("STRIPE_SECRET_KEY"),
            stripe_price_id: non_empty_var("STRIPE_PRICE_ID"),
            stripe_webhook_secret: non_empty_var("STRIPE_WEBHOOK_SECRET"),
            frontend_url: non_empty_var("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Default checkout success URL; Stripe substitutes the session id.
    #[must_use]
    pub fn default_success_url(&self) -> String {
        format!(
            "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.frontend_url.trim_end_matches('/')
        )
    }

    /// Default checkout cancel URL.
    #[must_use]
    pub fn default_cancel_url(&self) -> String {
        format!("{}/cancel", self.frontend_url.trim_end_matches('/'))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Load the Google credential blob from the environment or a secrets file.
fn load_google_credentials() -> Option<String> {
    if let Some(json) = non_empty_var("GOOGLE_SERVICE_ACCOUNT_JSON") {
        return Some(json);
    }

    let secret_paths = [
        ".secrets/google-service-account.json",
        "soulmate/.secrets/google-service-account.json",
        "../.secrets/google-service-account.json",
    ];

    for path in &secret_paths {
        if let Ok(contents) = load_secrets_file(path) {
            tracing::info!(path = %path, "Loaded Google service account from file");
            return Some(contents);
        }
    }

    tracing::debug!("Google service account not found in environment or secrets files");
    None
}

/// Read a secrets file, keeping its contents verbatim.
fn load_secrets_file(path: &str) -> Result<String, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    std::fs::read_to_string(path)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:10000".into(),
            leads_sheet_id: None,
            leads_tab: DEFAULT_TAB.into(),
            purchases_sheet_id: None,
            purchases_tab: DEFAULT_TAB.into(),
            google_service_account_json: None,
            stripe_secret_key: None,
            stripe_price_id: None,
            stripe_webhook_secret: None,
            frontend_url: DEFAULT_FRONTEND_URL.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
