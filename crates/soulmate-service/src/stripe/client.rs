//! Stripe API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use soulmate_core::CheckoutMetadata;

use super::gateway::{PaymentGateway, SessionStatus};
use super::types::{CheckoutSession, StripeErrorResponse};

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Stripe answered but the session is unusable.
    #[error("Invalid Stripe response: {0}")]
    InvalidResponse(String),

    /// Invalid webhook signature.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    price_id: Option<String>,
    base_url: String,
}

impl StripeClient {
    /// Stripe API base URL.
    pub const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    /// * `price_id` - Price charged by every checkout session (`price_...`)
    pub fn new(api_key: impl Into<String>, price_id: Option<String>) -> Result<Self, StripeError> {
        Self::with_base_url(api_key, price_id, Self::BASE_URL)
    }

    /// Create a client that talks to a different API host.
    pub fn with_base_url(
        api_key: impl Into<String>,
        price_id: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            price_id,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StripeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StripeError::Configuration(format!("invalid Stripe base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StripeError::Configuration("Stripe base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Create a Checkout session for one reading.
    ///
    /// # Arguments
    ///
    /// * `email` - Prefilled customer email; skipped when empty
    /// * `metadata` - Lead fields carried to payment confirmation
    /// * `success_url` - URL to redirect on success
    /// * `cancel_url` - URL to redirect on cancel
    pub async fn create_checkout_session(
        &self,
        email: Option<&str>,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let price_id = self
            .price_id
            .as_deref()
            .ok_or_else(|| StripeError::Configuration("STRIPE_PRICE_ID not set".into()))?;

        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[]".to_string(), "card".to_string()),
            ("line_items[0][price]".to_string(), price_id.to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        if let Some(email) = email.filter(|e| !e.is_empty()) {
            params.push(("customer_email".to_string(), email.to_string()));
        }

        params.extend(
            metadata
                .iter()
                .map(|(k, v)| (format!("metadata[{k}]"), v.to_string())),
        );

        tracing::debug!(
            price_id = %price_id,
            metadata_keys = metadata.len(),
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(self.url(&["checkout", "sessions"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Retrieve a Checkout session by ID.
    pub async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .get(self.url(&["checkout", "sessions", session_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_session(
        &self,
        email: Option<&str>,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String, StripeError> {
        let session = self
            .create_checkout_session(email, metadata, success_url, cancel_url)
            .await?;

        session
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                StripeError::InvalidResponse(format!("checkout session {} has no URL", session.id))
            })
    }

    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, StripeError> {
        let session = self.get_checkout_session(session_id).await?;

        Ok(SessionStatus {
            id: session.id,
            payment_status: session.payment_status.unwrap_or_default(),
            metadata: session.metadata,
        })
    }
}

/// Handle API response and convert errors.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StripeError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Try to parse error response
    let error_body: Result<StripeErrorResponse, _> = response.json().await;

    match error_body {
        Ok(stripe_error) => Err(StripeError::Api {
            error_type: stripe_error.error.error_type,
            message: stripe_error.error.message,
            code: stripe_error.error.code,
        }),
        Err(_) => Err(StripeError::Api {
            error_type: "unknown".to_string(),
            message: format!("HTTP {status}"),
            code: None,
        }),
    }
}
