//! Payment gateway trait.

use async_trait::async_trait;

use soulmate_core::CheckoutMetadata;

use super::client::StripeError;

/// Payment status Stripe reports for a settled session.
pub const PAID: &str = "paid";

/// What the confirmation flow needs to know about a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// Session ID.
    pub id: String,
    /// Payment status as reported by the provider.
    pub payment_status: String,
    /// Lead fields packed at checkout time.
    pub metadata: CheckoutMetadata,
}

impl SessionStatus {
    /// Whether the session has been paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PAID
    }
}

/// Hosted checkout against a fixed price.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a one-item checkout session and return its redirect URL.
    async fn create_session(
        &self,
        email: Option<&str>,
        metadata: &CheckoutMetadata,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String, StripeError>;

    /// Retrieve a session's payment status and metadata.
    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, StripeError>;
}
