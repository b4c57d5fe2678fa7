//! Stripe API types.

use serde::Deserialize;

use soulmate_core::CheckoutMetadata;

/// Stripe Checkout session object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
    /// Payment status ("paid", "unpaid", "no_payment_required").
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Session status ("open", "complete", "expired").
    #[serde(default)]
    pub status: Option<String>,
    /// Email the customer checked out with.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Metadata.
    #[serde(default)]
    pub metadata: CheckoutMetadata,
}

/// Stripe webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event ID.
    pub id: String,
    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    pub data: WebhookEventData,
}

/// Webhook event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The event object.
    pub object: serde_json::Value,
}

/// Stripe error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_parses_with_metadata() {
        let session: CheckoutSession = serde_json::from_str(
            r#"{
                "id": "cs_test_1",
                "object": "checkout.session",
                "url": null,
                "payment_status": "paid",
                "status": "complete",
                "metadata": {"firstName": "Ada", "country": "UK"}
            }"#,
        )
        .unwrap();

        assert_eq!(session.payment_status.as_deref(), Some("paid"));
        assert!(session.url.is_none());
        assert_eq!(session.metadata.get("firstName"), "Ada");
        assert_eq!(session.metadata.get("email"), "");
    }

    #[test]
    fn error_response_parses() {
        let err: StripeErrorResponse = serde_json::from_str(
            r#"{"error":{"type":"invalid_request_error","message":"No such checkout.session: cs_x","code":"resource_missing"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.error_type, "invalid_request_error");
        assert_eq!(err.error.code.as_deref(), Some("resource_missing"));
    }
}
