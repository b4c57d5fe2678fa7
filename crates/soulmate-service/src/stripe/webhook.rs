//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header has the form `t=timestamp,v1=sig,v1=sig2,...`;
//! each `v1` is a hex HMAC-SHA256 of `"{t}.{payload}"` under the endpoint secret.

use crate::crypto::{constant_time_eq, hmac_sha256_hex};

use super::client::StripeError;

/// Verify a webhook payload against its `Stripe-Signature` header.
pub fn verify_webhook_signature(
    secret: &str,
    payload: &str,
    signature: &str,
) -> Result<(), StripeError> {
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in signature.split(',') {
        let mut kv = part.trim().splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(ts)) => timestamp = Some(ts),
            (Some("v1"), Some(sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(StripeError::InvalidSignature)?;

    if signatures.is_empty() {
        return Err(StripeError::InvalidSignature);
    }

    let expected = hmac_sha256_hex(secret, &format!("{timestamp}.{payload}"));

    if signatures.iter().any(|sig| constant_time_eq(&expected, sig)) {
        Ok(())
    } else {
        Err(StripeError::InvalidSignature)
    }
}
