//! Stripe integration for hosted checkout.
//!
//! Stripe handles:
//! - Checkout session creation for a reading
//! - Session retrieval to confirm payment
//! - Signed webhook delivery of completed sessions

pub mod client;
pub mod gateway;
pub mod types;
pub mod webhook;

pub use client::{StripeClient, StripeError};
pub use gateway::{PaymentGateway, SessionStatus};
pub use types::*;
pub use webhook::verify_webhook_signature;
