//! API handlers.

use serde::Serialize;

pub mod checkout;
pub mod diagnostics;
pub mod health;
pub mod leads;
pub mod payments;
pub mod webhooks;

/// Body returned by endpoints that only report success.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl SuccessResponse {
    /// A success body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
