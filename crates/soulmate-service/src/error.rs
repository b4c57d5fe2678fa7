//! API error types and responses.
//!
//! Every failure leaves the service as the same envelope,
//! `{"success": false, "message": "..."}`, carrying the underlying message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use soulmate_core::RecordError;
use soulmate_sheets::SheetsError;

use crate::stripe::StripeError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed credentials or required settings.
    #[error("{0}")]
    Configuration(String),

    /// Invalid caller input.
    #[error("{0}")]
    Validation(String),

    /// Required lead fields absent or empty.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The checkout session exists but has not been paid.
    #[error("Payment not completed")]
    PaymentNotCompleted,

    /// Spreadsheet API failure.
    #[error("{0}")]
    ExternalService(String),

    /// Payment API failure.
    #[error("{0}")]
    PaymentProvider(String),

    /// Request could not be processed, e.g. an unreadable checkout body.
    #[error("{0}")]
    Internal(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    /// HTTP status for this error kind.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingFields(_) | Self::PaymentNotCompleted => {
                StatusCode::BAD_REQUEST
            }
            Self::Configuration(_)
            | Self::ExternalService(_)
            | Self::PaymentProvider(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, kind = ?self, "Request failed");
        } else {
            tracing::warn!(error = %message, "Request rejected");
        }

        let missing_fields = match self {
            Self::MissingFields(fields) => Some(fields),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            message,
            missing_fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingFields(fields) => {
                Self::MissingFields(fields.into_iter().map(String::from).collect())
            }
            RecordError::InvalidBirthDate => Self::Validation(err.to_string()),
        }
    }
}

impl From<SheetsError> for ApiError {
    fn from(err: SheetsError) -> Self {
        if err.is_configuration() {
            Self::Configuration(err.to_string())
        } else {
            Self::ExternalService(err.to_string())
        }
    }
}

impl From<StripeError> for ApiError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Configuration(_) => Self::Configuration(err.to_string()),
            StripeError::InvalidSignature => Self::Validation(err.to_string()),
            StripeError::Http(_) | StripeError::Api { .. } | StripeError::InvalidResponse(_) => {
                Self::PaymentProvider(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_bad_request() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::PaymentNotCompleted.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingFields(vec!["email".into()]).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn downstream_errors_are_internal() {
        for err in [
            ApiError::Configuration("x".into()),
            ApiError::ExternalService("x".into()),
            ApiError::PaymentProvider("x".into()),
            ApiError::Internal("x".into()),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn timeout_is_request_timeout() {
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn record_errors_convert() {
        let err = ApiError::from(RecordError::MissingFields(vec!["email", "city"]));
        assert_eq!(err.to_string(), "Missing required fields: email, city");

        let err = ApiError::from(RecordError::InvalidBirthDate);
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Invalid birth date"));
    }

    #[test]
    fn stripe_api_error_keeps_provider_message() {
        let err = ApiError::from(StripeError::Api {
            error_type: "invalid_request_error".into(),
            message: "No such checkout.session: cs_x".into(),
            code: None,
        });
        assert!(matches!(err, ApiError::PaymentProvider(_)));
        assert!(err.to_string().contains("No such checkout.session: cs_x"));
    }

    #[test]
    fn sheets_configuration_error_stays_configuration() {
        let err = ApiError::from(SheetsError::Configuration("bad key".into()));
        assert!(matches!(err, ApiError::Configuration(_)));

        let err = ApiError::from(SheetsError::TabNotFound {
            sheet_id: "s".into(),
            tab: "Sheet1".into(),
        });
        assert!(matches!(err, ApiError::ExternalService(_)));
    }
}
