//! Sheets error types.

/// Errors that can occur talking to Google Sheets.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// Credentials absent or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token exchange was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Signing the token assertion failed.
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The Sheets API returned an error.
    #[error("Sheets API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The spreadsheet has no tab with the requested title.
    #[error("worksheet '{tab}' not found in spreadsheet {sheet_id}")]
    TabNotFound {
        /// Spreadsheet identifier.
        sheet_id: String,
        /// Requested tab title.
        tab: String,
    },
}

impl SheetsError {
    /// Whether this is a credential/configuration problem rather than a
    /// failure of the remote service.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
