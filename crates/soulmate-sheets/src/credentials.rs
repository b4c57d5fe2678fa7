//! Service-account credentials.
//!
//! Google service accounts authenticate with a self-signed RS256 JWT that is
//! exchanged at the account's token endpoint for a short-lived bearer token.

use std::fmt;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SheetsError;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Token endpoint used when the credential does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for each assertion, in seconds.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Fields we read from the service-account JSON file.
#[derive(Debug, Deserialize)]
struct RawServiceAccount {
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

/// A parsed service-account credential.
#[derive(Clone)]
pub struct ServiceAccountKey {
    client_email: String,
    private_key_id: Option<String>,
    token_uri: String,
    encoding_key: EncodingKey,
}

/// Claims of the token assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl ServiceAccountKey {
    /// Parse a service-account credential blob.
    ///
    /// Fails with [`SheetsError::Configuration`] when the blob is empty, is
    /// not JSON, lacks `client_email`/`private_key`, or carries a private key
    /// that is not an RSA PEM.
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        if json.trim().is_empty() {
            return Err(SheetsError::Configuration(
                "service account credentials are empty".into(),
            ));
        }

        let raw: RawServiceAccount = serde_json::from_str(json).map_err(|e| {
            SheetsError::Configuration(format!("invalid service account JSON: {e}"))
        })?;

        let encoding_key = EncodingKey::from_rsa_pem(raw.private_key.as_bytes()).map_err(|e| {
            SheetsError::Configuration(format!("invalid service account private key: {e}"))
        })?;

        Ok(Self {
            client_email: raw.client_email,
            private_key_id: raw.private_key_id,
            token_uri: raw
                .token_uri
                .filter(|uri| !uri.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            encoding_key,
        })
    }

    /// The service account's email address.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// The token endpoint assertions are exchanged at.
    #[must_use]
    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Sign a token assertion issued at `issued_at` (Unix seconds).
    pub fn assertion(&self, issued_at: i64) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Exchange a fresh assertion for a bearer access token.
    pub async fn fetch_access_token(&self, http: &Client) -> Result<String, SheetsError> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;

        tracing::debug!(
            client_email = %self.client_email,
            token_uri = %self.token_uri,
            "Exchanging service account assertion"
        );

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response.json().await?;
            return Ok(token.access_token);
        }

        let message = match response.json::<TokenErrorResponse>().await {
            Ok(body) => match body.error_description {
                Some(description) => format!("{}: {description}", body.error),
                None => body.error,
            },
            Err(_) => format!("HTTP {status}"),
        };
        Err(SheetsError::Auth(message))
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}
