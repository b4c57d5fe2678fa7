//! Google Sheets v4 REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use soulmate_core::CellValue;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::gateway::SpreadsheetGateway;

/// Sheets API client authenticated as a service account.
///
/// Every call obtains a fresh access token; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    credentials: ServiceAccountKey,
    base_url: String,
}

/// Spreadsheet metadata, trimmed to tab titles.
#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    major_dimension: &'static str,
    values: [&'a [CellValue]; 1],
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

impl SheetsClient {
    /// Sheets API base URL.
    pub const BASE_URL: &'static str = "https://sheets.googleapis.com";

    /// Create a client for the given credentials.
    pub fn new(credentials: ServiceAccountKey) -> Result<Self, SheetsError> {
        Self::with_base_url(credentials, Self::BASE_URL)
    }

    /// Create a client that talks to a different API host.
    pub fn with_base_url(
        credentials: ServiceAccountKey,
        base_url: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Parse credentials from a JSON blob and build a client.
    pub fn from_credentials_json(json: &str) -> Result<Self, SheetsError> {
        Self::new(ServiceAccountKey::from_json(json)?)
    }

    /// The credentials this client signs in with.
    #[must_use]
    pub fn credentials(&self) -> &ServiceAccountKey {
        &self.credentials
    }

    /// Build `{base}/v4/spreadsheets/{id}/...` with each segment escaped.
    fn url(&self, segments: &[&str]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetsError::Configuration(format!("invalid Sheets base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| SheetsError::Configuration("Sheets base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    /// Open the spreadsheet and confirm `tab` exists.
    async fn locate_tab(&self, token: &str, sheet_id: &str, tab: &str) -> Result<(), SheetsError> {
        let url = self.url(&[sheet_id])?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")])
            .send()
            .await?;

        let spreadsheet: Spreadsheet = handle_response(response).await?;

        if spreadsheet.sheets.iter().any(|s| s.properties.title == tab) {
            Ok(())
        } else {
            Err(SheetsError::TabNotFound {
                sheet_id: sheet_id.to_string(),
                tab: tab.to_string(),
            })
        }
    }
}

#[async_trait]
impl SpreadsheetGateway for SheetsClient {
    async fn append_row(
        &self,
        sheet_id: &str,
        tab: &str,
        values: &[CellValue],
    ) -> Result<(), SheetsError> {
        let token = self.credentials.fetch_access_token(&self.http).await?;
        self.locate_tab(&token, sheet_id, tab).await?;

        let range = format!("'{}':append", tab.replace('\'', "''"));
        let url = self.url(&[sheet_id, "values", &range])?;

        tracing::debug!(
            sheet_id = %sheet_id,
            tab = %tab,
            columns = values.len(),
            "Appending spreadsheet row"
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValueRange {
                major_dimension: "ROWS",
                values: [values],
            })
            .send()
            .await?;

        let _: serde_json::Value = handle_response(response).await?;
        Ok(())
    }

    async fn check_tab(&self, sheet_id: &str, tab: &str) -> Result<(), SheetsError> {
        let token = self.credentials.fetch_access_token(&self.http).await?;
        self.locate_tab(&token, sheet_id, tab).await
    }
}

/// Decode a success body or turn a Google error envelope into `SheetsError::Api`.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SheetsError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<GoogleErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("HTTP {status}"),
    };

    Err(SheetsError::Api {
        status: status.as_u16(),
        message,
    })
}
