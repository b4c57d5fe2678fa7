//! Google Sheets gateway for the soulmate relay.
//!
//! - [`ServiceAccountKey`] parses a service-account credential blob and
//!   exchanges it for bearer tokens (OAuth2 JWT-bearer grant).
//! - [`SheetsClient`] opens spreadsheets by id, locates tabs by title and
//!   appends rows through the Sheets v4 REST API.
//! - [`SpreadsheetGateway`] is the seam the HTTP service depends on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod credentials;
pub mod error;
pub mod gateway;

pub use client::SheetsClient;
pub use credentials::ServiceAccountKey;
pub use error::SheetsError;
pub use gateway::SpreadsheetGateway;
