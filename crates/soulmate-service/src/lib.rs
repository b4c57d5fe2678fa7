//! Soulmate relay HTTP service.
//!
//! Receives form submissions from the front-end and relays them:
//!
//! - Leads are appended to the leads spreadsheet
//! - Checkout requests become Stripe-hosted checkout sessions, with the lead
//!   carried in the session metadata
//! - Confirmed payments are appended to the purchases spreadsheet
//!
//! Nothing is stored locally. Each request is one or two calls to Stripe and
//! Google Sheets, with no retry and no deduplication.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{PaymentGateway, SessionStatus, StripeClient, StripeError};
