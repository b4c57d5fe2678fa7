//! Core types for the soulmate relay.
//!
//! This crate holds the record shapes that flow between the front-end, the
//! payment provider and the spreadsheets:
//!
//! - **Cells**: `CellValue`, one scalar spreadsheet value
//! - **Leads**: `LeadForm` (inbound payload), `LeadRecord` (leads tab row)
//! - **Purchases**: `PurchaseRecord` (purchases tab row)
//! - **Metadata**: `CheckoutMetadata`, the lead fields carried on a checkout session
//!
//! Nothing here performs I/O. Records are positional: the order of the
//! values returned by `to_row` must match the target tab's column order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cell;
pub mod error;
pub mod lead;
pub mod metadata;
pub mod purchase;

pub use cell::CellValue;
pub use error::{RecordError, Result};
pub use lead::{LeadForm, LeadRecord, BIRTH_DATE_SENTINEL, LEAD_STATUS, MARITAL_STATUS};
pub use metadata::CheckoutMetadata;
pub use purchase::{PurchaseRecord, BUYER_STATUS, PRODUCT_NAME, PURCHASE_QUANTITY};
