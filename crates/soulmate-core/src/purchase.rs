//! Purchase records.
//!
//! A purchase row is written once per confirmed checkout session. Lead fields
//! come back from the session metadata.

use chrono::NaiveDateTime;

use crate::cell::CellValue;
use crate::metadata::CheckoutMetadata;

/// Product name written for every purchase.
pub const PRODUCT_NAME: &str = "Divine Soulmate Reading";

/// Quantity written for every purchase.
pub const PURCHASE_QUANTITY: i64 = 1;

/// Status tag written for every purchase.
pub const BUYER_STATUS: &str = "buyer";

/// Blank columns between the quantity and the buyer's last name (F..J).
const FILLER_COLUMNS: usize = 5;

/// A confirmed purchase, ready to be appended to the purchases tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// When the payment was confirmed.
    pub confirmed_at: NaiveDateTime,
    /// Checkout session identifier.
    pub session_id: String,
    /// Buyer's last name.
    pub last_name: String,
    /// Buyer's first name.
    pub first_name: String,
    /// Buyer's email.
    pub email: String,
    /// Buyer's country.
    pub country: String,
}

impl PurchaseRecord {
    /// Build a record from a paid session's metadata.
    #[must_use]
    pub fn from_metadata(
        session_id: impl Into<String>,
        metadata: &CheckoutMetadata,
        confirmed_at: NaiveDateTime,
    ) -> Self {
        Self {
            confirmed_at,
            session_id: session_id.into(),
            last_name: metadata.get("lastName").to_string(),
            first_name: metadata.get("firstName").to_string(),
            email: metadata.get("email").to_string(),
            country: metadata.get("country").to_string(),
        }
    }

    /// Render the purchases tab row (columns A..P).
    #[must_use]
    pub fn to_row(&self) -> Vec<CellValue> {
        let mut row: Vec<CellValue> = Vec::with_capacity(16);
        row.push(self.confirmed_at.format("%d/%m/%Y").to_string().into());
        row.push(self.confirmed_at.format("%H:%M:%S").to_string().into());
        row.push(self.session_id.as_str().into());
        row.push(PRODUCT_NAME.into());
        row.push(PURCHASE_QUANTITY.into());
        row.extend(std::iter::repeat_with(CellValue::blank).take(FILLER_COLUMNS));
        row.push(self.last_name.as_str().into());
        row.push(self.first_name.as_str().into());
        row.push(self.email.as_str().into());
        row.push(CellValue::blank());
        row.push(self.country.as_str().into());
        row.push(BUYER_STATUS.into());
        row
    }
}
