//! Spreadsheet gateway trait.

use async_trait::async_trait;
use soulmate_core::CellValue;

use crate::error::SheetsError;

/// Append-only access to named tabs of remote spreadsheets.
///
/// Implementations do not retry or deduplicate. A caller that sees a timeout
/// cannot tell whether the row was written.
#[async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    /// Open `sheet_id`, locate `tab` and append `values` as one row.
    async fn append_row(
        &self,
        sheet_id: &str,
        tab: &str,
        values: &[CellValue],
    ) -> Result<(), SheetsError>;

    /// Open `sheet_id` and locate `tab` without writing.
    async fn check_tab(&self, sheet_id: &str, tab: &str) -> Result<(), SheetsError>;
}
