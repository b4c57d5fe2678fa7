//! Spreadsheet cell values.

use serde::Serialize;

/// A single scalar written to one spreadsheet cell.
///
/// Serializes untagged, so a row of cells becomes a plain JSON array such as
/// `["02/03/2025", 1, ""]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A text cell.
    Text(String),
    /// An integer cell.
    Number(i64),
}

impl CellValue {
    /// An empty text cell.
    #[must_use]
    pub fn blank() -> Self {
        Self::Text(String::new())
    }

    /// The text content, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}
