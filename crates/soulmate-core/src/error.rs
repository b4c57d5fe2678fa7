//! Error types for record construction.

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while validating an inbound lead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// One or more required fields were absent or empty.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The birth date carried the front-end's "unset" placeholder.
    #[error("Invalid birth date")]
    InvalidBirthDate,
}

impl RecordError {
    /// The missing field names, if this is a presence failure.
    #[must_use]
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
            Self::InvalidBirthDate => &[],
        }
    }
}
