//! Lead types.
//!
//! A lead is a prospective customer who submitted the intake form but has not
//! paid yet. The inbound `LeadForm` is validated and normalized into a
//! `LeadRecord`, which renders as one row of the leads tab.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{RecordError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder the front-end sends when no birth date was picked.
pub const BIRTH_DATE_SENTINEL: &str = "-00-00";

/// Marital status written for every lead.
pub const MARITAL_STATUS: &str = "Single";

/// Status tag written for every lead.
pub const LEAD_STATUS: &str = "LEAD";

/// Timestamp layout of the leads tab.
const LEAD_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// The intake form as submitted by the front-end.
///
/// Every field is optional at the wire level so presence can be reported
/// per field instead of failing deserialization on the first gap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Gender preference.
    #[serde(default)]
    pub gender: Option<String>,
    /// Birth date as entered.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Zodiac sign (optional).
    #[serde(default)]
    pub zodiac_sign: Option<String>,
}

impl LeadForm {
    /// Required fields with their wire names, in reporting order.
    fn required(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("firstName", self.first_name.as_deref()),
            ("lastName", self.last_name.as_deref()),
            ("email", self.email.as_deref()),
            ("gender", self.gender.as_deref()),
            ("birthDate", self.birth_date.as_deref()),
            ("country", self.country.as_deref()),
            ("city", self.city.as_deref()),
        ]
    }

    /// Names of required fields that are absent or empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.required()
            .into_iter()
            .filter(|(_, value)| value.map_or(true, str::is_empty))
            .map(|(name, _)| name)
            .collect()
    }

    /// Check presence of required fields and the birth date placeholder.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(RecordError::MissingFields(missing));
        }

        if self.birth_date.as_deref() == Some(BIRTH_DATE_SENTINEL) {
            return Err(RecordError::InvalidBirthDate);
        }

        Ok(())
    }
}

/// Read an optional field, treating absence as empty.
pub(crate) fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// A validated lead, ready to be appended to the leads tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRecord {
    /// When the submission was received.
    pub submitted_at: NaiveDateTime,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender preference.
    pub gender: String,
    /// Zodiac sign, empty when not supplied.
    pub zodiac_sign: String,
    /// Birth date as entered.
    pub birth_date: String,
    /// City.
    pub city: String,
    /// Email address.
    pub email: String,
}

impl LeadRecord {
    /// Validate a form and build the record stamped with `submitted_at`.
    pub fn from_form(form: &LeadForm, submitted_at: NaiveDateTime) -> Result<Self> {
        form.validate()?;

        Ok(Self {
            submitted_at,
            first_name: text(form.first_name.as_ref()),
            last_name: text(form.last_name.as_ref()),
            gender: text(form.gender.as_ref()),
            zodiac_sign: text(form.zodiac_sign.as_ref()),
            birth_date: text(form.birth_date.as_ref()),
            city: text(form.city.as_ref()),
            email: text(form.email.as_ref()),
        })
    }

    /// Render the leads tab row (columns A..J).
    #[must_use]
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            self.submitted_at.format(LEAD_TIMESTAMP_FORMAT).to_string().into(),
            self.first_name.as_str().into(),
            self.last_name.as_str().into(),
            self.gender.as_str().into(),
            self.zodiac_sign.as_str().into(),
            self.birth_date.as_str().into(),
            MARITAL_STATUS.into(),
            self.city.as_str().into(),
            self.email.as_str().into(),
            LEAD_STATUS.into(),
        ]
    }
}
