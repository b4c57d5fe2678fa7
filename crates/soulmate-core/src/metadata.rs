//! Checkout session metadata.
//!
//! The payment provider's session metadata is the only place lead data lives
//! between checkout creation and payment confirmation, so the same key set is
//! written here and read back in `PurchaseRecord::from_metadata`.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::lead::{text, LeadForm};

/// Metadata key holding the generation timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// String key/value pairs attached to a checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutMetadata(BTreeMap<String, String>);

impl CheckoutMetadata {
    /// Pack every lead field plus a generation timestamp.
    ///
    /// Absent fields are stored as empty strings, values are copied verbatim.
    #[must_use]
    pub fn from_lead(form: &LeadForm, generated_at: NaiveDateTime) -> Self {
        let entries = [
            ("firstName", text(form.first_name.as_ref())),
            ("lastName", text(form.last_name.as_ref())),
            ("email", text(form.email.as_ref())),
            ("gender", text(form.gender.as_ref())),
            ("birthDate", text(form.birth_date.as_ref())),
            ("zodiacSign", text(form.zodiac_sign.as_ref())),
            ("country", text(form.country.as_ref())),
            ("city", text(form.city.as_ref())),
            (
                TIMESTAMP_KEY,
                generated_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            ),
        ];

        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Value for `key`, or the empty string when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CheckoutMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
