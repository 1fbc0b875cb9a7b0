use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tyre_models::contact::{
    ContactMessageContent, ContactMessageEmail, ContactMessageMobile, ContactMessageName,
};

use crate::i18n::TextKey;

/// Names of the fields every submission must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "mobile", "email", "message"];

/// The values of the contact form, keyed by field name.
///
/// Serializes to the flat json object expected by `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactForm {
    fields: BTreeMap<String, String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value of the field without surrounding whitespace, empty if absent.
    pub fn trimmed(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default().trim()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|value| value.is_empty())
    }

    /// Required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|name| self.trimmed(name).is_empty())
            .collect()
    }

    /// Checks the fields in the same order and with the same rules as the
    /// server and reports the first violation.
    pub fn validate(&self) -> Result<(), FieldError> {
        let len = |name| self.trimmed(name).chars().count();

        if len("name") < ContactMessageName::MIN_LEN {
            return Err(FieldError::Name);
        }
        if len("mobile") < ContactMessageMobile::MIN_LEN {
            return Err(FieldError::Mobile);
        }
        if len("email") < ContactMessageEmail::MIN_LEN
            || !self.trimmed("email").contains(ContactMessageEmail::REQUIRED_CHAR)
        {
            return Err(FieldError::Email);
        }
        if len("message") < ContactMessageContent::MIN_LEN {
            return Err(FieldError::Message);
        }
        Ok(())
    }

    /// Clears every field while keeping the field names.
    pub fn reset(&mut self) {
        self.fields.values_mut().for_each(String::clear);
    }
}

impl<K, V> FromIterator<(K, V)> for ContactForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Name,
    Mobile,
    Email,
    Message,
}

impl FieldError {
    pub fn text_key(self) -> TextKey {
        match self {
            Self::Name => TextKey::ErrorName,
            Self::Mobile => TextKey::ErrorMobile,
            Self::Email => TextKey::ErrorEmail,
            Self::Message => TextKey::ErrorMessage,
        }
    }
}
