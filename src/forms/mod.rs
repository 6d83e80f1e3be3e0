//! Per-operation input structs and their validation into typed payloads.
//!
//! Admin HTML forms and API request bodies both funnel into
//! [`categories::CategoryInput`] / [`posts::PostInput`], whose `TryFrom`
//! conversions report every invalid field at once as [`FieldErrors`].

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

pub mod categories;
pub mod posts;

pub const TITLE: &str = "Title";
pub const CATEGORY_ID: &str = "CategoryId";
pub const PUBLICATION_DATE: &str = "PublicationDate";
pub const CONTENT: &str = "Content";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const CATEGORY_MISSING: &str = "Category does not exist";
pub const PUBLICATION_DATE_REQUIRED: &str = "Publication date is required";
pub const PUBLICATION_DATE_INVALID: &str = "Publication date is invalid";
pub const CONTENT_REQUIRED: &str = "Content is required";

/// Field-level validation messages keyed by entity property name,
/// serialized as `{"Title": ["Title is required"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Record a message for `field`, ignoring exact duplicates.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let messages = self.0.entry(field.into()).or_default();
        let message = message.into();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Keep the value of a successful conversion, or record `message` for `field`.
    pub fn check<T, E>(&mut self, field: &str, message: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = Self::default();
        for (field, field_errors) in value.field_errors() {
            let key = field_key(&field);
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                errors.add(key.clone(), message);
            }
        }
        errors
    }
}

/// Map a struct field name (`publication_date`) to its property key (`PublicationDate`).
pub fn field_key(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
