//! Field-level validation errors.
//!
//! Validation is performed by explicit functions on the services rather than
//! by implicit persistence hooks. Failures accumulate into a mapping from
//! field name to human-readable messages, which the HTTP adapter renders as
//! the 422 response body verbatim.

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::Error;

/// Message attached to a blank required field.
pub const BLANK: &str = "can't be blank";

/// Message attached to a field whose value duplicates another record's.
pub const TAKEN: &str = "has already been taken";

/// Accumulated field violations, keyed by field name.
///
/// # Examples
/// ```
/// use gazetteer::domain::validation::{BLANK, ValidationErrors};
///
/// let mut errors = ValidationErrors::default();
/// errors.add("name", BLANK);
/// assert!(!errors.is_empty());
/// assert_eq!(errors.messages("name"), &["can't be blank"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    /// Record a violation message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// True when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field; empty when the field is clean.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Promote accumulated violations into a domain error, or pass when
    /// nothing was recorded.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}
