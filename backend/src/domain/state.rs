//! State entity and its typed operation input.

use chrono::{DateTime, Utc};

/// A persisted geographic state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Permitted fields for state create and update operations.
///
/// Constructed only from explicitly declared input; anything else a client
/// submits never reaches the entity. Fields are optional because a missing
/// field means "blank" on create and "leave unchanged" on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateParams {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

impl StateParams {
    /// Input with both fields present, mainly for seeds and tests.
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            abbreviation: Some(abbreviation.into()),
        }
    }
}
