//! City entity, typed operation input, and the search filter.

use chrono::{DateTime, Utc};

use super::state::State;

/// A persisted city. `state_id` is nullable at the schema level but is
/// expected to reference a [`State`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub state_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A city paired with its eagerly loaded owning state, as returned by
/// search. Loading both sides in one round trip avoids a per-result fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityWithState {
    pub city: City,
    pub state: Option<State>,
}

/// Permitted fields for city create and update operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityParams {
    pub name: Option<String>,
    pub state_id: Option<i64>,
}

impl CityParams {
    /// Input with both fields present, mainly for seeds and tests.
    pub fn new(name: impl Into<String>, state_id: i64) -> Self {
        Self {
            name: Some(name.into()),
            state_id: Some(state_id),
        }
    }
}

/// Optional, composable narrowing criteria for the city search.
///
/// A fragment is *present* when it is neither absent nor the empty string;
/// no trimming is applied. Present fragments compose with AND semantics:
/// the state fragment narrows to cities whose state's name contains it
/// case-insensitively, the name fragment narrows on the city's own name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySearchFilter {
    state: Option<String>,
    name: Option<String>,
}

impl CitySearchFilter {
    pub fn new(state: Option<String>, name: Option<String>) -> Self {
        Self { state, name }
    }

    /// State-name fragment, if present under the presence rule.
    pub fn state_fragment(&self) -> Option<&str> {
        self.state.as_deref().filter(|fragment| !fragment.is_empty())
    }

    /// City-name fragment, if present under the presence rule.
    pub fn name_fragment(&self) -> Option<&str> {
        self.name.as_deref().filter(|fragment| !fragment.is_empty())
    }
}
