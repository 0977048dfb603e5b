//! Repository ports at the domain edge.
//!
//! Services depend on these traits rather than on any concrete datastore;
//! adapters map their failures into [`PersistenceError`] so callers see
//! predictable variants instead of backend-specific error types. There is no
//! ambient connection state: every handler receives its repositories through
//! explicit injection.

use async_trait::async_trait;
use thiserror::Error;

use super::city::{City, CitySearchFilter, CityWithState};
use super::state::State;

/// Failures surfaced by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The datastore could not be reached or a connection checkout failed.
    #[error("repository connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution, including constraint
    /// violations that defeat application-level validation.
    #[error("repository query failed: {message}")]
    Query { message: String },
}

impl PersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Column values for a state insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewState {
    pub name: String,
    pub abbreviation: String,
}

/// Full column values for a state update. The service validates the merged
/// candidate before handing it over, so both columns are always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChanges {
    pub name: String,
    pub abbreviation: String,
}

/// Column values for a city insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCity {
    pub name: String,
    pub state_id: Option<i64>,
}

/// Full column values for a city update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityChanges {
    pub name: String,
    pub state_id: Option<i64>,
}

/// Persistence port for state records.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// All states in natural (id) order.
    async fn list(&self) -> Result<Vec<State>, PersistenceError>;

    /// Fetch a state by id.
    async fn find(&self, id: i64) -> Result<Option<State>, PersistenceError>;

    /// Fetch a state by exact, case-sensitive name. Used by the uniqueness
    /// validation probe and by the seed loader.
    async fn find_by_name(&self, name: &str) -> Result<Option<State>, PersistenceError>;

    /// Fetch a state by exact, case-sensitive abbreviation.
    async fn find_by_abbreviation(
        &self,
        abbreviation: &str,
    ) -> Result<Option<State>, PersistenceError>;

    /// Insert a new state and return the stored record.
    async fn insert(&self, new: &NewState) -> Result<State, PersistenceError>;

    /// Overwrite a state's columns, returning `None` when the id is absent.
    async fn update(
        &self,
        id: i64,
        changes: &StateChanges,
    ) -> Result<Option<State>, PersistenceError>;

    /// Delete a state, returning whether a row was removed. A state still
    /// referenced by cities fails the foreign key constraint and surfaces as
    /// a query error.
    async fn delete(&self, id: i64) -> Result<bool, PersistenceError>;
}

/// Persistence port for city records.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// All cities in natural (id) order.
    async fn list(&self) -> Result<Vec<City>, PersistenceError>;

    /// Fetch a city by id.
    async fn find(&self, id: i64) -> Result<Option<City>, PersistenceError>;

    /// Insert a new city and return the stored record.
    async fn insert(&self, new: &NewCity) -> Result<City, PersistenceError>;

    /// Overwrite a city's columns, returning `None` when the id is absent.
    async fn update(
        &self,
        id: i64,
        changes: &CityChanges,
    ) -> Result<Option<City>, PersistenceError>;

    /// Delete a city, returning whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, PersistenceError>;

    /// Filtered, ordered city listing with the owning state eagerly joined.
    /// Returns an empty sequence, not an error, when nothing matches.
    async fn search(
        &self,
        filter: &CitySearchFilter,
    ) -> Result<Vec<CityWithState>, PersistenceError>;
}
