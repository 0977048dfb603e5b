//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they only depend on
//! the domain services and stay testable without I/O. No ambient connection
//! state exists; repositories are injected at construction.

use std::sync::Arc;

use crate::domain::{CityService, StateService};
use crate::outbound::memory::InMemoryStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub states: StateService,
    pub cities: CityService,
}

impl HttpState {
    /// Construct state from already-wired services.
    pub fn new(states: StateService, cities: CityService) -> Self {
        Self { states, cities }
    }

    /// State backed by a fresh in-memory store, for tests and DB-less runs.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self::new(
            StateService::new(Arc::new(store.state_repository())),
            CityService::new(Arc::new(store.city_repository())),
        )
    }
}
