//! Transport-agnostic domain layer.
//!
//! Entities, typed operation inputs, validation, repository ports, and the
//! services composing them. Nothing in here knows about HTTP or SQL; inbound
//! and outbound adapters translate at the edges.

pub mod city;
pub mod city_service;
pub mod error;
pub mod ports;
pub mod state;
pub mod state_service;
pub mod validation;

pub use city::{City, CityParams, CitySearchFilter, CityWithState};
pub use city_service::CityService;
pub use error::Error;
pub use state::{State, StateParams};
pub use state_service::StateService;
pub use validation::ValidationErrors;
