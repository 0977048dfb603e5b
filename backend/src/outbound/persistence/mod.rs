//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: every database failure is mapped to a
//!   [`crate::domain::ports::PersistenceError`] variant.
//!
//! Migrations live under `backend/migrations/` and are applied with the
//! external `diesel` CLI.

mod diesel_city_repository;
mod diesel_error_mapping;
mod diesel_state_repository;
mod models;
mod pool;
mod schema;

pub use diesel_city_repository::DieselCityRepository;
pub use diesel_state_repository::DieselStateRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
