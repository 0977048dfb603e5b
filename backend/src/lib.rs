//! Gazetteer backend: a REST API over states and their cities.
//!
//! Structured hexagonally: `domain` holds the entities, services, and
//! repository ports; `inbound::http` adapts them to Actix handlers;
//! `outbound` provides the Diesel-backed and in-memory repository
//! implementations; `server` wires everything together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod seed;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
