//! HTTP inbound adapter exposing the REST endpoints.

pub mod cities;
pub mod error;
pub mod state;
pub mod states;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
