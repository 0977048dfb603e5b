//! Driven adapters implementing the domain repository ports.

pub mod memory;
pub mod persistence;
