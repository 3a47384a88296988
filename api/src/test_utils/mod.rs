//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories follow the same contracts as the PostgreSQL
//! adapters: customers are returned with their city joined at read time, so
//! removing a city leaves a dangling reference that reads back as no city.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
