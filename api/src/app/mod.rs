//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and repository ports.

pub mod city_service;
pub mod customer_service;
pub mod seed_service;

pub use city_service::CityService;
pub use customer_service::CustomerService;
pub use seed_service::SeedService;
