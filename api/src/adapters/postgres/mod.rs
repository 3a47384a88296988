//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod city_repo;
pub mod customer_repo;
pub mod schema;


pub use city_repo::PostgresCityRepository;
pub use customer_repo::PostgresCustomerRepository;
pub use schema::ensure_schema;
