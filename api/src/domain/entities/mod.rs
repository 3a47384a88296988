//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod city;
pub mod customer;

pub use city::{City, CityDraft, CityId, NewCity, StateCode};
pub use customer::{
    Customer, CustomerDraft, CustomerId, CustomerSearch, NewCustomer, NewResident,
};
