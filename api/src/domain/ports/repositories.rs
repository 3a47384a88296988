//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    City, CityId, Customer, CustomerId, NewCity, NewCustomer, NewResident,
};
use crate::error::DomainError;

/// Repository for City entities
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Find a city by ID
    async fn find_by_id(&self, id: CityId) -> Result<Option<City>, DomainError>;

    /// List every city, ordered by ID
    async fn find_all(&self) -> Result<Vec<City>, DomainError>;

    /// Create a new city
    async fn create(&self, city: &NewCity) -> Result<City, DomainError>;
}

/// Repository for Customer entities
///
/// Every customer returned carries its city, resolved through the city
/// reference. A reference to a city that no longer exists reads back as no
/// city.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Check whether a customer with this ID exists
    async fn exists(&self, id: CustomerId) -> Result<bool, DomainError>;

    /// Count all customers
    async fn count(&self) -> Result<u64, DomainError>;

    /// List every customer, ordered by ID
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    /// Customers whose name is exactly `name`
    async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, DomainError>;

    /// Customers referencing the given city
    async fn find_by_city(&self, city_id: CityId) -> Result<Vec<Customer>, DomainError>;

    /// Customers whose ID equals `id` OR whose name contains `name`
    /// (case-insensitive). A `None` clause never matches; both `None`
    /// yields an empty result.
    async fn search_by_id_or_name(
        &self,
        id: Option<CustomerId>,
        name: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError>;

    /// Customers whose ID equals `id`, OR whose name contains `text`, OR
    /// whose city's name contains `text` (both case-insensitive)
    async fn search_with_city(
        &self,
        text: &str,
        id: Option<CustomerId>,
    ) -> Result<Vec<Customer>, DomainError>;

    /// Insert a new customer, generating its ID
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;

    /// Insert each resident's city and then the resident, as one unit.
    ///
    /// Either every row is stored or, on failure, none is.
    async fn create_with_cities(
        &self,
        residents: &[NewResident],
    ) -> Result<Vec<Customer>, DomainError>;

    /// Overwrite name, address and city of an existing customer.
    ///
    /// Fails with `NotFound` if the customer does not exist.
    async fn replace(&self, id: CustomerId, customer: &NewCustomer)
        -> Result<Customer, DomainError>;

    /// Delete a customer, returning whether a row was removed
    async fn delete(&self, id: CustomerId) -> Result<bool, DomainError>;
}
