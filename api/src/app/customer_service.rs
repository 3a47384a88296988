//! Customer service
//!
//! Customer listing, search, and writes. City references supplied by clients
//! are resolved before every write; a reference that does not resolve is
//! dropped and the customer is stored without a city.

use std::sync::Arc;

use crate::domain::entities::{City, CityId, Customer, CustomerDraft, CustomerId, CustomerSearch};
use crate::domain::ports::{CityRepository, CustomerRepository};
use crate::error::{AppError, DomainError};

/// Service for managing customers
pub struct CustomerService<CR, CY>
where
    CR: CustomerRepository,
    CY: CityRepository,
{
    customers: Arc<CR>,
    cities: Arc<CY>,
}

impl<CR, CY> CustomerService<CR, CY>
where
    CR: CustomerRepository,
    CY: CityRepository,
{
    pub fn new(customers: Arc<CR>, cities: Arc<CY>) -> Self {
        Self { customers, cities }
    }

    /// List every customer
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.customers.find_all().await?)
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", "id", id).into())
    }

    /// Customers whose name is exactly `name`
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, AppError> {
        Ok(self.customers.find_by_name(name).await?)
    }

    /// Customers living in the given city
    pub async fn list_by_city(&self, city_id: CityId) -> Result<Vec<Customer>, AppError> {
        if self.cities.find_by_id(city_id).await?.is_none() {
            return Err(DomainError::not_found("City", "id", city_id).into());
        }
        Ok(self.customers.find_by_city(city_id).await?)
    }

    /// Search by a single token.
    ///
    /// The token is matched as a name fragment; if it also parses as an
    /// integer, customers with that ID match too.
    pub async fn search_by_token(&self, token: &str) -> Result<Vec<Customer>, AppError> {
        let search = CustomerSearch::from_token(token);
        if search.id.is_none() {
            tracing::debug!(token = %token, "Search token is not an ID, matching by name only");
        }
        self.search(search).await
    }

    /// Search by an explicit optional ID and optional name fragment
    pub async fn search(&self, search: CustomerSearch) -> Result<Vec<Customer>, AppError> {
        let search = search.normalized();
        if search.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .customers
            .search_by_id_or_name(search.id, search.name.as_deref())
            .await?)
    }

    /// Search customer ID, customer name and city name with one piece of text
    pub async fn search_by_text(&self, text: &str) -> Result<Vec<Customer>, AppError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let id = CustomerId::from_token(text);
        if id.is_none() {
            tracing::debug!(text = %text, "Search text is not an ID, matching names only");
        }

        Ok(self.customers.search_with_city(text, id).await?)
    }

    /// Create a new customer
    pub async fn create_customer(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        draft.validate()?;

        let city = self.resolve_city(draft.city_id).await?;
        let customer = self.customers.create(&draft.resolve(city)).await?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Replace name, address and city of an existing customer
    pub async fn update_customer(
        &self,
        id: CustomerId,
        draft: CustomerDraft,
    ) -> Result<Customer, AppError> {
        draft.validate()?;

        if !self.customers.exists(id).await? {
            return Err(DomainError::not_found("Customer", "id", id).into());
        }

        let city = self.resolve_city(draft.city_id).await?;
        let customer = self.customers.replace(id, &draft.resolve(city)).await?;

        tracing::info!(customer_id = %customer.id, "Customer updated");
        Ok(customer)
    }

    /// Delete a customer
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), AppError> {
        if !self.customers.exists(id).await? {
            return Err(DomainError::not_found("Customer", "id", id).into());
        }

        // A concurrent delete may have won; the customer is gone either way
        let removed = self.customers.delete(id).await?;
        if !removed {
            tracing::debug!(customer_id = %id, "Customer already deleted");
        }

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }

    /// Look up a referenced city, dropping the reference if it does not exist
    async fn resolve_city(&self, city_id: Option<CityId>) -> Result<Option<City>, AppError> {
        let Some(city_id) = city_id else {
            return Ok(None);
        };

        let city = self.cities.find_by_id(city_id).await?;
        if city.is_none() {
            tracing::debug!(city_id = %city_id, "Referenced city does not exist, dropping reference");
        }
        Ok(city)
    }
}
