//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    City, CityId, Customer, CustomerId, NewCity, NewCustomer, NewResident,
};
use crate::domain::ports::{CityRepository, CustomerRepository};
use crate::error::DomainError;

/// Case-insensitive substring test, the in-memory stand-in for `LOWER(x) LIKE`
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================================================
// In-Memory City Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCityRepository {
    cities: RwLock<BTreeMap<CityId, City>>,
    last_id: AtomicI64,
}

impl InMemoryCityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a city for testing
    pub fn with_city(self, city: City) -> Self {
        self.last_id.fetch_max(city.id.0, Ordering::SeqCst);
        self.cities.write().unwrap().insert(city.id, city);
        self
    }

    /// Drop a city without touching customers that reference it
    pub fn remove(&self, id: CityId) {
        self.cities.write().unwrap().remove(&id);
    }

    fn get(&self, id: CityId) -> Option<City> {
        self.cities.read().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl CityRepository for InMemoryCityRepository {
    async fn find_by_id(&self, id: CityId) -> Result<Option<City>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<City>, DomainError> {
        Ok(self.cities.read().unwrap().values().cloned().collect())
    }

    async fn create(&self, new_city: &NewCity) -> Result<City, DomainError> {
        let id = CityId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let city = City {
            id,
            name: new_city.name.clone(),
            state: new_city.state,
        };
        self.cities.write().unwrap().insert(id, city.clone());
        Ok(city)
    }
}

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

/// A customer row as stored: the city is only a reference
#[derive(Debug, Clone)]
struct CustomerRow {
    name: String,
    address: Option<String>,
    city_id: Option<CityId>,
}

pub struct InMemoryCustomerRepository {
    rows: RwLock<BTreeMap<CustomerId, CustomerRow>>,
    cities: Arc<InMemoryCityRepository>,
    last_id: AtomicI64,
    writes: AtomicUsize,
}

impl InMemoryCustomerRepository {
    /// Customers join against the given city repository on every read
    pub fn new(cities: Arc<InMemoryCityRepository>) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            cities,
            last_id: AtomicI64::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        self.last_id.fetch_max(customer.id.0, Ordering::SeqCst);
        self.rows.write().unwrap().insert(
            customer.id,
            CustomerRow {
                name: customer.name,
                address: customer.address,
                city_id: customer.city.map(|c| c.id),
            },
        );
        self
    }

    /// Number of create/replace/delete calls that changed the store
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn join(&self, id: CustomerId, row: &CustomerRow) -> Customer {
        Customer {
            id,
            name: row.name.clone(),
            address: row.address.clone(),
            city: row.city_id.and_then(|city_id| self.cities.get(city_id)),
        }
    }

    fn select<F>(&self, predicate: F) -> Vec<Customer>
    where
        F: Fn(&Customer) -> bool,
    {
        let rows = self.rows.read().unwrap();
        rows.iter()
            .map(|(id, row)| self.join(*id, row))
            .filter(|c| predicate(c))
            .collect()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let rows = self.rows.read().unwrap();
        Ok(rows.get(&id).map(|row| self.join(id, row)))
    }

    async fn exists(&self, id: CustomerId) -> Result<bool, DomainError> {
        Ok(self.rows.read().unwrap().contains_key(&id))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.rows.read().unwrap().len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.select(|_| true))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, DomainError> {
        Ok(self.select(|c| c.name == name))
    }

    async fn find_by_city(&self, city_id: CityId) -> Result<Vec<Customer>, DomainError> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .iter()
            .filter(|(_, row)| row.city_id == Some(city_id))
            .map(|(id, row)| self.join(*id, row))
            .collect())
    }

    async fn search_by_id_or_name(
        &self,
        id: Option<CustomerId>,
        name: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError> {
        Ok(self.select(|c| {
            id == Some(c.id) || name.is_some_and(|n| contains_ignore_case(&c.name, n))
        }))
    }

    async fn search_with_city(
        &self,
        text: &str,
        id: Option<CustomerId>,
    ) -> Result<Vec<Customer>, DomainError> {
        Ok(self.select(|c| {
            id == Some(c.id)
                || contains_ignore_case(&c.name, text)
                || c
                    .city
                    .as_ref()
                    .is_some_and(|city| contains_ignore_case(&city.name, text))
        }))
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let id = CustomerId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let row = CustomerRow {
            name: customer.name.clone(),
            address: customer.address.clone(),
            city_id: customer.city_id(),
        };

        let created = self.join(id, &row);
        self.rows.write().unwrap().insert(id, row);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn create_with_cities(
        &self,
        residents: &[NewResident],
    ) -> Result<Vec<Customer>, DomainError> {
        let mut created = Vec::with_capacity(residents.len());
        for resident in residents {
            let city = self.cities.create(&resident.city).await?;
            created.push(
                self.create(&NewCustomer {
                    name: resident.name.clone(),
                    address: resident.address.clone(),
                    city: Some(city),
                })
                .await?,
            );
        }
        Ok(created)
    }

    async fn replace(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Customer, DomainError> {
        let mut rows = self.rows.write().unwrap();
        let Some(existing) = rows.get_mut(&id) else {
            return Err(DomainError::not_found("Customer", "id", id));
        };

        *existing = CustomerRow {
            name: customer.name.clone(),
            address: customer.address.clone(),
            city_id: customer.city_id(),
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.join(id, existing))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, DomainError> {
        let removed = self.rows.write().unwrap().remove(&id).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignore_case_matches_accents_and_case() {
        assert!(contains_ignore_case("São Paulo", "paulo"));
        assert!(contains_ignore_case("São Paulo", "SÃO"));
        assert!(!contains_ignore_case("Salvador", "paulo"));
    }
}
