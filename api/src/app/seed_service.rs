//! Seed service
//!
//! Inserts a small demo data set on first start: five cities across
//! different states and one customer living in each.

use std::sync::Arc;

use crate::domain::entities::{NewCity, NewResident, StateCode};
use crate::domain::ports::CustomerRepository;
use crate::error::AppError;

/// Seed cities as (name, state)
pub const SEED_CITIES: [(&str, StateCode); 5] = [
    ("São Paulo", StateCode::Sp),
    ("Rio de Janeiro", StateCode::Rj),
    ("Belo Horizonte", StateCode::Mg),
    ("Salvador", StateCode::Ba),
    ("Fortaleza", StateCode::Ce),
];

/// Seed customers as (name, address); the i-th customer lives in the i-th city
pub const SEED_CUSTOMERS: [(&str, &str); 5] = [
    ("Danilo", "Av. Paulista, 1000"),
    ("Maria", "Rua Copacabana, 500"),
    ("João", "Av. Afonso Pena, 123"),
    ("Ana", "Rua Chile, 45"),
    ("Pedro", "Av. Beira Mar, 789"),
];

pub struct SeedService<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
}

impl<CR> SeedService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>) -> Self {
        Self { customers }
    }

    /// Insert the demo data unless any customer already exists.
    ///
    /// All rows go in as one unit, so a failed seed leaves the store empty
    /// and the next start tries again. Returns whether anything was inserted.
    pub async fn seed_if_empty(&self) -> Result<bool, AppError> {
        let existing = self.customers.count().await?;
        if existing > 0 {
            tracing::info!(customers = existing, "Store not empty, skipping seed data");
            return Ok(false);
        }

        let residents: Vec<NewResident> = SEED_CITIES
            .into_iter()
            .zip(SEED_CUSTOMERS)
            .map(|((city_name, state), (name, address))| NewResident {
                name: name.to_string(),
                address: Some(address.to_string()),
                city: NewCity {
                    name: city_name.to_string(),
                    state,
                },
            })
            .collect();

        let created = self.customers.create_with_cities(&residents).await?;

        tracing::info!(
            cities = SEED_CITIES.len(),
            customers = created.len(),
            "Seed data inserted"
        );
        Ok(true)
    }
}
