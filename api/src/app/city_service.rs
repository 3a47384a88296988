//! City service

use std::sync::Arc;

use crate::domain::entities::{City, CityDraft, CityId, NewCity};
use crate::domain::ports::CityRepository;
use crate::error::{AppError, DomainError};

/// Service for managing cities
pub struct CityService<CY>
where
    CY: CityRepository,
{
    cities: Arc<CY>,
}

impl<CY> CityService<CY>
where
    CY: CityRepository,
{
    pub fn new(cities: Arc<CY>) -> Self {
        Self { cities }
    }

    /// List every city
    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        Ok(self.cities.find_all().await?)
    }

    /// Get a city by ID
    pub async fn get_city(&self, id: CityId) -> Result<City, AppError> {
        self.cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("City", "id", id).into())
    }

    /// Create a new city
    pub async fn create_city(&self, draft: CityDraft) -> Result<City, AppError> {
        draft.validate()?;

        let state = draft
            .state
            .ok_or_else(|| DomainError::Internal("validated city has no state".to_string()))?;
        let city = self
            .cities
            .create(&NewCity {
                name: draft.name,
                state,
            })
            .await?;

        tracing::info!(city_id = %city.id, state = %city.state, "City created");
        Ok(city)
    }
}
