//! PostgreSQL adapter for CityRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::entities::{City, CityId, NewCity, StateCode};
use crate::domain::ports::CityRepository;
use crate::entity::cities;
use crate::error::DomainError;

/// PostgreSQL implementation of CityRepository
pub struct PostgresCityRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresCityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CityRepository for PostgresCityRepository {
    async fn find_by_id(&self, id: CityId) -> Result<Option<City>, DomainError> {
        let result = cities::Entity::find_by_id(id.0)
            .one(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(City::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<City>, DomainError> {
        let results = cities::Entity::find()
            .order_by_asc(cities::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(City::try_from).collect()
    }

    async fn create(&self, city: &NewCity) -> Result<City, DomainError> {
        let model = cities::ActiveModel {
            name: Set(city.name.clone()),
            state: Set(city.state.code().to_string()),
            ..Default::default()
        };

        let result = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        City::try_from(result)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<cities::Model> for City {
    type Error = DomainError;

    fn try_from(model: cities::Model) -> Result<Self, Self::Error> {
        let state = model.state.parse::<StateCode>().map_err(|e| {
            DomainError::Internal(format!("City {} has an invalid state: {}", model.id, e))
        })?;

        Ok(City {
            id: CityId(model.id),
            name: model.name,
            state,
        })
    }
}
