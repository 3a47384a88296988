//! City handlers
//!
//! Endpoints for listing, reading and creating cities.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::customers::CustomerResponse;
use super::extract::{AppJson, AppPath};
use crate::domain::entities::{City, CityDraft, CityId, StateCode};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a city
#[derive(Debug, Deserialize)]
pub struct CreateCityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<StateCode>,
}

/// City as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityResponse {
    pub id: i64,
    pub name: String,
    pub state: StateCode,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id.0,
            name: city.name,
            state: city.state,
        }
    }
}

/// GET /api/cities
///
/// List every city.
pub async fn list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityResponse>>, AppError> {
    let cities = state.city_service.list_cities().await?;
    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}

/// GET /api/cities/:id
pub async fn get_city(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CityResponse>, AppError> {
    let city = state.city_service.get_city(CityId(id)).await?;
    Ok(Json(city.into()))
}

/// POST /api/cities
///
/// Create a city. Responds 201 with the stored city.
pub async fn create_city(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateCityRequest>,
) -> Result<(StatusCode, Json<CityResponse>), AppError> {
    let city = state
        .city_service
        .create_city(CityDraft {
            name: request.name.unwrap_or_default(),
            state: request.state,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(city.into())))
}

/// GET /api/cities/:id/customers
///
/// Customers living in the given city.
pub async fn list_city_customers(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.list_by_city(CityId(id)).await?;
    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}
