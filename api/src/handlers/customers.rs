//! Customer handlers
//!
//! CRUD and search endpoints for customers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::cities::CityResponse;
use super::extract::{AppJson, AppPath, AppQuery};
use crate::domain::entities::{CityId, Customer, CustomerDraft, CustomerId, CustomerSearch};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or replacing a customer.
///
/// An `id` field in the body is ignored; updates take the ID from the path.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city_id: Option<i64>,
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(request: CustomerRequest) -> Self {
        CustomerDraft {
            name: request.name.unwrap_or_default(),
            address: request.address,
            city_id: request.city_id.map(CityId),
        }
    }
}

/// Query parameters for the structured ID-or-name search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Query parameters for the customer-and-city text search
#[derive(Debug, Deserialize)]
pub struct TextSearchQuery {
    pub q: String,
}

/// Query parameters for the exact name lookup
#[derive(Debug, Deserialize)]
pub struct ByNameQuery {
    pub name: String,
}

/// Customer as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<CityResponse>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.0,
            name: customer.name,
            address: customer.address,
            city: customer.city.map(CityResponse::from),
        }
    }
}

/// Response body for a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn to_responses(customers: Vec<Customer>) -> Json<Vec<CustomerResponse>> {
    Json(customers.into_iter().map(CustomerResponse::from).collect())
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.list_customers().await?;
    Ok(to_responses(customers))
}

/// GET /api/customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state.customer_service.get_customer(CustomerId(id)).await?;
    Ok(Json(customer.into()))
}

/// POST /api/customers
///
/// Create a customer. An unknown `cityId` is dropped, not rejected.
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(request): AppJson<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let customer = state
        .customer_service
        .create_customer(request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// PUT /api/customers/:id
///
/// Replace name, address and city of an existing customer.
pub async fn update_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<CustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = state
        .customer_service
        .update_customer(CustomerId(id), request.into())
        .await?;

    Ok(Json(customer.into()))
}

/// DELETE /api/customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    state
        .customer_service
        .delete_customer(CustomerId(id))
        .await?;

    Ok(Json(DeleteResponse {
        message: "Customer deleted".to_string(),
    }))
}

/// GET /api/customers/search/:token
///
/// Match by name fragment, and by ID when the token is numeric.
pub async fn search_by_token(
    State(state): State<AppState>,
    AppPath(token): AppPath<String>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.search_by_token(&token).await?;
    Ok(to_responses(customers))
}

/// GET /api/customers/search?id=&name=
pub async fn search(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state
        .customer_service
        .search(CustomerSearch {
            id: query.id.map(CustomerId),
            name: query.name,
        })
        .await?;
    Ok(to_responses(customers))
}

/// GET /api/customers/text-search?q=
///
/// Match customer ID, customer name or city name.
pub async fn search_by_text(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TextSearchQuery>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.search_by_text(&query.q).await?;
    Ok(to_responses(customers))
}

/// GET /api/customers/by-name?name=
pub async fn find_by_name(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ByNameQuery>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers = state.customer_service.find_by_name(&query.name).await?;
    Ok(to_responses(customers))
}
