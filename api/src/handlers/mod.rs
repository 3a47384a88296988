//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod cities;
pub mod customers;
pub mod extract;

pub use cities::{create_city, get_city, list_cities, list_city_customers, CityResponse};
pub use customers::{
    create_customer, delete_customer, find_by_name, get_customer, list_customers, search,
    search_by_text, search_by_token, update_customer, CustomerResponse,
};

use axum::http::Method;

use crate::error::AppError;

/// Fallback for paths no route matches
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// Fallback for a known path requested with an unsupported method
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
