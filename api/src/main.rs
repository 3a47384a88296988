//! Customer Registry API Server
//!
//! CRUD and search over customers and the cities they live in.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod middleware;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresCityRepository, PostgresCustomerRepository};
use app::{CityService, CustomerService, SeedService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service:
        Arc<CustomerService<PostgresCustomerRepository, PostgresCityRepository>>,
    pub city_service: Arc<CityService<PostgresCityRepository>>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let customer_repo = Arc::new(PostgresCustomerRepository::new(db.clone()));
        let city_repo = Arc::new(PostgresCityRepository::new(db));

        Self {
            customer_service: Arc::new(CustomerService::new(customer_repo, city_repo.clone())),
            city_service: Arc::new(CityService::new(city_repo)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router with every route and middleware layer
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Customers
        .route(
            "/api/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route("/api/customers/search", get(handlers::search))
        .route(
            "/api/customers/search/:token",
            get(handlers::search_by_token),
        )
        .route("/api/customers/text-search", get(handlers::search_by_text))
        .route("/api/customers/by-name", get(handlers::find_by_name))
        .route(
            "/api/customers/:id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        // Cities
        .route(
            "/api/cities",
            get(handlers::list_cities).post(handlers::create_city),
        )
        .route("/api/cities/:id", get(handlers::get_city))
        .route(
            "/api/cities/:id/customers",
            get(handlers::list_city_customers),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::route_not_found)
        // Middleware
        .layer(axum::middleware::from_fn(middleware::stamp_error_path))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,customer_registry_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Customer Registry API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .context("Failed to connect to database")?,
    );
    tracing::info!("Database connected");

    adapters::postgres::ensure_schema(db.as_ref())
        .await
        .context("Failed to create tables")?;

    if config.seed_data {
        let seed = SeedService::new(Arc::new(PostgresCustomerRepository::new(db.clone())));
        seed.seed_if_empty()
            .await
            .context("Failed to insert seed data")?;
    }

    let app = build_router(AppState::new(db));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
