//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the eight Spesa entities
//! - The pay-expense evaluation endpoint
//! - Response types carrying the wire field names existing clients expect

pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
}

/// Creates the main application router.
///
/// Routes are mounted at the root, matching the paths deployed clients
/// already call; there is no version prefix.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
