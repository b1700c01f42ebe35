//! HTTP API layer with Axum routes.
//!
//! Handlers are thin: they deserialize the request, call a repository and map
//! the outcome into the shared error taxonomy. All business rules live in
//! `viatour-core`; all transaction boundaries live in `viatour-db`.

pub mod error;
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

impl AppState {
    /// Clones the pooled connection for a repository.
    #[must_use]
    pub fn conn(&self) -> DatabaseConnection {
        self.db.as_ref().clone()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
