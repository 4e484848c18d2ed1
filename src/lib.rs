use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use store::SharedStore;

/// Assemble the service router around a store handle.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/access",
            post(handlers::access::record).get(handlers::access::list),
        )
        .route("/api/updateStatus", post(handlers::users::update_status))
        .route("/api/addUser", post(handlers::users::add_user))
        // Static assets from public/ share the server with the API
        .fallback_service(ServeDir::new("public"))
        // Global middleware
        .layer(Extension(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
