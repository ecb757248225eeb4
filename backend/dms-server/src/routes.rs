use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Document endpoints (bearer token required via the Identity
        // extractor inside each handler)
        .route("/documents", post(crate::create_document))
        .route(
            "/documents/{id}",
            get(crate::get_document)
                .put(crate::update_document)
                .delete(crate::delete_document),
        )
        // Health endpoints carry no tenant scope
        .route("/health", get(health::liveness))
        .route("/health/detailed", get(health::readiness))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
