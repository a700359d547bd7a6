use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats))
        .route("/genres", get(handlers::genres))
        // Collaborative filtering
        .route(
            "/users/:user_id/recommendations",
            get(handlers::recommend_for_user),
        )
        .route("/items/similar", get(handlers::similar_items))
        // Catalog filters
        .route("/movies/by-genres", get(handlers::movies_by_genres))
        .route("/movies/by-year/:year", get(handlers::movies_by_year))
        .route("/movies/by-decade/:decade", get(handlers::movies_by_decade))
}
