use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_movies))
        .route("/health", get(handlers::health_check))
        .route("/movies", get(handlers::get_movie_by_title))
        .route("/movies/:movie_id", get(handlers::get_movie_by_id))
        .route("/movie-recommendation", get(handlers::recommend))
        .route("/movie-poster", get(handlers::get_poster))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}
