use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MovieRecord, PosterResponse, Recommendation},
    services::posters::enrich_with_posters,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub movie_title: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub movie_title: String,
    /// Adds a `poster_url` to every result
    #[serde(default)]
    pub with_posters: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let engine = state.engine.current().await;
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "movies": engine.corpus().len() })),
    )
}

/// First records of the corpus
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieRecord>> {
    let engine = state.engine.current().await;
    Json(engine.corpus().excerpt(state.excerpt_size).to_vec())
}

/// Single movie by its numeric id
pub async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieRecord>> {
    let engine = state.engine.current().await;
    engine
        .movie_by_id(movie_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
}

/// Single movie by exact title, first occurrence wins
pub async fn get_movie_by_title(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<MovieRecord>> {
    let engine = state.engine.current().await;
    engine
        .movie_by_title(&params.movie_title)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} not found", params.movie_title)))
}

/// Movies similar to the given title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    tracing::info!(
        request_id = %request_id,
        title = %params.movie_title,
        with_posters = params.with_posters,
        "Processing recommendation request"
    );

    let engine = state.engine.current().await;
    let top_n = state.max_recommendations;
    let title = params.movie_title.clone();
    let recommendations = tokio::task::spawn_blocking(move || engine.recommend(&title, top_n))
        .await
        .map_err(|e| AppError::Internal(format!("Recommendation task failed: {}", e)))??;

    let recommendations = if params.with_posters {
        enrich_with_posters(state.posters.clone(), recommendations).await
    } else {
        recommendations
    };

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(recommendations))
}

/// Poster image for a corpus title
pub async fn get_poster(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<PosterResponse>> {
    let engine = state.engine.current().await;
    let movie = engine
        .movie_by_title(&params.movie_title)
        .ok_or_else(|| AppError::NotFound(format!("{} not found", params.movie_title)))?;

    let poster_url = state.posters.poster_url(&movie.title).await;
    Ok(Json(PosterResponse {
        title: movie.title.clone(),
        poster_url,
    }))
}
