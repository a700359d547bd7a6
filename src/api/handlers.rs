use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieSummary, UserId},
    services::EngineStats,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarItemsQuery {
    pub title: String,
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GenresQuery {
    /// Comma-separated genre tags
    #[serde(default)]
    pub genres: String,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub user_id: UserId,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarItemsResponse {
    pub title: String,
    pub similar: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Dataset and matrix sizes
pub async fn stats(State(state): State<AppState>) -> Json<EngineStats> {
    Json(state.engine.stats())
}

/// Genre tags available for genre-based recommendations
pub async fn genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.engine.genres())
}

/// Collaborative filtering recommendations for a user
pub async fn recommend_for_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let n = state.limits.resolve(query.n)?;

    let recommendations = state.engine.recommend_movies(user_id, n);

    tracing::info!(
        request_id = %request_id,
        user_id,
        n,
        returned = recommendations.len(),
        "Collaborative recommendations served"
    );

    Ok(Json(RecommendationsResponse {
        user_id,
        recommendations,
    }))
}

/// Items most similar to a given title
pub async fn similar_items(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<SimilarItemsQuery>,
) -> AppResult<Json<SimilarItemsResponse>> {
    let n = state.limits.resolve(query.n)?;

    let similar = state.engine.get_similar_items(&query.title, n).map_err(|e| {
        tracing::warn!(request_id = %request_id, title = %query.title, "Unknown item title");
        e
    })?;

    Ok(Json(SimilarItemsResponse {
        title: query.title,
        similar,
    }))
}

/// Movies matching any of the requested genres
pub async fn movies_by_genres(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<GenresQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let n = state.limits.resolve(query.n)?;
    let genres: Vec<String> = query
        .genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect();

    let movies = state.engine.recommend_movies_by_genres(&genres, n);

    tracing::info!(
        request_id = %request_id,
        genres = ?genres,
        returned = movies.len(),
        "Genre recommendations served"
    );

    Ok(Json(movies))
}

/// Most popular movies released in a given year
pub async fn movies_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let n = state.limits.resolve(query.n)?;
    Ok(Json(state.engine.recommend_movies_by_release_year(year, n)))
}

/// Most popular movies released in the decade starting at `decade`
pub async fn movies_by_decade(
    State(state): State<AppState>,
    Path(decade): Path<i32>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let n = state.limits.resolve(query.n)?;
    Ok(Json(state.engine.recommend_movies_by_release_decade(decade, n)))
}
