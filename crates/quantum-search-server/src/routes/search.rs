//! Search Routes - web results from the provider

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::models::{ApiError, ErrorResponse, SearchParams, SearchResponse};
use crate::AppState;

/// Web search
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results in provider rank order", body = SearchResponse),
        (status = 400, description = "Missing or blank query", body = ErrorResponse),
        (status = 500, description = "Search provider failed", body = ErrorResponse)
    ),
    tag = "Search"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = params.q.unwrap_or_default();

    let page = state.gateway.fetch_search_results(&q).await.map_err(|e| {
        if !e.is_validation() {
            tracing::error!("Search API error for '{}': {}", q.trim(), e);
        }
        ApiError(e)
    })?;

    Ok(Json(page.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}
