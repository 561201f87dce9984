//! AI Summary Routes - summary and key points for a query

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::models::{ApiError, ErrorResponse, SearchParams, SummaryResponse};
use crate::AppState;

/// AI summary
#[utoipa::path(
    get,
    path = "/api/ai-summary",
    params(SearchParams),
    responses(
        (status = 200, description = "Summary with up to five key points", body = SummaryResponse),
        (status = 400, description = "Missing or blank query", body = ErrorResponse),
        (status = 500, description = "AI provider failed or returned nothing", body = ErrorResponse)
    ),
    tag = "Summary"
)]
pub async fn ai_summary(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let q = params.q.unwrap_or_default();

    let summary = state.gateway.fetch_ai_summary(&q).await.map_err(|e| {
        if !e.is_validation() {
            tracing::error!("AI Summary API error for '{}': {}", q.trim(), e);
        }
        ApiError(e)
    })?;

    Ok(Json(SummaryResponse::new(q.trim(), summary)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/ai-summary", get(ai_summary))
}
