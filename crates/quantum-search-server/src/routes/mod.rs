//! Quantum Search API Routes
//!
//! - /api/search - Web search results
//! - /api/ai-summary - AI-generated summary and key points
//! - /health - Liveness
//! - /swagger-ui - OpenAPI documentation

pub mod search;
pub mod summary;
pub mod swagger;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(crate::health_check))
        .merge(search::router())
        .merge(summary::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
