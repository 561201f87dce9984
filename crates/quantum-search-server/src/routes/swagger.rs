//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{ErrorResponse, SearchResponse, SummaryResponse};
use quantum_search::{AiSummary, SearchResultItem};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::search::search,
        super::summary::ai_summary,
    ),
    components(schemas(
        SearchResponse,
        SummaryResponse,
        ErrorResponse,
        SearchResultItem,
        AiSummary,
    )),
    tags(
        (name = "Search", description = "Web search results"),
        (name = "Summary", description = "AI-generated summary and key points"),
    ),
    info(
        title = "Quantum Search API",
        description = "Web search paired with AI-generated insights",
    )
)]
pub struct ApiDoc;
