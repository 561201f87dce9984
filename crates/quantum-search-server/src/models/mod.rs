//! API request/response models
//!
//! Envelopes follow the `{success, ...}` shape the front-ends consume.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use quantum_search::{AiSummary, DomainError, SearchPage, SearchResultItem};

/// `?q=` query string shared by both endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search query (required, must not be blank)
    pub q: Option<String>,
}

/// Successful search response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

impl From<SearchPage> for SearchResponse {
    fn from(page: SearchPage) -> Self {
        Self {
            success: true,
            query: page.query,
            total_results: page.total_results,
            results: page.results,
        }
    }
}

/// Successful AI summary response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub success: bool,
    pub query: String,
    pub data: AiSummary,
}

impl SummaryResponse {
    pub fn new(query: impl Into<String>, data: AiSummary) -> Self {
        Self {
            success: true,
            query: query.into(),
            data,
        }
    }
}

/// Failure envelope for 400 and 500 responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Domain error rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}
