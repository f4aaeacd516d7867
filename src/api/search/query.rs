use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::ApiResponse;
use crate::error::SearchError;
use crate::state::AppState;
use super::types::*;

type SearchResult = Result<Json<ApiResponse<SearchPage>>, (StatusCode, Json<ApiResponse<()>>)>;

fn search_failure(e: SearchError) -> (StatusCode, Json<ApiResponse<()>>) {
    if e.is_client_error() {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(&e.to_string())));
    }
    tracing::error!("Search failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::with_code(500, "database error")),
    )
}

/// GET /api/search - 搜索问题和回答
pub async fn search_contents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchContentsParams>,
) -> SearchResult {
    let query = params.into_query(&state.search_config);
    let (list, total) = state.search.search_contents(&query).await.map_err(search_failure)?;
    Ok(Json(ApiResponse::success(SearchPage { total, list })))
}

/// GET /api/search/questions - 搜索问题
pub async fn search_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuestionsParams>,
) -> SearchResult {
    let query = params.into_query(&state.search_config);
    let (list, total) = state.search.search_questions(&query).await.map_err(search_failure)?;
    Ok(Json(ApiResponse::success(SearchPage { total, list })))
}

/// GET /api/search/answers - 搜索回答
pub async fn search_answers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchAnswersParams>,
) -> SearchResult {
    let query = params.into_query(&state.search_config);
    let (list, total) = state.search.search_answers(&query).await.map_err(search_failure)?;
    Ok(Json(ApiResponse::success(SearchPage { total, list })))
}
