use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::ApiResponse;
use crate::error::FileError;
use crate::models::FileBlob;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetFileQuery {
    /// Attachment file name; inline when absent / 下载文件名
    #[serde(default)]
    pub download: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub id: String,
    pub size: i64,
    pub mime_type: String,
}

fn file_failure(e: FileError) -> Response {
    match e {
        FileError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::with_code(404, "file not found")),
        )
            .into_response(),
        FileError::Database(e) => {
            tracing::error!("File store error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::with_code(500, "database error")),
            )
                .into_response()
        }
    }
}

/// GET /api/files/:id - 获取文件内容
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<GetFileQuery>,
) -> Response {
    let blob = match state.files.get_by_id(&id).await {
        Ok(blob) => blob,
        Err(e) => return file_failure(e),
    };

    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(&blob.mime_type) {
        headers.insert(header::CONTENT_TYPE, v);
    }
    if let Some(name) = query.download.filter(|n| !n.is_empty()) {
        let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));
        if let Ok(v) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, v);
        }
    }

    // Content-Length follows the body
    (StatusCode::OK, headers, blob.content).into_response()
}

/// POST /api/files?name= - 上传文件（请求体即文件内容）
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if query.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error("文件名不能为空"))).into_response();
    }

    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let blob = FileBlob::new(query.name.trim(), mime_type, body.to_vec());

    if let Err(e) = state.files.save(&blob).await {
        return file_failure(e);
    }

    Json(ApiResponse::success(UploadResult {
        id: blob.id,
        size: blob.size,
        mime_type: blob.mime_type,
    }))
    .into_response()
}
