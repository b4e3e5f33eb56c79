use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::common::response::ApiError;
use crate::error::JobError;
use crate::modules::jobs::dto::{
    FilenameQuery, TaskCreatedResponse, TaskStatusResponse, UploadUrlResponse,
};
use crate::modules::jobs::service::JobService;
use crate::state::AppState;

fn error_response(e: JobError) -> Response {
    let status = match &e {
        JobError::NotFound(_) => StatusCode::NOT_FOUND,
        JobError::InvalidFilename(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError(e.to_string(), status).into_response()
}

#[utoipa::path(
    post,
    path = "/api/process-video",
    params(
        ("filename" = String, Query, description = "Object name under uploads/ to subtitle")
    ),
    responses(
        (status = 200, description = "Job queued", body = TaskCreatedResponse),
        (status = 400, description = "Invalid filename"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs"
)]
pub async fn process_video(
    State(state): State<AppState>,
    Query(query): Query<FilenameQuery>,
) -> impl IntoResponse {
    match JobService::submit(state, &query.filename).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/status/{task_id}",
    params(
        ("task_id" = Uuid, Path, description = "Job identity returned by process-video")
    ),
    responses(
        (status = 200, description = "Current job status", body = TaskStatusResponse),
        (status = 404, description = "Unknown task"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs"
)]
pub async fn get_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    match JobService::status(state, task_id).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/upload-url",
    params(
        ("filename" = String, Query, description = "Object name to upload under uploads/")
    ),
    responses(
        (status = 200, description = "Presigned upload link", body = UploadUrlResponse),
        (status = 400, description = "Invalid filename"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs"
)]
pub async fn get_upload_url(
    State(state): State<AppState>,
    Query(query): Query<FilenameQuery>,
) -> impl IntoResponse {
    match JobService::upload_url(state, &query.filename).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => error_response(e),
    }
}
