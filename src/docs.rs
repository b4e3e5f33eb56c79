use utoipa::OpenApi;

use crate::common::response::ErrorResponse;
use crate::modules::jobs::dto::{TaskCreatedResponse, TaskStatusResponse, UploadUrlResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::jobs::handler::process_video,
        crate::modules::jobs::handler::get_status,
        crate::modules::jobs::handler::get_upload_url,
    ),
    components(
        schemas(
            TaskCreatedResponse,
            TaskStatusResponse,
            UploadUrlResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Jobs", description = "Subtitle job submission and polling")
    )
)]
pub struct ApiDoc;
