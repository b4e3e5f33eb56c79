use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub mod dto;
pub mod events;
pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process-video", post(handler::process_video))
        .route("/status/{task_id}", get(handler::get_status))
        .route("/upload-url", get(handler::get_upload_url))
}
