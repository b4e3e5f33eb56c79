use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct FilenameQuery {
    pub filename: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedResponse {
    pub task_id: Uuid,
}

/// Poll result. `downloadUrl` is present only once the job has completed.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskStatusResponse {
    pub status: String,
    #[serde(rename = "downloadUrl", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl TaskStatusResponse {
    pub fn processing() -> Self {
        Self {
            status: "processing".to_string(),
            download_url: None,
        }
    }

    pub fn completed(download_url: String) -> Self {
        Self {
            status: "completed".to_string(),
            download_url: Some(download_url),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: "failed".to_string(),
            download_url: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadUrlResponse {
    pub url: String,
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_id_serializes_camel_cased() {
        let id = Uuid::new_v4();
        let body = serde_json::to_value(TaskCreatedResponse { task_id: id }).unwrap();
        assert_eq!(body, json!({ "taskId": id.to_string() }));
    }

    #[test]
    fn processing_and_failed_omit_the_download_url() {
        assert_eq!(
            serde_json::to_value(TaskStatusResponse::processing()).unwrap(),
            json!({ "status": "processing" })
        );
        assert_eq!(
            serde_json::to_value(TaskStatusResponse::failed()).unwrap(),
            json!({ "status": "failed" })
        );
    }

    #[test]
    fn completed_carries_the_download_url() {
        let body = serde_json::to_value(TaskStatusResponse::completed(
            "http://minio/processed/clip.mp4?sig=abc".to_string(),
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "status": "completed",
                "downloadUrl": "http://minio/processed/clip.mp4?sig=abc"
            })
        );
    }
}
