use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use super::dto::{TaskCreatedResponse, TaskStatusResponse, UploadUrlResponse};
use super::events::{SUBTITLE_QUEUE, SubtitleJob};
use super::model::{Job, JobState};
use crate::error::JobError;
use crate::state::AppState;

/// Download links handed out by the status endpoint stay valid for an hour.
const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(3600);
/// Upload links are short-lived; the client is expected to PUT immediately.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(600);

pub struct JobService;

impl JobService {
    /// Object keys live in a flat namespace under fixed prefixes, so the
    /// filename must not carry path components.
    fn validate_filename(filename: &str) -> Result<(), JobError> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(JobError::InvalidFilename(filename.to_string()));
        }
        Ok(())
    }

    fn object_keys(filename: &str) -> (String, String) {
        (
            format!("uploads/{filename}"),
            format!("processed/{filename}"),
        )
    }

    /// Stores a Pending job and schedules it on the queue. Never waits for
    /// execution. A filename may be submitted any number of times; each
    /// submission is a fresh job with a fresh identity.
    pub async fn submit(state: AppState, filename: &str) -> Result<TaskCreatedResponse, JobError> {
        Self::validate_filename(filename)?;

        let (input_key, output_key) = Self::object_keys(filename);
        let job = Job::new(input_key, output_key);
        state.jobs.save(&job).await?;

        let message = SubtitleJob {
            job_id: job.id,
            input_key: job.input_key.clone(),
            output_key: job.output_key.clone(),
        };
        let payload = serde_json::to_vec(&message)?;

        if let Err(e) = state.queue.publish(SUBTITLE_QUEUE, &payload).await {
            // A job that was never scheduled must not sit in Pending forever.
            let _ = state.jobs.delete(job.id).await;
            return Err(JobError::Queue(e.to_string()));
        }

        info!("📬 Queued subtitle job {} for '{}'", job.id, filename);
        Ok(TaskCreatedResponse { task_id: job.id })
    }

    pub async fn status(state: AppState, task_id: Uuid) -> Result<TaskStatusResponse, JobError> {
        let job = state
            .jobs
            .get(task_id)
            .await?
            .ok_or(JobError::NotFound(task_id))?;

        match job.state {
            JobState::Pending | JobState::Running => Ok(TaskStatusResponse::processing()),
            JobState::Failed => Ok(TaskStatusResponse::failed()),
            JobState::Succeeded => {
                // Always presigned from the key the job actually wrote.
                let url = state
                    .storage
                    .presign_get(&job.output_key, DOWNLOAD_URL_TTL)
                    .await?;
                Ok(TaskStatusResponse::completed(url))
            }
        }
    }

    pub async fn upload_url(state: AppState, filename: &str) -> Result<UploadUrlResponse, JobError> {
        Self::validate_filename(filename)?;

        let key = format!("uploads/{filename}");
        let url = state.storage.presign_put(&key, UPLOAD_URL_TTL).await?;
        Ok(UploadUrlResponse { url, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_derived_from_the_filename() {
        let (input, output) = JobService::object_keys("clip.mp4");
        assert_eq!(input, "uploads/clip.mp4");
        assert_eq!(output, "processed/clip.mp4");
    }

    #[test]
    fn empty_filenames_are_rejected() {
        assert!(matches!(
            JobService::validate_filename(""),
            Err(JobError::InvalidFilename(_))
        ));
    }

    #[test]
    fn path_components_are_rejected() {
        for filename in ["../secrets.mp4", "a/b.mp4", "a\\b.mp4", ".."] {
            assert!(
                JobService::validate_filename(filename).is_err(),
                "{filename:?} should be rejected"
            );
        }
    }

    #[test]
    fn plain_filenames_pass_validation() {
        assert!(JobService::validate_filename("clip.mp4").is_ok());
        assert!(JobService::validate_filename("夏の動画.mp4").is_ok());
    }
}
