use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SUBTITLE_QUEUE: &str = "subtitle_jobs";

/// Queue message scheduling one stored job for execution.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubtitleJob {
    pub job_id: Uuid,
    pub input_key: String,
    pub output_key: String,
}
