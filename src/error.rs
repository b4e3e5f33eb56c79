use thiserror::Error;
use uuid::Uuid;

use crate::modules::jobs::model::JobState;

/// Errors from the blob store leaf (fetch, put, presigned links).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("download failed for {key}: {message}")]
    Download { key: String, message: String },

    #[error("upload failed for {key}: {message}")]
    Upload { key: String, message: String },

    #[error("presign failed for {key}: {message}")]
    Presign { key: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the speech-to-text leaf.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("failed to spawn {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transcription process failed: {0}")]
    Process(String),

    #[error("transcript output missing: {0}")]
    OutputMissing(String),

    #[error("failed to parse transcript: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the subtitle compositing leaf.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to spawn {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure inside one pipeline invocation. Caught once, at the worker
/// boundary, and recorded on the job as its Failed state.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors from the job queue and result store surface.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("task not found: {0}")]
    NotFound(Uuid),

    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("illegal state transition: {from} -> {to}")]
    InvalidTransition { from: JobState, to: JobState },

    #[error("failed to schedule job: {0}")]
    Queue(String),

    #[error("job store error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("job record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
