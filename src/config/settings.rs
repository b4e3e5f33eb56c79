use crate::config::env::{self, EnvKey};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub amqp_url: String,
    pub redis_url: String,
    pub minio_url: String,
    pub minio_bucket: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    pub whisper_bin: String,
    pub whisper_model: String,
    pub whisper_language: String,
    pub ffmpeg_bin: String,
    pub worker_count: usize,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            amqp_url: env::get(EnvKey::AmqpUrl)?,
            redis_url: env::get(EnvKey::RedisUrl)?,
            minio_url: env::get(EnvKey::MinioUrl)?,
            minio_bucket: env::get(EnvKey::MinioBucket)?,
            minio_access_key: env::get(EnvKey::MinioAccessKey)?,
            minio_secret_key: env::get(EnvKey::MinioSecretKey)?,
            whisper_bin: env::get_or(EnvKey::WhisperBin, "whisper"),
            whisper_model: env::get_or(EnvKey::WhisperModel, "large"),
            whisper_language: env::get_or(EnvKey::WhisperLanguage, "ja"),
            ffmpeg_bin: env::get_or(EnvKey::FfmpegBin, "ffmpeg"),
            worker_count: env::get_parsed(EnvKey::WorkerCount, 2),
        })
    }
}
