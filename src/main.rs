use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod error;
mod infrastructure;
mod modules;
mod pipeline;
mod routes;
mod state;
mod workers;

use crate::config::settings::AppConfig;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::infrastructure::redis::client::RedisService;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::jobs::store::JobStore;
use crate::pipeline::render::FfmpegRenderer;
use crate::pipeline::runner::PipelineRunner;
use crate::pipeline::transcribe::WhisperCli;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().expect("Missing required environment configuration");

    let storage = StorageService::new(
        &config.minio_url,
        &config.minio_bucket,
        &config.minio_access_key,
        &config.minio_secret_key,
    )
    .await;
    let redis = RedisService::new(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");
    let queue = RabbitMqService::new(&config.amqp_url)
        .await
        .expect("Failed to connect to RabbitMQ");

    let jobs = JobStore::new(redis);
    let state = AppState::new(config.clone(), storage, queue, jobs);

    // Process-wide leaf singletons, loaded once and injected into each worker.
    let transcriber = WhisperCli::new(&config);
    let renderer = FfmpegRenderer::new(&config);

    for worker_id in 0..config.worker_count {
        let runner = PipelineRunner::new(
            state.storage.clone(),
            transcriber.clone(),
            renderer.clone(),
        );
        tokio::spawn(workers::subtitle::start_subtitle_worker(
            state.clone(),
            runner,
            worker_id,
        ));
    }

    let app = app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}
