use futures_util::StreamExt;
use lapin::options::BasicAckOptions;
use tracing::{error, info, warn};

use crate::modules::jobs::events::{SUBTITLE_QUEUE, SubtitleJob};
use crate::modules::jobs::store::JobStore;
use crate::pipeline::render::SubtitleRenderer;
use crate::pipeline::runner::{BlobStore, PipelineRunner};
use crate::pipeline::transcribe::Transcriber;
use crate::state::AppState;

pub async fn start_subtitle_worker<S, T, R>(
    state: AppState,
    runner: PipelineRunner<S, T, R>,
    worker_id: usize,
) where
    S: BlobStore,
    T: Transcriber,
    R: SubtitleRenderer,
{
    info!("🎬 Starting subtitle worker {}...", worker_id);

    let tag = format!("subtitle_worker_{worker_id}");
    let mut consumer = match state.queue.consume(SUBTITLE_QUEUE, &tag).await {
        Ok(consumer) => consumer,
        Err(e) => {
            error!(
                "❌ Worker {} failed to attach to '{}': {}",
                worker_id, SUBTITLE_QUEUE, e
            );
            return;
        }
    };

    info!(
        "🎬 Subtitle worker {} listening on '{}'",
        worker_id, SUBTITLE_QUEUE
    );

    while let Some(delivery) = consumer.next().await {
        if let Ok(delivery) = delivery {
            info!("📦 Received subtitle job");

            match serde_json::from_slice::<SubtitleJob>(&delivery.data) {
                Ok(message) => {
                    let job_id = message.job_id;
                    if let Err(e) = process_job(&state.jobs, &runner, message).await {
                        error!("❌ Subtitle job {} not processed: {}", job_id, e);
                    }
                }
                Err(e) => {
                    error!("❌ Failed to parse job message: {}", e);
                }
            }

            // Ack either way; a poison message must not loop forever.
            if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                error!("Failed to ack message: {}", e);
            }
        }
    }
}

/// Drives one claimed job to a terminal state. Pipeline failures are
/// recorded on the job, not returned; the Err path here is bookkeeping only
/// (store unreachable, unknown identity, duplicate delivery).
async fn process_job<S, T, R>(
    jobs: &JobStore,
    runner: &PipelineRunner<S, T, R>,
    message: SubtitleJob,
) -> anyhow::Result<()>
where
    S: BlobStore,
    T: Transcriber,
    R: SubtitleRenderer,
{
    let Some(mut job) = jobs.get(message.job_id).await? else {
        anyhow::bail!("no stored record for job {}", message.job_id);
    };

    if job.state.is_terminal() {
        anyhow::bail!("job {} already finished as {}", job.id, job.state);
    }

    job.start()?;
    jobs.save(&job).await?;

    info!(
        "🎬 Processing job {} ({} -> {})",
        job.id, job.input_key, job.output_key
    );

    let outcome = runner.run(&job.input_key, &job.output_key).await;
    match &outcome {
        Ok(result) => info!("✅ Job {} completed with {} segments", job.id, result.segments),
        Err(e) => warn!("Job {} failed: {}", job.id, e),
    }

    job.finish(outcome)?;
    if let Err(e) = jobs.save(&job).await {
        // One retry; a job must not stay visible as Running once decided.
        warn!("Retrying terminal save for job {}: {}", job.id, e);
        jobs.save(&job).await?;
    }

    Ok(())
}
