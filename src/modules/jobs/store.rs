use redis::AsyncCommands;
use uuid::Uuid;

use super::model::Job;
use crate::error::JobError;
use crate::infrastructure::redis::client::RedisService;

/// Records expire a day after their last transition, matching the result
/// lifetime of the task broker this store replaces.
const JOB_TTL_SECONDS: u64 = 86_400;

/// Redis-backed result store. Every write is a whole-record snapshot, so a
/// concurrent `get` sees either the previous or the new state of a job,
/// never a partial one.
#[derive(Clone)]
pub struct JobStore {
    redis: RedisService,
}

impl JobStore {
    pub fn new(redis: RedisService) -> Self {
        Self { redis }
    }

    fn key(id: Uuid) -> String {
        format!("jobs:{id}")
    }

    pub async fn save(&self, job: &Job) -> Result<(), JobError> {
        let mut conn = self.redis.get_conn().await?;
        let payload = serde_json::to_string(job)?;
        conn.set_ex::<_, _, ()>(Self::key(job.id), payload, JOB_TTL_SECONDS)
            .await?;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Job>, JobError> {
        let mut conn = self.redis.get_conn().await?;
        let raw: Option<String> = conn.get(Self::key(id)).await?;
        raw.map(|snapshot| serde_json::from_str(&snapshot))
            .transpose()
            .map_err(Into::into)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), JobError> {
        let mut conn = self.redis.get_conn().await?;
        conn.del::<_, ()>(Self::key(id)).await?;
        Ok(())
    }
}
