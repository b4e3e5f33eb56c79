use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{JobError, PipelineError};
use crate::pipeline::runner::JobResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of submit-to-completion work. The identity is assigned at
/// creation and immutable; the state only moves forward:
/// Pending → Running → Succeeded | Failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub input_key: String,
    pub output_key: String,
    pub state: JobState,
    pub result: Option<JobResult>,
    pub error: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Job {
    pub fn new(input_key: String, output_key: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            input_key,
            output_key,
            state: JobState::Pending,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Pending → Running. The broker hands each message to one consumer; a
    /// duplicate delivery of the same identity is rejected here.
    pub fn start(&mut self) -> Result<(), JobError> {
        self.transition(JobState::Running)
    }

    /// Running → terminal, recording the payload or the failure message.
    /// This is the single catch boundary for pipeline errors.
    pub fn finish(&mut self, outcome: Result<JobResult, PipelineError>) -> Result<(), JobError> {
        match outcome {
            Ok(result) => {
                self.transition(JobState::Succeeded)?;
                self.result = Some(result);
            }
            Err(e) => {
                self.transition(JobState::Failed)?;
                self.error = Some(e.to_string());
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: JobState) -> Result<(), JobError> {
        let allowed = matches!(
            (self.state, next),
            (JobState::Pending, JobState::Running)
                | (JobState::Running, JobState::Succeeded)
                | (JobState::Running, JobState::Failed)
        );

        if !allowed {
            return Err(JobError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        self.state = next;
        self.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }
}
