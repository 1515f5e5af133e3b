//! Message types for tempo worker communication.

use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::{Result, StretchError};
use crate::time_stretch::TempoJob;

/// Unique identifier for a dispatched job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

impl JobId {
    /// Generate a new unique job ID.
    pub fn generate() -> Self {
        use std::sync::atomic::AtomicU64;
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Lifecycle of one job. `Idle` is the state before dispatch, so a live
/// handle never reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JobState {
    Idle = 0,
    Dispatched = 1,
    Processing = 2,
    Completed = 3,
    Failed = 4,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => JobState::Dispatched,
            2 => JobState::Processing,
            3 => JobState::Completed,
            4 => JobState::Failed,
            _ => JobState::Idle,
        }
    }
}

/// Job state shared between the worker and the job's handle.
#[derive(Debug, Clone)]
pub(crate) struct SharedJobState(Arc<AtomicU8>);

impl SharedJobState {
    pub(crate) fn new(state: JobState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    pub(crate) fn load(&self) -> JobState {
        JobState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: JobState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Reply from the worker: exactly one per job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Stretched mono samples at the job's sample rate
    Completed(Vec<f32>),
    /// Human-readable failure description
    Failed(String),
}

impl JobOutcome {
    pub fn into_result(self) -> Result<Vec<f32>> {
        match self {
            JobOutcome::Completed(samples) => Ok(samples),
            JobOutcome::Failed(message) => Err(StretchError::Failed(message)),
        }
    }
}

/// Command sent to the tempo worker
pub(crate) enum WorkerCommand {
    /// Stretch one job and reply on its private channel
    Stretch {
        id: JobId,
        job: TempoJob,
        state: SharedJobState,
        reply: Sender<JobOutcome>,
    },
    /// Shutdown the worker thread
    Shutdown,
}

impl std::fmt::Debug for WorkerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCommand::Stretch { id, job, .. } => f
                .debug_struct("Stretch")
                .field("id", id)
                .field("samples", &job.buffer.len())
                .field("sample_rate", &job.sample_rate)
                .field("tempo", &job.tempo)
                .finish(),
            WorkerCommand::Shutdown => write!(f, "Shutdown"),
        }
    }
}
