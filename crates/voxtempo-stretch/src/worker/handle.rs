//! Handle to a dispatched tempo job.

use crossbeam_channel::{Receiver, TryRecvError};
use std::time::Duration;

use super::request::{JobId, JobOutcome, JobState, SharedJobState};
use crate::error::{Result, StretchError};

/// Handle to one in-flight job.
///
/// Created by [`StretchEngine::dispatch()`](super::StretchEngine::dispatch).
/// The reply channel is private to this job, so results can never be
/// delivered to the wrong caller.
///
/// # Example
/// ```ignore
/// let mut handle = engine.dispatch(TempoJob::new(samples, 24000, 1.5))?;
///
/// // Poll without blocking
/// loop {
///     if let Some(result) = handle.try_wait() {
///         let stretched = result?;
///         break;
///     }
///     // ... keep the UI responsive ...
/// }
/// ```
#[derive(Debug)]
pub struct StretchHandle {
    id: JobId,
    state: SharedJobState,
    reply_rx: Option<Receiver<JobOutcome>>,
}

impl StretchHandle {
    pub(crate) fn new(id: JobId, state: SharedJobState, reply_rx: Receiver<JobOutcome>) -> Self {
        Self {
            id,
            state,
            reply_rx: Some(reply_rx),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Current lifecycle state (non-blocking).
    pub fn state(&self) -> JobState {
        self.state.load()
    }

    /// Check if the job has reached a terminal state (non-blocking).
    pub fn is_done(&self) -> bool {
        self.state().is_terminal()
    }

    /// Poll for the outcome (non-blocking).
    ///
    /// Returns `Some` exactly once, when the outcome arrives; `None` before
    /// that and after it has been taken.
    pub fn try_wait(&mut self) -> Option<Result<Vec<f32>>> {
        let rx = self.reply_rx.as_ref()?;
        let result = match rx.try_recv() {
            Ok(outcome) => outcome.into_result(),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(StretchError::WorkerGone),
        };
        self.reply_rx = None;
        Some(result)
    }

    /// Block until the outcome arrives or `timeout` elapses.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<Result<Vec<f32>>> {
        let rx = self.reply_rx.as_ref()?;
        let result = match rx.recv_timeout(timeout) {
            Ok(outcome) => outcome.into_result(),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => return None,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                Err(StretchError::WorkerGone)
            }
        };
        self.reply_rx = None;
        Some(result)
    }

    /// Block until the job finishes and return its result.
    pub fn wait(mut self) -> Result<Vec<f32>> {
        match self.reply_rx.take() {
            Some(rx) => match rx.recv() {
                Ok(outcome) => outcome.into_result(),
                Err(_) => Err(StretchError::WorkerGone),
            },
            None => Err(StretchError::WorkerGone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn handle() -> (StretchHandle, crossbeam_channel::Sender<JobOutcome>) {
        let (tx, rx) = bounded(1);
        let state = SharedJobState::new(JobState::Dispatched);
        (StretchHandle::new(JobId(1), state, rx), tx)
    }

    #[test]
    fn test_try_wait_yields_once() {
        let (mut handle, tx) = handle();
        assert!(handle.try_wait().is_none());

        tx.send(JobOutcome::Completed(vec![0.25; 3])).unwrap();
        assert_eq!(handle.try_wait(), Some(Ok(vec![0.25; 3])));
        assert!(handle.try_wait().is_none());
    }

    #[test]
    fn test_wait_reports_failure() {
        let (handle, tx) = handle();
        tx.send(JobOutcome::Failed("bad input".into())).unwrap();
        assert_eq!(handle.wait(), Err(StretchError::Failed("bad input".into())));
    }

    #[test]
    fn test_dropped_sender_is_worker_gone() {
        let (handle, tx) = handle();
        drop(tx);
        assert_eq!(handle.wait(), Err(StretchError::WorkerGone));
    }

    #[test]
    fn test_wait_timeout() {
        let (mut handle, tx) = handle();
        assert!(handle.wait_timeout(Duration::from_millis(5)).is_none());

        tx.send(JobOutcome::Completed(Vec::new())).unwrap();
        assert_eq!(handle.wait_timeout(Duration::from_millis(5)), Some(Ok(Vec::new())));
    }

    #[test]
    fn test_state_is_shared() {
        let (tx, rx) = bounded(1);
        let state = SharedJobState::new(JobState::Dispatched);
        let handle = StretchHandle::new(JobId(2), state.clone(), rx);
        drop(tx);

        assert!(!handle.is_done());
        state.store(JobState::Completed);
        assert_eq!(handle.state(), JobState::Completed);
        assert!(handle.is_done());
    }
}
