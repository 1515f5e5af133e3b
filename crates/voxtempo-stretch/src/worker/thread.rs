//! Long-lived worker thread that runs tempo jobs off the caller's thread.

use crossbeam_channel::{bounded, Receiver, Sender};
use rustfft::FftPlanner;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::config::StretchConfig;
use super::handle::StretchHandle;
use super::request::{JobId, JobOutcome, JobState, SharedJobState, WorkerCommand};
use crate::error::{Result, StretchError};
use crate::time_stretch::{stretch_mono_with_planner, TempoJob};

/// Worker startup report
enum Readiness {
    Ready,
    Failed(String),
}

/// Tempo engine backed by one dedicated worker thread.
///
/// Create once, [`start`](Self::start) once, reuse for every job. Only one job
/// may be in flight: a second [`dispatch`](Self::dispatch) before the first
/// finishes is rejected with [`StretchError::Busy`]. If the worker fails to
/// initialize, every later dispatch returns the same
/// [`StretchError::Unavailable`]. The thread is stopped and joined on drop.
pub struct StretchEngine {
    command_tx: Sender<WorkerCommand>,
    command_rx: Option<Receiver<WorkerCommand>>,
    thread_handle: Option<JoinHandle<()>>,
    busy: Arc<AtomicBool>,
    unavailable: Option<String>,
    config: StretchConfig,
}

impl StretchEngine {
    /// Create a tempo engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(StretchConfig::default())
    }

    /// Create a tempo engine with custom configuration.
    pub fn with_config(config: StretchConfig) -> Self {
        let (tx, rx) = bounded(config.channel_capacity.max(1));

        Self {
            command_tx: tx,
            command_rx: Some(rx),
            thread_handle: None,
            busy: Arc::new(AtomicBool::new(false)),
            unavailable: None,
            config,
        }
    }

    pub fn config(&self) -> &StretchConfig {
        &self.config
    }

    /// Spawn the worker and wait for it to report ready.
    ///
    /// Calling again while running is a no-op; after a failed start it
    /// returns the original failure. A stopped engine can be started again.
    pub fn start(&mut self) -> Result<()> {
        if let Some(reason) = &self.unavailable {
            return Err(StretchError::Unavailable(reason.clone()));
        }
        if self.thread_handle.is_some() {
            return Ok(());
        }

        // The previous worker owned the old receiver; give the new one a fresh queue.
        let rx = match self.command_rx.take() {
            Some(rx) => rx,
            None => {
                let (tx, rx) = bounded(self.config.channel_capacity.max(1));
                self.command_tx = tx;
                rx
            }
        };
        let (ready_tx, ready_rx) = bounded(1);
        let busy = Arc::clone(&self.busy);
        let config = self.config;

        let spawned = thread::Builder::new()
            .name("voxtempo-stretch".into())
            .spawn(move || worker_main(rx, ready_tx, busy, config));

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => return Err(self.mark_unavailable(format!("failed to spawn worker: {e}"))),
        };

        match ready_rx.recv() {
            Ok(Readiness::Ready) => {
                tracing::debug!(
                    chunk_frames = config.chunk_frames,
                    fft_size = config.fft_size.size(),
                    "tempo worker ready"
                );
                self.thread_handle = Some(handle);
                Ok(())
            }
            Ok(Readiness::Failed(reason)) => {
                let _ = handle.join();
                Err(self.mark_unavailable(reason))
            }
            Err(_) => {
                let _ = handle.join();
                Err(self.mark_unavailable("worker exited during startup".into()))
            }
        }
    }

    fn mark_unavailable(&mut self, reason: String) -> StretchError {
        tracing::error!(%reason, "tempo worker failed to initialize");
        self.unavailable = Some(reason.clone());
        StretchError::Unavailable(reason)
    }

    /// Whether the worker is up and accepting jobs.
    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some() && self.unavailable.is_none()
    }

    /// Why the worker could not start, if it failed.
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }

    /// Whether a job is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Hand a job to the worker.
    ///
    /// The job is validated here, before the worker sees it. Returns a handle
    /// that yields exactly one result.
    pub fn dispatch(&self, job: TempoJob) -> Result<StretchHandle> {
        if let Some(reason) = &self.unavailable {
            return Err(StretchError::Unavailable(reason.clone()));
        }
        if self.thread_handle.is_none() {
            return Err(StretchError::NotStarted);
        }
        job.validate()?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(StretchError::Busy);
        }

        let id = JobId::generate();
        let state = SharedJobState::new(JobState::Dispatched);
        let (reply_tx, reply_rx) = bounded(1);

        tracing::debug!(
            %id,
            samples = job.buffer.len(),
            sample_rate = job.sample_rate,
            tempo = job.tempo,
            "dispatching tempo job"
        );

        let command = WorkerCommand::Stretch {
            id,
            job,
            state: state.clone(),
            reply: reply_tx,
        };
        if self.command_tx.send(command).is_err() {
            self.busy.store(false, Ordering::Release);
            return Err(StretchError::WorkerGone);
        }

        Ok(StretchHandle::new(id, state, reply_rx))
    }

    /// Dispatch and block until the result arrives.
    pub fn stretch_blocking(&self, job: TempoJob) -> Result<Vec<f32>> {
        self.dispatch(job)?.wait()
    }

    /// Stop the worker and join it. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            let _ = self.command_tx.send(WorkerCommand::Shutdown);
            let _ = handle.join();
            tracing::debug!("tempo worker stopped");
        }
    }
}

impl Default for StretchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StretchEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker entry point: initialize, report, then serve jobs until shutdown.
fn worker_main(
    rx: Receiver<WorkerCommand>,
    ready_tx: Sender<Readiness>,
    busy: Arc<AtomicBool>,
    config: StretchConfig,
) {
    if let Err(reason) = config.validate() {
        let _ = ready_tx.send(Readiness::Failed(reason));
        return;
    }

    // Plan both FFT directions once; every job reuses the cached plans.
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(config.fft_size.size());
    planner.plan_fft_inverse(config.fft_size.size());

    if ready_tx.send(Readiness::Ready).is_err() {
        return;
    }
    drop(ready_tx);

    worker_loop(rx, busy, config, &mut planner);
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    busy: Arc<AtomicBool>,
    config: StretchConfig,
    planner: &mut FftPlanner<f32>,
) {
    while let Ok(command) = rx.recv() {
        match command {
            WorkerCommand::Stretch {
                id,
                job,
                state,
                reply,
            } => {
                state.store(JobState::Processing);
                let outcome = run_job(id, &job, &config, planner);

                state.store(match outcome {
                    JobOutcome::Completed(_) => JobState::Completed,
                    JobOutcome::Failed(_) => JobState::Failed,
                });
                // Release before replying so a caller holding the result can
                // dispatch again immediately.
                busy.store(false, Ordering::Release);

                if reply.send(outcome).is_err() {
                    tracing::debug!(%id, "job handle dropped before result");
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
}

fn run_job(
    id: JobId,
    job: &TempoJob,
    config: &StretchConfig,
    planner: &mut FftPlanner<f32>,
) -> JobOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Vec<f32>> {
        job.validate()?;
        Ok(stretch_mono_with_planner(&job.buffer, job.tempo, config, planner))
    }));

    match result {
        Ok(Ok(samples)) => {
            tracing::info!(
                %id,
                input = job.buffer.len(),
                output = samples.len(),
                tempo = job.tempo,
                "tempo job completed"
            );
            JobOutcome::Completed(samples)
        }
        Ok(Err(e)) => {
            tracing::warn!(%id, error = %e, "tempo job rejected");
            JobOutcome::Failed(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%id, %message, "tempo job panicked");
            JobOutcome::Failed(message)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("stretch panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("stretch panicked: {s}")
    } else {
        "stretch panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (std::f32::consts::TAU * 220.0 * i as f32 / 24000.0).sin() * 0.5)
            .collect()
    }

    fn started() -> StretchEngine {
        let mut engine = StretchEngine::new();
        engine.start().expect("worker starts");
        engine
    }

    #[test]
    fn test_stretch_blocking() {
        let engine = started();
        let out = engine
            .stretch_blocking(TempoJob::new(sine(24000), 24000, 2.0))
            .unwrap();
        assert_eq!(out.len(), 12000);
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_engine_is_reused_across_jobs() {
        let engine = started();
        for (tempo, expected) in [(0.5, 8000), (1.25, 3200), (2.0, 2000)] {
            let out = engine
                .stretch_blocking(TempoJob::new(sine(4000), 24000, tempo))
                .unwrap();
            assert_eq!(out.len(), expected);
        }
    }

    #[test]
    fn test_dispatch_before_start() {
        let engine = StretchEngine::new();
        let result = engine.dispatch(TempoJob::new(sine(100), 24000, 1.5));
        assert!(matches!(result, Err(StretchError::NotStarted)));
    }

    #[test]
    fn test_invalid_job_rejected_before_worker() {
        let engine = started();
        let result = engine.dispatch(TempoJob::new(sine(100), 24000, 0.1));
        assert!(matches!(result, Err(StretchError::InvalidTempo(_))));
        assert!(!engine.is_busy());

        let result = engine.dispatch(TempoJob::new(Vec::new(), 24000, 1.5));
        assert!(matches!(result, Err(StretchError::EmptyBuffer)));
    }

    #[test]
    fn test_overlapping_dispatch_is_rejected() {
        let engine = started();
        let first = engine
            .dispatch(TempoJob::new(sine(24000 * 20), 24000, 1.5))
            .unwrap();

        match engine.dispatch(TempoJob::new(sine(1000), 24000, 2.0)) {
            Err(StretchError::Busy) => {}
            // Only possible if the first job already finished
            Ok(second) => {
                assert!(first.is_done());
                assert_eq!(second.wait().unwrap().len(), 500);
            }
            Err(e) => panic!("unexpected dispatch error: {e}"),
        }

        let out = first.wait().unwrap();
        assert_eq!(out.len(), 320000);

        // Free again once the first result is in hand
        let third = engine
            .stretch_blocking(TempoJob::new(sine(1000), 24000, 2.0))
            .unwrap();
        assert_eq!(third.len(), 500);
    }

    #[test]
    fn test_init_failure_is_sticky() {
        let mut engine = StretchEngine::with_config(StretchConfig::default().chunk_frames(0));

        let first = engine.start();
        assert!(matches!(first, Err(StretchError::Unavailable(_))));
        assert!(!engine.is_running());
        assert!(engine.unavailable_reason().is_some());

        let dispatch = engine.dispatch(TempoJob::new(sine(100), 24000, 1.5));
        assert_eq!(dispatch.err(), first.err());

        let again = engine.start();
        assert!(matches!(again, Err(StretchError::Unavailable(_))));
    }

    #[test]
    fn test_handle_state_transitions() {
        let engine = started();
        let mut handle = engine
            .dispatch(TempoJob::new(sine(4800), 24000, 1.2))
            .unwrap();
        assert!(matches!(
            handle.state(),
            JobState::Dispatched | JobState::Processing | JobState::Completed
        ));

        let result = loop {
            if let Some(result) = handle.wait_timeout(Duration::from_millis(50)) {
                break result;
            }
        };
        assert_eq!(result.unwrap().len(), 4000);
        assert_eq!(handle.state(), JobState::Completed);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut engine = started();
        assert!(engine.is_running());
        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
        assert!(matches!(
            engine.dispatch(TempoJob::new(sine(10), 24000, 1.5)),
            Err(StretchError::NotStarted)
        ));
    }

    #[test]
    fn test_restart_after_stop() {
        let mut engine = started();
        engine.stop();

        engine.start().expect("stopped engine restarts");
        assert!(engine.is_running());
        assert_eq!(engine.unavailable_reason(), None);

        let out = engine
            .stretch_blocking(TempoJob::new(sine(2400), 24000, 1.5))
            .unwrap();
        assert_eq!(out.len(), 1600);
    }

    #[test]
    fn test_failed_job_leaves_worker_usable() {
        let (tx, rx) = bounded(4);
        let busy = Arc::new(AtomicBool::new(false));
        let worker_busy = Arc::clone(&busy);
        let config = StretchConfig::default();
        let worker = thread::spawn(move || {
            let mut planner = FftPlanner::new();
            worker_loop(rx, worker_busy, config, &mut planner);
        });

        let send = |job: TempoJob| {
            let state = SharedJobState::new(JobState::Dispatched);
            let (reply_tx, reply_rx) = bounded(1);
            busy.store(true, Ordering::Release);
            tx.send(WorkerCommand::Stretch {
                id: JobId::generate(),
                job,
                state: state.clone(),
                reply: reply_tx,
            })
            .unwrap();
            (state, reply_rx.recv().unwrap())
        };

        // Bypasses dispatch validation so the worker itself must reject it
        let (state, outcome) = send(TempoJob::new(sine(100), 24000, 3.0));
        match outcome {
            JobOutcome::Failed(message) => assert!(message.contains("outside the supported range")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(state.load(), JobState::Failed);
        assert!(!busy.load(Ordering::Acquire));

        let (state, outcome) = send(TempoJob::new(sine(2400), 24000, 2.0));
        assert_eq!(outcome.into_result().unwrap().len(), 1200);
        assert_eq!(state.load(), JobState::Completed);
        assert!(!busy.load(Ordering::Acquire));

        tx.send(WorkerCommand::Shutdown).unwrap();
        worker.join().unwrap();
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("index out of bounds");
        assert_eq!(
            panic_message(payload.as_ref()),
            "stretch panicked: index out of bounds"
        );
    }
}
