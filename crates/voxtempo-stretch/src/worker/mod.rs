//! Dedicated worker thread for tempo jobs.

mod config;
mod handle;
mod request;
mod thread;

pub use config::StretchConfig;
pub use handle::StretchHandle;
pub use request::{JobId, JobOutcome, JobState};
pub use thread::StretchEngine;
