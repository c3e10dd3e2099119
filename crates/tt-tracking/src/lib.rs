//! # tt-tracking
//!
//! Per-trial logging of hyperparameter-search results to an
//! experiment-tracking service.
//!
//! Provides the tracking client abstraction, the flattening rules that turn
//! nested study/trial state into flat records, the enablement guard, and the
//! [`TrialLogger`] callback itself. [`RecordingClient`] is an in-process
//! client for dry runs and tests.

mod callback;
mod client;
mod config;
mod flatten;
mod guard;
mod record;
mod recording;
mod replay;

pub use callback::{TrialCallback, TrialLogger};
pub use client::{TrackingClient, TrackingSession};
pub use config::{LoggerConfig, DEFAULT_METRIC_NAME, METRIC_NAME_ENV};
pub use flatten::{flatten_direct, flatten_indexed};
pub use guard::{Availability, EnablementGuard};
pub use record::{
    build_metric_record, build_study_record, build_trial_record, session_name, METRIC_STEP,
};
pub use recording::{
    CallKind, RecordedCall, RecordingClient, RecordingClientConfig, RecordingSession, SessionId,
};
pub use replay::{replay, ReplayInput, ReplayReport};
