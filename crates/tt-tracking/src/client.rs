//! Tracking client abstraction.
//!
//! The callback only talks to the experiment-tracking service through these
//! two traits. Transport, authentication and retries live behind them.

use tt_types::{FlatRecord, TrackingResult};

/// Entry point of a tracking SDK.
///
/// Implementations may talk to a real service over the network or record
/// calls locally (see [`crate::recording::RecordingClient`]).
pub trait TrackingClient: Send + Sync {
    type Session: TrackingSession;

    /// Look up the configured API key.
    ///
    /// Returns `Err(TrackingError::NotConfigured { .. })` or `Ok(None)` when
    /// the SDK is installed but has no credential.
    fn api_key(&self) -> TrackingResult<Option<String>>;

    /// Create a new logging session (an "experiment") under `project_name`.
    fn start_session(&self, project_name: &str) -> TrackingResult<Self::Session>;
}

/// One open logging session.
pub trait TrackingSession: Send {
    /// Set the display name of the session.
    fn set_name(&mut self, name: &str) -> TrackingResult<()>;

    /// Log the raw hyperparameters of the run.
    fn log_parameters(&mut self, params: &FlatRecord) -> TrackingResult<()>;

    /// Log metric values at `step`.
    fn log_metrics(&mut self, metrics: &FlatRecord, step: u64) -> TrackingResult<()>;

    /// Log free-form key/value metadata.
    fn log_others(&mut self, others: &FlatRecord) -> TrackingResult<()>;

    /// Finalize the session. Consumes it; nothing may be logged afterwards.
    fn end(self) -> TrackingResult<()>;
}
