//! In-process tracking client that records every call.
//!
//! Talks to no external service. Useful as a dry-run sink, for inspecting
//! the exact records a trial would produce, and as the client in tests.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use tt_types::{FlatRecord, TrackingError, TrackingResult};
use uuid::Uuid;

use crate::client::{TrackingClient, TrackingSession};

/// Identifier assigned to each recorded session.
pub type SessionId = Uuid;

/// The kind of a client or session call, used for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    StartSession,
    SetName,
    LogParameters,
    LogMetrics,
    LogOthers,
    End,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartSession => "start_session",
            Self::SetName => "set_name",
            Self::LogParameters => "log_parameters",
            Self::LogMetrics => "log_metrics",
            Self::LogOthers => "log_others",
            Self::End => "end",
        }
    }
}

/// A single call observed by the [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RecordedCall {
    StartSession {
        session: SessionId,
        project: String,
    },
    SetName {
        session: SessionId,
        name: String,
    },
    LogParameters {
        session: SessionId,
        params: FlatRecord,
    },
    LogMetrics {
        session: SessionId,
        metrics: FlatRecord,
        step: u64,
    },
    LogOthers {
        session: SessionId,
        others: FlatRecord,
    },
    End {
        session: SessionId,
    },
}

impl RecordedCall {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::StartSession { .. } => CallKind::StartSession,
            Self::SetName { .. } => CallKind::SetName,
            Self::LogParameters { .. } => CallKind::LogParameters,
            Self::LogMetrics { .. } => CallKind::LogMetrics,
            Self::LogOthers { .. } => CallKind::LogOthers,
            Self::End { .. } => CallKind::End,
        }
    }

    pub fn session(&self) -> SessionId {
        match self {
            Self::StartSession { session, .. }
            | Self::SetName { session, .. }
            | Self::LogParameters { session, .. }
            | Self::LogMetrics { session, .. }
            | Self::LogOthers { session, .. }
            | Self::End { session } => *session,
        }
    }
}

/// Configuration for the recording client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingClientConfig {
    /// Credential reported by [`TrackingClient::api_key`]. `None` behaves
    /// like an installed but unconfigured SDK.
    pub api_key: Option<String>,
    /// Make every call of this kind fail with a transport error.
    pub fail_on: Option<CallKind>,
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// A tracking client that keeps every call in memory.
///
/// Clones share the same call log, so a test can keep one handle while the
/// callback owns another.
#[derive(Debug, Clone)]
pub struct RecordingClient {
    config: RecordingClientConfig,
    calls: CallLog,
}

impl RecordingClient {
    pub fn new(config: RecordingClientConfig) -> Self {
        Self {
            config,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client with a credential configured.
    pub fn configured() -> Self {
        Self::new(RecordingClientConfig {
            api_key: Some("recording".to_string()),
            fail_on: None,
        })
    }

    /// A client that is present but has no credential.
    pub fn unconfigured() -> Self {
        Self::new(RecordingClientConfig::default())
    }

    pub fn failing_on(kind: CallKind) -> Self {
        Self::new(RecordingClientConfig {
            api_key: Some("recording".to_string()),
            fail_on: Some(kind),
        })
    }

    /// Snapshot of all calls so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Kinds of all calls so far, in order.
    pub fn call_kinds(&self) -> Vec<CallKind> {
        self.calls.lock().iter().map(RecordedCall::kind).collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

fn check_injected(fail_on: Option<CallKind>, kind: CallKind) -> TrackingResult<()> {
    if fail_on == Some(kind) {
        return Err(TrackingError::Transport {
            operation: kind.as_str().to_string(),
            message: "injected failure".to_string(),
        });
    }
    Ok(())
}

impl TrackingClient for RecordingClient {
    type Session = RecordingSession;

    fn api_key(&self) -> TrackingResult<Option<String>> {
        match &self.config.api_key {
            Some(key) => Ok(Some(key.clone())),
            None => Err(TrackingError::NotConfigured {
                message: "no API key set for the recording client".to_string(),
            }),
        }
    }

    fn start_session(&self, project_name: &str) -> TrackingResult<RecordingSession> {
        check_injected(self.config.fail_on, CallKind::StartSession)?;
        if project_name.is_empty() {
            return Err(TrackingError::Rejected {
                reason: "project name must not be empty".to_string(),
            });
        }

        let id = Uuid::new_v4();
        self.calls.lock().push(RecordedCall::StartSession {
            session: id,
            project: project_name.to_string(),
        });
        info!("Recording session {} started for project {}", id, project_name);

        Ok(RecordingSession {
            id,
            fail_on: self.config.fail_on,
            calls: Arc::clone(&self.calls),
        })
    }
}

/// Session handed out by [`RecordingClient`].
#[derive(Debug)]
pub struct RecordingSession {
    id: SessionId,
    fail_on: Option<CallKind>,
    calls: CallLog,
}

impl RecordingSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    fn record(&self, kind: CallKind, call: RecordedCall) -> TrackingResult<()> {
        check_injected(self.fail_on, kind)?;
        self.calls.lock().push(call);
        Ok(())
    }
}

impl TrackingSession for RecordingSession {
    fn set_name(&mut self, name: &str) -> TrackingResult<()> {
        self.record(
            CallKind::SetName,
            RecordedCall::SetName {
                session: self.id,
                name: name.to_string(),
            },
        )
    }

    fn log_parameters(&mut self, params: &FlatRecord) -> TrackingResult<()> {
        self.record(
            CallKind::LogParameters,
            RecordedCall::LogParameters {
                session: self.id,
                params: params.clone(),
            },
        )
    }

    fn log_metrics(&mut self, metrics: &FlatRecord, step: u64) -> TrackingResult<()> {
        self.record(
            CallKind::LogMetrics,
            RecordedCall::LogMetrics {
                session: self.id,
                metrics: metrics.clone(),
                step,
            },
        )
    }

    fn log_others(&mut self, others: &FlatRecord) -> TrackingResult<()> {
        self.record(
            CallKind::LogOthers,
            RecordedCall::LogOthers {
                session: self.id,
                others: others.clone(),
            },
        )
    }

    fn end(self) -> TrackingResult<()> {
        self.record(CallKind::End, RecordedCall::End { session: self.id })?;
        info!("Recording session {} ended", self.id);
        Ok(())
    }
}
