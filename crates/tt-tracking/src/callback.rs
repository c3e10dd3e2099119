//! The per-trial logging callback.

use tracing::{debug, info};
use tt_types::{FlatRecord, StudyView, TrackingResult, TrialView};

use crate::client::{TrackingClient, TrackingSession};
use crate::config::LoggerConfig;
use crate::guard::{Availability, EnablementGuard};
use crate::record::{
    build_metric_record, build_study_record, build_trial_record, session_name, METRIC_STEP,
};

/// Something the host framework calls once per finished trial.
pub trait TrialCallback<S: StudyView> {
    fn on_trial_complete(&self, study: &S, trial: &S::Trial) -> TrackingResult<()>;
}

impl<S, F> TrialCallback<S> for F
where
    S: StudyView,
    F: Fn(&S, &S::Trial) -> TrackingResult<()>,
{
    fn on_trial_complete(&self, study: &S, trial: &S::Trial) -> TrackingResult<()> {
        self(study, trial)
    }
}

/// Logs every finished trial, with its study context, to a tracking service.
///
/// Each call opens one session named `trial_{number}` in the project named
/// after the study, logs the trial's raw params, its objective value as a
/// metric at step 0, a study-level and a trial-level flat record, and ends
/// the session. Client errors are returned as-is.
#[derive(Debug)]
pub struct TrialLogger<C: TrackingClient> {
    client: Option<C>,
    guard: EnablementGuard,
    config: LoggerConfig,
}

impl<C: TrackingClient> TrialLogger<C> {
    /// Probe `client` once; a missing or unconfigured client yields a
    /// logger that does nothing.
    pub fn new(client: Option<C>, config: LoggerConfig) -> Self {
        let guard = EnablementGuard::probe(client.as_ref());
        Self {
            client,
            guard,
            config,
        }
    }

    /// Like [`TrialLogger::new`], with the metric name taken from the
    /// environment.
    pub fn from_env(client: Option<C>) -> TrackingResult<Self> {
        Ok(Self::new(client, LoggerConfig::from_env()?))
    }

    pub fn is_enabled(&self) -> bool {
        self.guard.is_enabled()
    }

    pub fn availability(&self) -> Availability {
        self.guard.availability()
    }

    pub fn metric_name(&self) -> &str {
        &self.config.metric_name
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// The `(study, trial)` records this logger would send, without sending
    /// anything. Works whether or not logging is enabled.
    pub fn build_records<S: StudyView>(&self, study: &S, trial: &S::Trial) -> (FlatRecord, FlatRecord) {
        let study_record = build_study_record(study, self.metric_name());
        let trial_record = build_trial_record(trial, self.metric_name());
        debug!(
            "Built study record with {} fields and trial record with {} fields",
            study_record.len(),
            trial_record.len()
        );
        (study_record, trial_record)
    }

    /// Log `trial` of `study`. A no-op when logging is disabled.
    pub fn log_trial<S: StudyView>(&self, study: &S, trial: &S::Trial) -> TrackingResult<()> {
        let client = match (&self.client, self.guard.is_enabled()) {
            (Some(client), true) => client,
            _ => return Ok(()),
        };

        let (study_record, trial_record) = self.build_records(study, trial);
        let metrics = build_metric_record(trial, self.metric_name());
        let name = session_name(trial);

        info!("Logging {} of study {}", name, study.study_name());
        let mut session = client.start_session(study.study_name())?;
        session.set_name(&name)?;
        session.log_parameters(trial.params())?;
        session.log_metrics(&metrics, METRIC_STEP)?;
        session.log_others(&study_record)?;
        session.log_others(&trial_record)?;
        session.end()
    }
}

impl<S: StudyView, C: TrackingClient> TrialCallback<S> for TrialLogger<C> {
    fn on_trial_complete(&self, study: &S, trial: &S::Trial) -> TrackingResult<()> {
        self.log_trial(study, trial)
    }
}
