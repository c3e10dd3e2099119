//! Read-only trial views and an owned snapshot implementation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::distribution::{ParamDistribution, ParamSpec};
use crate::value::{AttrMap, FieldValue};

/// Lifecycle state of a trial as reported by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialState {
    #[default]
    Running,
    Waiting,
    Complete,
    Pruned,
    Fail,
}

impl TrialState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Complete => "COMPLETE",
            Self::Pruned => "PRUNED",
            Self::Fail => "FAIL",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Complete | Self::Pruned | Self::Fail)
    }
}

impl std::fmt::Display for TrialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue for TrialState {
    fn to_field_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

/// What the tracking callback needs to know about a single trial.
///
/// Implemented by [`TrialSnapshot`]; host frameworks with their own trial
/// type can implement it directly instead of copying into a snapshot.
pub trait TrialView {
    /// Sequence number within the study, starting at 0.
    fn number(&self) -> u64;

    /// Objective value, absent for failed or pruned trials.
    fn value(&self) -> Option<f64>;

    fn state(&self) -> TrialState;

    fn datetime_start(&self) -> Option<DateTime<Utc>>;

    fn datetime_complete(&self) -> Option<DateTime<Utc>>;

    /// Wall-clock duration. Defaults to completion minus start.
    fn duration(&self) -> Option<Duration> {
        match (self.datetime_start(), self.datetime_complete()) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Sampled parameter values in suggestion order.
    fn params(&self) -> &AttrMap;

    /// Distribution of each sampled parameter, in suggestion order.
    fn distributions(&self) -> &[ParamSpec];

    fn user_attrs(&self) -> &AttrMap;

    fn system_attrs(&self) -> &AttrMap;
}

/// An owned, serializable copy of a finished (or running) trial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialSnapshot {
    pub number: u64,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub state: TrialState,
    #[serde(default)]
    pub datetime_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub datetime_complete: Option<DateTime<Utc>>,
    #[serde(default)]
    pub params: AttrMap,
    #[serde(default)]
    pub distributions: Vec<ParamSpec>,
    #[serde(default)]
    pub user_attrs: AttrMap,
    #[serde(default)]
    pub system_attrs: AttrMap,
}

impl TrialSnapshot {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Record a sampled parameter along with the distribution it came from.
    /// Re-recording a name replaces both in place, keeping its position.
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        distribution: ParamDistribution,
    ) -> Self {
        let name = name.into();
        self.params.insert(name.clone(), value.into());
        match self.distributions.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.distribution = distribution,
            None => self.distributions.push(ParamSpec::new(name, distribution)),
        }
        self
    }

    pub fn with_user_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_system_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.system_attrs.insert(key.into(), value.into());
        self
    }

    pub fn started_at(mut self, start: DateTime<Utc>) -> Self {
        self.datetime_start = Some(start);
        self
    }

    /// Mark the trial complete with an objective value.
    pub fn complete(mut self, value: f64, at: DateTime<Utc>) -> Self {
        self.state = TrialState::Complete;
        self.value = Some(value);
        self.datetime_complete = Some(at);
        self
    }

    pub fn pruned(mut self, at: DateTime<Utc>) -> Self {
        self.state = TrialState::Pruned;
        self.datetime_complete = Some(at);
        self
    }

    pub fn failed(mut self, at: DateTime<Utc>) -> Self {
        self.state = TrialState::Fail;
        self.datetime_complete = Some(at);
        self
    }
}

impl TrialView for TrialSnapshot {
    fn number(&self) -> u64 {
        self.number
    }

    fn value(&self) -> Option<f64> {
        self.value
    }

    fn state(&self) -> TrialState {
        self.state
    }

    fn datetime_start(&self) -> Option<DateTime<Utc>> {
        self.datetime_start
    }

    fn datetime_complete(&self) -> Option<DateTime<Utc>> {
        self.datetime_complete
    }

    fn params(&self) -> &AttrMap {
        &self.params
    }

    fn distributions(&self) -> &[ParamSpec] {
        &self.distributions
    }

    fn user_attrs(&self) -> &AttrMap {
        &self.user_attrs
    }

    fn system_attrs(&self) -> &AttrMap {
        &self.system_attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn trial_lifecycle() {
        let trial = TrialSnapshot::new(3).started_at(t0());
        assert_eq!(trial.state(), TrialState::Running);
        assert!(trial.duration().is_none());

        let trial = trial.complete(0.42, t0() + Duration::seconds(90));
        assert_eq!(trial.state(), TrialState::Complete);
        assert_eq!(trial.value(), Some(0.42));
        assert_eq!(trial.duration(), Some(Duration::seconds(90)));
    }

    #[test]
    fn pruned_and_failed_have_no_value() {
        let pruned = TrialSnapshot::new(1).started_at(t0()).pruned(t0());
        assert_eq!(pruned.state(), TrialState::Pruned);
        assert!(pruned.value().is_none());

        let failed = TrialSnapshot::new(2).failed(t0());
        assert!(failed.state().is_finished());
        assert!(failed.value().is_none());
    }

    #[test]
    fn params_keep_suggestion_order() {
        let trial = TrialSnapshot::new(0)
            .with_param("lr", 0.1, ParamDistribution::log_float(1e-4, 1.0))
            .with_param("depth", 3, ParamDistribution::int(1, 8))
            .with_param("act", "relu", ParamDistribution::categorical(vec![json!("relu")]));

        let keys: Vec<&str> = trial.params().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["lr", "depth", "act"]);
        let names: Vec<&str> = trial.distributions().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, keys);
    }

    #[test]
    fn repeated_param_replaces_in_place() {
        let trial = TrialSnapshot::new(0)
            .with_param("lr", 0.1, ParamDistribution::float(0.0, 1.0))
            .with_param("depth", 3, ParamDistribution::int(1, 8))
            .with_param("lr", 0.2, ParamDistribution::log_float(0.01, 1.0));

        assert_eq!(trial.params().len(), 2);
        assert_eq!(trial.distributions().len(), 2);
        assert_eq!(trial.params()["lr"], json!(0.2));
        assert_eq!(trial.distributions()[0].name, "lr");
        assert_eq!(
            trial.distributions()[0].distribution,
            ParamDistribution::log_float(0.01, 1.0)
        );
        let keys: Vec<&str> = trial.params().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["lr", "depth"]);
    }

    #[test]
    fn new_trial_defaults_to_running() {
        assert_eq!(TrialState::default(), TrialState::Running);
        assert_eq!(TrialSnapshot::new(0).state(), TrialState::Running);
    }

    #[test]
    fn state_serializes_upper_case() {
        assert_eq!(serde_json::to_value(TrialState::Complete).unwrap(), json!("COMPLETE"));
        assert_eq!(TrialState::Fail.to_field_value(), json!("FAIL"));
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let trial: TrialSnapshot = serde_json::from_value(json!({
            "number": 7,
            "value": 0.85,
            "state": "COMPLETE"
        }))
        .unwrap();
        assert_eq!(trial.number(), 7);
        assert!(trial.params().is_empty());
        assert!(trial.distributions().is_empty());
    }
}
