//! Logger configuration, resolved once at construction.

use serde::{Deserialize, Serialize};
use tt_types::{config_error, TrackingResult};

use crate::record::{MAPPING_PREFIXES, SUMMARY_FIELDS};

/// Field name used for the objective value when nothing overrides it.
pub const DEFAULT_METRIC_NAME: &str = "value";

/// Environment variable overriding the metric field name.
pub const METRIC_NAME_ENV: &str = "TRIALTRACK_METRIC_NAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Name under which the trial's objective value is logged, e.g. the
    /// `value` in `trial_value`.
    pub metric_name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            metric_name: DEFAULT_METRIC_NAME.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new(metric_name: impl Into<String>) -> TrackingResult<Self> {
        Self::default().with_metric_name(metric_name)
    }

    pub fn with_metric_name(mut self, metric_name: impl Into<String>) -> TrackingResult<Self> {
        let metric_name = metric_name.into();
        if metric_name.trim().is_empty() {
            return Err(config_error!("metric name must not be empty"));
        }
        // `{prefix}_{metric_name}` shares its prefix with the summary and
        // mapping fields of the same trial.
        if SUMMARY_FIELDS.contains(&metric_name.as_str()) {
            return Err(config_error!(
                "metric name '{}' collides with a trial summary field",
                metric_name
            ));
        }
        if let Some(prefix) = MAPPING_PREFIXES
            .iter()
            .find(|p| metric_name.starts_with(**p))
        {
            return Err(config_error!(
                "metric name '{}' collides with flattened '{}*' fields",
                metric_name,
                prefix
            ));
        }
        self.metric_name = metric_name;
        Ok(self)
    }

    /// Resolve from an optional override, falling back to the default.
    pub fn from_override(metric_name: Option<String>) -> TrackingResult<Self> {
        match metric_name {
            Some(name) => Self::new(name),
            None => Ok(Self::default()),
        }
    }

    /// Resolve from [`METRIC_NAME_ENV`].
    pub fn from_env() -> TrackingResult<Self> {
        Self::from_override(std::env::var(METRIC_NAME_ENV).ok())
    }
}
