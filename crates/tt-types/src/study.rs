//! Read-only study views and an owned snapshot implementation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::trial::{TrialSnapshot, TrialView};
use crate::value::{AttrMap, FieldValue};

/// Whether the study minimizes or maximizes its objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyDirection {
    NotSet,
    #[default]
    Minimize,
    Maximize,
}

impl StudyDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSet => "NOT_SET",
            Self::Minimize => "MINIMIZE",
            Self::Maximize => "MAXIMIZE",
        }
    }
}

impl std::fmt::Display for StudyDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue for StudyDirection {
    fn to_field_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

/// What the tracking callback needs to know about a study.
pub trait StudyView {
    type Trial: TrialView;

    fn study_name(&self) -> &str;

    fn direction(&self) -> StudyDirection;

    /// Human-readable descriptor of the sampler (e.g. `"TPESampler"`).
    fn sampler(&self) -> &str;

    /// Human-readable descriptor of the pruner (e.g. `"MedianPruner"`).
    fn pruner(&self) -> &str;

    /// Best finished trial so far, `None` until one has completed.
    fn best_trial(&self) -> Option<&Self::Trial>;

    fn best_value(&self) -> Option<f64> {
        self.best_trial().and_then(|t| t.value())
    }

    fn best_params(&self) -> Option<&AttrMap> {
        self.best_trial().map(|t| t.params())
    }

    fn user_attrs(&self) -> &AttrMap;

    fn system_attrs(&self) -> &AttrMap;
}

/// An owned, serializable copy of a study's state at callback time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySnapshot {
    pub study_name: String,
    #[serde(default)]
    pub direction: StudyDirection,
    #[serde(default)]
    pub sampler: String,
    #[serde(default)]
    pub pruner: String,
    #[serde(default)]
    pub best_trial: Option<TrialSnapshot>,
    #[serde(default)]
    pub user_attrs: AttrMap,
    #[serde(default)]
    pub system_attrs: AttrMap,
}

impl StudySnapshot {
    pub fn new(study_name: impl Into<String>, direction: StudyDirection) -> Self {
        Self {
            study_name: study_name.into(),
            direction,
            sampler: String::new(),
            pruner: String::new(),
            best_trial: None,
            user_attrs: AttrMap::new(),
            system_attrs: AttrMap::new(),
        }
    }

    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = sampler.into();
        self
    }

    pub fn with_pruner(mut self, pruner: impl Into<String>) -> Self {
        self.pruner = pruner.into();
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

    /// Replace the best trial if `trial` improves on it in this study's
    /// direction. Trials without a value never become best.
    pub fn update_best(&mut self, trial: &TrialSnapshot) {
        let Some(candidate) = trial.value else {
            return;
        };
        let improves = match self.best_trial.as_ref().and_then(|b| b.value) {
            None => true,
            Some(current) => match self.direction {
                StudyDirection::Maximize => candidate > current,
                StudyDirection::Minimize | StudyDirection::NotSet => candidate < current,
            },
        };
        if improves {
            self.best_trial = Some(trial.clone());
        }
    }
}

impl StudyView for StudySnapshot {
    type Trial = TrialSnapshot;

    fn study_name(&self) -> &str {
        &self.study_name
    }

    fn direction(&self) -> StudyDirection {
        self.direction
    }

    fn sampler(&self) -> &str {
        &self.sampler
    }

    fn pruner(&self) -> &str {
        &self.pruner
    }

    fn best_trial(&self) -> Option<&TrialSnapshot> {
        self.best_trial.as_ref()
    }

    fn user_attrs(&self) -> &AttrMap {
        &self.user_attrs
    }

    fn system_attrs(&self) -> &AttrMap {
        &self.system_attrs
    }
}
