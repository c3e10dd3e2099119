//! Sampling-distribution descriptors attached to trial parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::FieldValue;

/// Describes how a parameter was sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamDistribution {
    /// Continuous range [low, high].
    Float {
        low: f64,
        high: f64,
        #[serde(default)]
        log: bool,
        #[serde(default)]
        step: Option<f64>,
    },
    /// Integer range [low, high] inclusive.
    Int {
        low: i64,
        high: i64,
        #[serde(default)]
        log: bool,
        #[serde(default = "default_int_step")]
        step: i64,
    },
    /// Categorical choices.
    Categorical { choices: Vec<Value> },
}

fn default_int_step() -> i64 {
    1
}

impl ParamDistribution {
    pub fn float(low: f64, high: f64) -> Self {
        Self::Float {
            low,
            high,
            log: false,
            step: None,
        }
    }

    pub fn log_float(low: f64, high: f64) -> Self {
        Self::Float {
            low,
            high,
            log: true,
            step: None,
        }
    }

    pub fn int(low: i64, high: i64) -> Self {
        Self::Int {
            low,
            high,
            log: false,
            step: 1,
        }
    }

    pub fn categorical(choices: Vec<Value>) -> Self {
        Self::Categorical { choices }
    }
}

impl std::fmt::Display for ParamDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float {
                low,
                high,
                log,
                step,
            } => {
                write!(f, "FloatDistribution(high={high:?}, log={log}, low={low:?}, step=")?;
                match step {
                    Some(s) => write!(f, "{s:?})"),
                    None => write!(f, "None)"),
                }
            }
            Self::Int {
                low,
                high,
                log,
                step,
            } => write!(
                f,
                "IntDistribution(high={high}, log={log}, low={low}, step={step})"
            ),
            Self::Categorical { choices } => {
                let rendered: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
                write!(f, "CategoricalDistribution(choices=({}))", rendered.join(", "))
            }
        }
    }
}

/// Distribution descriptors are sent in their textual form; the remote side
/// only accepts scalars.
impl FieldValue for ParamDistribution {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// A named parameter together with its distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub distribution: ParamDistribution,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, distribution: ParamDistribution) -> Self {
        Self {
            name: name.into(),
            distribution,
        }
    }
}
