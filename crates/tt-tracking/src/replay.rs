//! Offline replay of a single callback invocation from a JSON document.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tt_types::{FlatRecord, StudySnapshot, TrackingResult, TrialSnapshot};

use crate::callback::TrialLogger;
use crate::config::LoggerConfig;
use crate::recording::{RecordedCall, RecordingClient};

/// A study and the trial that just finished in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayInput {
    pub study: StudySnapshot,
    pub trial: TrialSnapshot,
}

impl ReplayInput {
    pub fn from_json_str(json: &str) -> TrackingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TrackingResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub study_record: FlatRecord,
    pub trial_record: FlatRecord,
    pub calls: Vec<RecordedCall>,
}

/// Run the callback for `input` against a fresh [`RecordingClient`].
pub fn replay(input: &ReplayInput, config: LoggerConfig) -> TrackingResult<ReplayReport> {
    let client = RecordingClient::configured();
    let logger = TrialLogger::new(Some(client.clone()), config);

    let (study_record, trial_record) = logger.build_records(&input.study, &input.trial);
    logger.log_trial(&input.study, &input.trial)?;

    Ok(ReplayReport {
        study_record,
        trial_record,
        calls: client.calls(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tt_types::TrackingError;

    const DOC: &str = r#"{
        "study": {
            "study_name": "replayed",
            "direction": "MAXIMIZE",
            "sampler": "RandomSampler",
            "pruner": "NopPruner"
        },
        "trial": {
            "number": 2,
            "value": 0.5,
            "state": "COMPLETE",
            "params": {"units": 64},
            "distributions": [
                {"name": "units", "distribution": {"type": "int", "low": 16, "high": 128}}
            ]
        }
    }"#;

    #[test]
    fn replay_from_str() {
        let input = ReplayInput::from_json_str(DOC).unwrap();
        let report = replay(&input, LoggerConfig::default()).unwrap();

        assert_eq!(report.study_record["study_name"], json!("replayed"));
        assert_eq!(report.trial_record["trial_params_0_value"], json!(64));
        assert_eq!(report.calls.len(), 7);
    }

    #[test]
    fn replay_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let input = ReplayInput::from_path(file.path()).unwrap();
        assert_eq!(input.trial.number, 2);
    }

    #[test]
    fn bad_input_is_a_serialization_error() {
        let err = ReplayInput::from_json_str("{\"study\": 1}").unwrap_err();
        assert!(matches!(err, TrackingError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ReplayInput::from_path("/nonexistent/trialtrack.json").unwrap_err();
        assert!(matches!(err, TrackingError::Io(_)));
    }
}
