//! Construction of the study-level and trial-level flat records.

use tt_types::{FieldValue, FlatRecord, StudyView, TrialView};

use crate::flatten::{flatten_direct, flatten_indexed};

pub const STUDY_PREFIX: &str = "study";
pub const BEST_TRIAL_PREFIX: &str = "study_best_trial";
pub const TRIAL_PREFIX: &str = "trial";

/// Field suffixes every trial summary writes next to `{prefix}_{metric}`.
pub const SUMMARY_FIELDS: [&str; 5] = [
    "datetime_start",
    "datetime_complete",
    "duration",
    "number",
    "state",
];

/// Suffix prefixes of the flattened trial mappings.
pub const MAPPING_PREFIXES: [&str; 4] = [
    "distributions_",
    "params_",
    "user_attrs_",
    "system_attrs_",
];

/// Metric step used for the objective value; each trial is its own session.
pub const METRIC_STEP: u64 = 0;

/// Display name of the session created for `trial`.
pub fn session_name<T: TrialView + ?Sized>(trial: &T) -> String {
    format!("trial_{}", trial.number())
}

/// Timestamps, duration, number, state and value of a trial, each under
/// `{prefix}_...`. The value field is `{prefix}_{metric_name}`.
fn insert_trial_summary<T: TrialView + ?Sized>(
    record: &mut FlatRecord,
    prefix: &str,
    trial: &T,
    metric_name: &str,
) {
    record.insert(
        format!("{prefix}_datetime_start"),
        trial.datetime_start().to_field_value(),
    );
    record.insert(
        format!("{prefix}_datetime_complete"),
        trial.datetime_complete().to_field_value(),
    );
    record.insert(format!("{prefix}_duration"), trial.duration().to_field_value());
    record.insert(format!("{prefix}_number"), trial.number().to_field_value());
    record.insert(format!("{prefix}_state"), trial.state().to_field_value());
    record.insert(format!("{prefix}_{metric_name}"), trial.value().to_field_value());
}

/// Flattened distributions and params (indexed), then user and system
/// attributes (direct), all under `prefix`.
fn flatten_trial_mappings<T: TrialView + ?Sized>(
    record: FlatRecord,
    prefix: &str,
    trial: &T,
) -> FlatRecord {
    let record = flatten_indexed(
        trial
            .distributions()
            .iter()
            .map(|spec| (spec.name.as_str(), &spec.distribution)),
        &format!("{prefix}_distributions"),
        record,
    );
    let record = flatten_indexed(trial.params(), &format!("{prefix}_params"), record);
    let record = flatten_direct(trial.user_attrs(), &format!("{prefix}_user_attrs"), record);
    flatten_direct(trial.system_attrs(), &format!("{prefix}_system_attrs"), record)
}

/// Study-level record: direction, sampler, pruner, name, the best trial's
/// summary and mappings, best value and params, and the study attributes.
///
/// When the study has no best trial yet the best-trial fields are left out
/// and `study_best_value` is `null`.
pub fn build_study_record<S: StudyView + ?Sized>(study: &S, metric_name: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    record.insert(
        format!("{STUDY_PREFIX}_direction"),
        study.direction().to_field_value(),
    );
    record.insert(format!("{STUDY_PREFIX}_sampler"), study.sampler().to_field_value());
    record.insert(format!("{STUDY_PREFIX}_pruner"), study.pruner().to_field_value());
    record.insert(format!("{STUDY_PREFIX}_name"), study.study_name().to_field_value());

    if let Some(best) = study.best_trial() {
        insert_trial_summary(&mut record, BEST_TRIAL_PREFIX, best, metric_name);
    }
    record.insert(
        format!("{STUDY_PREFIX}_best_value"),
        study.best_value().to_field_value(),
    );

    if let Some(best_params) = study.best_params() {
        record = flatten_indexed(best_params, &format!("{STUDY_PREFIX}_best_params"), record);
    }
    if let Some(best) = study.best_trial() {
        record = flatten_trial_mappings(record, BEST_TRIAL_PREFIX, best);
    }

    let record = flatten_direct(
        study.user_attrs(),
        &format!("{STUDY_PREFIX}_user_attrs"),
        record,
    );
    flatten_direct(
        study.system_attrs(),
        &format!("{STUDY_PREFIX}_system_attrs"),
        record,
    )
}

/// Trial-level record: the trial's summary followed by its flattened
/// distributions, params and attributes.
pub fn build_trial_record<T: TrialView + ?Sized>(trial: &T, metric_name: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    insert_trial_summary(&mut record, TRIAL_PREFIX, trial, metric_name);
    flatten_trial_mappings(record, TRIAL_PREFIX, trial)
}

/// `{metric_name: value}`, logged as the trial's metric.
pub fn build_metric_record<T: TrialView + ?Sized>(trial: &T, metric_name: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    record.insert(metric_name.to_string(), trial.value().to_field_value());
    record
}
