//! Flattening of nested mappings into prefixed scalar fields.
//!
//! Two naming schemes are used. Indexed flattening writes each entry as a
//! `{prefix}_{i}_name` / `{prefix}_{i}_value` pair, which keeps the entry
//! order and never embeds the key in a field name. Direct flattening writes
//! `{prefix}_{key}` and is meant for mappings whose keys are already safe
//! field-name fragments.

use tt_types::{FieldValue, FlatRecord};

/// Indexed flattening of `source` into `target`.
///
/// Entry `i` (0-based, in iteration order) becomes two fields:
/// `{prefix}_{i}_name = key` and `{prefix}_{i}_value = value`.
pub fn flatten_indexed<I, K, V>(source: I, prefix: &str, mut target: FlatRecord) -> FlatRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: FieldValue,
{
    for (i, (key, value)) in source.into_iter().enumerate() {
        target.insert(
            format!("{prefix}_{i}_name"),
            key.as_ref().to_field_value(),
        );
        target.insert(format!("{prefix}_{i}_value"), value.to_field_value());
    }
    target
}

/// Direct flattening of `source` into `target`: one `{prefix}_{key}` field
/// per entry.
pub fn flatten_direct<I, K, V>(source: I, prefix: &str, mut target: FlatRecord) -> FlatRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: FieldValue,
{
    for (key, value) in source {
        target.insert(format!("{prefix}_{}", key.as_ref()), value.to_field_value());
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tt_types::{AttrMap, ParamDistribution, ParamSpec};

    fn attrs(entries: &[(&str, Value)]) -> AttrMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn indexed_names_and_values() {
        let params = attrs(&[("lr", json!(0.1)), ("depth", json!(3))]);
        let out = flatten_indexed(&params, "study_best_params", FlatRecord::new());

        assert_eq!(out.len(), 4);
        assert_eq!(out["study_best_params_0_name"], json!("lr"));
        assert_eq!(out["study_best_params_0_value"], json!(0.1));
        assert_eq!(out["study_best_params_1_name"], json!("depth"));
        assert_eq!(out["study_best_params_1_value"], json!(3));
    }

    #[test]
    fn indexed_accepts_distribution_specs() {
        let specs = vec![
            ParamSpec::new("lr", ParamDistribution::float(0.0, 1.0)),
            ParamSpec::new("depth", ParamDistribution::int(1, 4)),
        ];
        let out = flatten_indexed(
            specs.iter().map(|s| (s.name.as_str(), &s.distribution)),
            "trial_distributions",
            FlatRecord::new(),
        );

        assert_eq!(out["trial_distributions_1_name"], json!("depth"));
        assert_eq!(
            out["trial_distributions_1_value"],
            json!("IntDistribution(high=4, log=false, low=1, step=1)")
        );
    }

    #[test]
    fn direct_uses_key_as_suffix() {
        let user = attrs(&[("dataset", json!("mnist")), ("seed", json!(42))]);
        let out = flatten_direct(&user, "trial_user_attrs", FlatRecord::new());

        assert_eq!(out.len(), 2);
        assert_eq!(out["trial_user_attrs_dataset"], json!("mnist"));
        assert_eq!(out["trial_user_attrs_seed"], json!(42));
    }

    #[test]
    fn empty_source_leaves_target_unchanged() {
        let mut target = FlatRecord::new();
        target.insert("study_name".into(), json!("s"));
        let before = target.clone();

        let target = flatten_indexed(&AttrMap::new(), "p", target);
        let target = flatten_direct(&AttrMap::new(), "p", target);
        assert_eq!(target, before);
    }

    #[test]
    fn source_is_not_mutated_and_target_accumulates() {
        let a = attrs(&[("x", json!(1))]);
        let b = attrs(&[("x", json!(2))]);
        let out = flatten_direct(&a, "user", FlatRecord::new());
        let out = flatten_direct(&b, "system", out);

        assert_eq!(out["user_x"], json!(1));
        assert_eq!(out["system_x"], json!(2));
        assert_eq!(a["x"], json!(1));
    }

    #[test]
    fn nested_values_pass_through() {
        let a = attrs(&[("history", json!([0.5, 0.4]))]);
        let out = flatten_direct(&a, "trial_system_attrs", FlatRecord::new());
        assert_eq!(out["trial_system_attrs_history"], json!([0.5, 0.4]));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_attrs() -> impl Strategy<Value = AttrMap> {
            prop::collection::vec(("[a-z][a-z0-9_]{0,8}", any::<i64>()), 0..20).prop_map(
                |entries| {
                    entries
                        .into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect()
                },
            )
        }

        proptest! {
            /// Property: indexed flattening emits a name/value pair per entry, in order
            #[test]
            fn prop_indexed_two_fields_per_entry(m in arb_attrs(), prefix in "[a-z]{1,6}") {
                let out = flatten_indexed(&m, &prefix, FlatRecord::new());
                prop_assert_eq!(out.len(), 2 * m.len());

                for (i, (key, value)) in m.iter().enumerate() {
                    let name_field = format!("{}_{}_name", prefix, i);
                    let value_field = format!("{}_{}_value", prefix, i);
                    prop_assert_eq!(&out[&name_field], &Value::String(key.clone()));
                    prop_assert_eq!(&out[&value_field], value);
                }
            }

            /// Property: direct flattening emits exactly one prefixed field per key
            #[test]
            fn prop_direct_one_field_per_key(m in arb_attrs(), prefix in "[a-z]{1,6}") {
                let out = flatten_direct(&m, &prefix, FlatRecord::new());
                prop_assert_eq!(out.len(), m.len());

                for (key, value) in &m {
                    let field = format!("{}_{}", prefix, key);
                    prop_assert_eq!(&out[&field], value);
                }
            }
        }
    }
}
