//! Layering of YAML configuration values.
//!
//! `.preflight.local.yml` is laid over `.preflight.yml`:
//!
//! - Mappings merge key by key
//! - Sequences (such as `interpreters`) are replaced, never concatenated
//! - A `null` in the overlay removes the key, restoring its default
//! - Scalars in the overlay win

use serde_yaml::Value;

/// Lay `overlay` over `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order; the last has the highest priority.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_scalar_wins() {
        let merged = deep_merge(&yaml("min_version: '3.10'"), &yaml("min_version: '3.12'"));
        assert_eq!(merged, yaml("min_version: '3.12'"));
    }

    #[test]
    fn nested_mapping_merges() {
        let base = yaml("diagnostic:\n  script: a.py\n  use_interpreter: true\n");
        let overlay = yaml("diagnostic:\n  script: b.py\n");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(
            merged,
            yaml("diagnostic:\n  script: b.py\n  use_interpreter: true\n")
        );
    }

    #[test]
    fn interpreter_list_is_replaced() {
        let merged = deep_merge(
            &yaml("interpreters: [python3, python]"),
            &yaml("interpreters: [python3.12]"),
        );
        assert_eq!(merged, yaml("interpreters: [python3.12]"));
    }

    #[test]
    fn null_removes_key() {
        let merged = deep_merge(
            &yaml("runtime: CPython\nmin_version: '3.11'"),
            &yaml("min_version: null"),
        );
        assert_eq!(merged, yaml("runtime: CPython"));
    }

    #[test]
    fn merge_configs_applies_in_order() {
        let merged = merge_configs(&[
            yaml("version_timeout_secs: 10\nruntime: Python"),
            yaml("version_timeout_secs: 5"),
            yaml("version_timeout_secs: 0"),
        ]);
        assert_eq!(merged, yaml("version_timeout_secs: 0\nruntime: Python"));
    }

    #[test]
    fn merge_nothing_is_empty_mapping() {
        assert_eq!(merge_configs(&[]), Value::Mapping(Default::default()));
    }
}
