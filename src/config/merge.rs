//! Configuration layer merging
//!
//! - Objects: deep-merge by key
//! - Arrays: replace (last wins)
//! - Scalars: override (last wins)

use serde_json::Value;

/// Deep merge two JSON values; `overlay` takes precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (_, overlay) => overlay,
    }
}

/// Merge config layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let result = deep_merge(json!({"placeholder": "{{A}}"}), json!({"placeholder": "{{B}}"}));
        assert_eq!(result["placeholder"], "{{B}}");
    }

    #[test]
    fn test_object_deep_merge() {
        let base = json!({
            "all_in_one": {
                "enabled": false,
                "file_name": "all.xml"
            }
        });
        let overlay = json!({
            "all_in_one": {
                "enabled": true
            }
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["all_in_one"]["enabled"], true);
        assert_eq!(result["all_in_one"]["file_name"], "all.xml");
    }

    #[test]
    fn test_array_replace() {
        let result = deep_merge(json!({"exclude": ["a", "b"]}), json!({"exclude": ["c"]}));
        assert_eq!(result["exclude"], json!(["c"]));
    }

    #[test]
    fn test_merge_layers() {
        let builtin = json!({"sort_output": false, "output_suffix": "-config.xml"});
        let file = json!({"output_suffix": ".xml"});
        let cli = json!({"sort_output": true});

        let result = merge_layers(vec![builtin, file, cli]);

        assert_eq!(result["sort_output"], true);
        assert_eq!(result["output_suffix"], ".xml");
    }
}
