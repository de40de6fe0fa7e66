use std::collections::HashMap;

use gateway_core::upstream::UpstreamOptions;
use serde_json::Value;

/// Maps Ollama's `options` bag onto the upstream call's option set, per
/// spec §4.2.2/§4.2.3. Table-driven so unmapped keys (`top_k`, `num_ctx`)
/// are visibly absent rather than silently caught by a wildcard branch.
pub fn map_options(options: &HashMap<String, Value>) -> UpstreamOptions {
    UpstreamOptions {
        temperature: options.get("temperature").and_then(Value::as_f64).map(|v| v as f32),
        top_p: options.get("top_p").and_then(Value::as_f64).map(|v| v as f32),
        seed: options.get("seed").and_then(Value::as_i64),
        max_tokens: options
            .get("num_predict")
            .and_then(Value::as_i64)
            .filter(|v| *v >= 0)
            .map(|v| v as u32),
        stop: options.get("stop").and_then(|v| match v {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }),
        frequency_penalty: options.get("frequency_penalty").and_then(Value::as_f64).map(|v| v as f32),
        presence_penalty: options.get("presence_penalty").and_then(Value::as_f64).map(|v| v as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_known_keys() {
        let mut options = HashMap::new();
        options.insert("temperature".to_string(), json!(0.7));
        options.insert("top_p".to_string(), json!(0.9));
        options.insert("seed".to_string(), json!(42));
        options.insert("num_predict".to_string(), json!(256));
        options.insert("stop".to_string(), json!(["\n\n"]));

        let mapped = map_options(&options);
        assert_eq!(mapped.temperature, Some(0.7));
        assert_eq!(mapped.top_p, Some(0.9));
        assert_eq!(mapped.seed, Some(42));
        assert_eq!(mapped.max_tokens, Some(256));
        assert_eq!(mapped.stop, Some(vec!["\n\n".to_string()]));
    }

    #[test]
    fn drops_unmapped_keys() {
        let mut options = HashMap::new();
        options.insert("top_k".to_string(), json!(40));
        options.insert("num_ctx".to_string(), json!(4096));

        let mapped = map_options(&options);
        assert_eq!(mapped.max_tokens, None);
        assert_eq!(mapped.temperature, None);
    }

    #[test]
    fn absent_keys_stay_none() {
        let mapped = map_options(&HashMap::new());
        assert_eq!(mapped.temperature, None);
        assert_eq!(mapped.stop, None);
    }
}
