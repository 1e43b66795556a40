//! Lenient decoding of advisory reply text.
//!
//! The service returns JSON wrapped, more often than not, in markdown code
//! fences. These helpers strip the fences, parse what remains, and read
//! individual fields with explicit defaults so no call site ever trusts the
//! response shape.

use serde_json::Value;

/// Strip markdown code fences (```json ... ```) from reply text.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse reply text as JSON after fence-stripping. Unparseable text yields
/// `Value::Null`, which the field readers below treat as fully absent.
pub fn parse_reply(text: &str) -> Value {
    serde_json::from_str(&strip_code_fences(text)).unwrap_or(Value::Null)
}

/// Read a string field, falling back to `default` when absent or non-string.
pub fn str_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Read a numeric field, falling back to `default` when absent, non-numeric,
/// or non-finite.
pub fn f64_or(value: &Value, key: &str, default: f64) -> f64 {
    value
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

/// Read a string-array field; absent or malformed entries are dropped.
pub fn str_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a nested object field; absent yields `Value::Null`.
pub fn object_or_null(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}

/// Deserialize a nested field into `T`, falling back to `T::default()` when
/// the field is absent or does not match the expected shape.
pub fn field_or_default<T>(value: &Value, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    value
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_reply_garbage_is_null() {
        assert_eq!(parse_reply("not json at all"), Value::Null);
        assert_eq!(parse_reply(""), Value::Null);
    }

    #[test]
    fn test_field_readers_default_on_null() {
        let v = Value::Null;
        assert_eq!(str_or(&v, "x", "fallback"), "fallback");
        assert_eq!(f64_or(&v, "x", 7.0), 7.0);
        assert!(str_list(&v, "x").is_empty());
    }

    #[test]
    fn test_field_readers_read_present_values() {
        let v = json!({"s": "hi", "n": 2.5, "l": ["a", "b", 3]});
        assert_eq!(str_or(&v, "s", "x"), "hi");
        assert_eq!(f64_or(&v, "n", 0.0), 2.5);
        // non-string entries are dropped, not errored
        assert_eq!(str_list(&v, "l"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_field_readers_default_on_wrong_type() {
        let v = json!({"s": 1, "n": "two"});
        assert_eq!(str_or(&v, "s", "d"), "d");
        assert_eq!(f64_or(&v, "n", 9.0), 9.0);
    }
}
