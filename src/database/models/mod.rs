//! Table layouts and write payloads.
//!
//! Every payload field is required: a missing key is an error, while any
//! scalar value (including `null`) is passed to the database as given and
//! left to the schema to accept or refuse.

pub mod category;
pub mod session;
pub mod settings;
pub mod tag;
pub mod task;
pub mod user;

pub use category::CategoryPayload;
pub use session::SessionPayload;
pub use settings::SettingsPayload;
pub use task::TaskPayload;
pub use user::UserPayload;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Column/value pairs in insert order
pub type Columns = Vec<(&'static str, Value)>;

/// Required field holding any JSON scalar (string, number, boolean or
/// null). Values are bound as given; arrays and objects are rejected.
pub fn scalar<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ (Value::Array(_) | Value::Object(_)) => Err(de::Error::custom(format!(
            "invalid type: {}, expected a string, number, boolean or null",
            json_type(&value)
        ))),
        value => Ok(value),
    }
}

/// 0/1 flag column; booleans become 0/1, other scalars pass through
pub fn flag<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match scalar(deserializer)? {
        Value::Bool(b) => Ok(Value::from(i64::from(b))),
        other => Ok(other),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "scalar")]
        value: Value,
        #[serde(deserialize_with = "flag")]
        enabled: Value,
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        for value in [json!("0"), json!(7), json!(1.5), json!(null), json!("text")] {
            let parsed: Sample = serde_json::from_value(json!({"value": value, "enabled": 0})).unwrap();
            assert_eq!(parsed.value, value);
        }
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = serde_json::from_value::<Sample>(json!({"value": [1, 2], "enabled": 0})).unwrap_err();
        assert!(err.to_string().contains("invalid type: array"), "{}", err);

        let err = serde_json::from_value::<Sample>(json!({"value": {"a": 1}, "enabled": 0})).unwrap_err();
        assert!(err.to_string().contains("invalid type: object"), "{}", err);
    }

    #[test]
    fn missing_key_is_an_error_even_though_null_is_allowed() {
        let err = serde_json::from_value::<Sample>(json!({"enabled": 0})).unwrap_err();
        assert!(err.to_string().contains("missing field `value`"), "{}", err);
    }

    #[test]
    fn flags_map_booleans_to_integers() {
        let parsed: Sample = serde_json::from_value(json!({"value": 1, "enabled": true})).unwrap();
        assert_eq!(parsed.enabled, json!(1));
        let parsed: Sample = serde_json::from_value(json!({"value": 1, "enabled": "1"})).unwrap();
        assert_eq!(parsed.enabled, json!("1"));
    }
}
