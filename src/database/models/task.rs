use serde::Deserialize;
use serde_json::Value;

use super::{flag, scalar, Columns};

pub const TABLE: &str = "Tasks";
pub const ID: &str = "task_id";
pub const USER_ID: &str = "user_id";

/// Body of `add_task` / `update_task`
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPayload {
    #[serde(deserialize_with = "scalar")]
    pub task_name: Value,
    #[serde(deserialize_with = "scalar")]
    pub created_at: Value,
    #[serde(deserialize_with = "scalar")]
    pub task_desc: Value,
    #[serde(deserialize_with = "scalar")]
    pub completed_at: Value,
    #[serde(deserialize_with = "scalar")]
    pub tag_id: Value,
    #[serde(deserialize_with = "flag")]
    pub today_tag: Value,
    #[serde(deserialize_with = "flag")]
    pub repeat_f: Value,
    #[serde(deserialize_with = "scalar")]
    pub repeat_interval: Value,
    #[serde(deserialize_with = "scalar")]
    pub category_id: Value,
}

impl TaskPayload {
    pub fn columns(self) -> Columns {
        vec![
            ("task_name", self.task_name),
            ("created_at", self.created_at),
            ("task_desc", self.task_desc),
            ("completed_at", self.completed_at),
            ("tag_id", self.tag_id),
            ("today_tag", self.today_tag),
            ("repeat_f", self.repeat_f),
            ("repeat_interval", self.repeat_interval),
            ("category_id", self.category_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "task_name": "Write report",
            "created_at": "2024-01-01 09:00:00",
            "task_desc": "quarterly",
            "completed_at": null,
            "tag_id": "2",
            "today_tag": true,
            "repeat_f": 0,
            "repeat_interval": null,
            "category_id": 4
        })
    }

    #[test]
    fn accepts_nulls_strings_and_boolean_flags() {
        let payload: TaskPayload = serde_json::from_value(body()).unwrap();
        assert_eq!(payload.completed_at, Value::Null);
        assert_eq!(payload.tag_id, json!("2"));
        assert_eq!(payload.today_tag, json!(1));
        assert_eq!(payload.repeat_f, json!(0));

        let columns = payload.columns();
        assert_eq!(columns[3], ("completed_at", Value::Null));
        assert_eq!(columns[5], ("today_tag", json!(1)));
    }

    #[test]
    fn nullable_fields_are_still_required() {
        let mut body = body();
        body.as_object_mut().unwrap().remove("tag_id");
        let err = serde_json::from_value::<TaskPayload>(body).unwrap_err();
        assert!(err.to_string().contains("missing field `tag_id`"), "{}", err);
    }

    #[test]
    fn rejects_structured_flag() {
        let mut body = body();
        body["repeat_f"] = json!([1]);
        let err = serde_json::from_value::<TaskPayload>(body).unwrap_err();
        assert!(err.to_string().contains("invalid type: array"), "{}", err);
    }
}
