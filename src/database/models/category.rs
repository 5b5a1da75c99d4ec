use serde::Deserialize;
use serde_json::Value;

use super::{scalar, Columns};

pub const TABLE: &str = "Categories";
pub const ID: &str = "category_id";
pub const USER_ID: &str = "user_id";

/// Body of `add_category` / `update_category`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    #[serde(deserialize_with = "scalar")]
    pub category: Value,
    #[serde(deserialize_with = "scalar")]
    pub created_at: Value,
    #[serde(deserialize_with = "scalar")]
    pub total_tasks: Value,
    #[serde(deserialize_with = "scalar")]
    pub colour: Value,
    #[serde(deserialize_with = "scalar")]
    pub path_to_cover: Value,
    #[serde(deserialize_with = "scalar")]
    pub emoji: Value,
}

impl CategoryPayload {
    pub fn columns(self) -> Columns {
        vec![
            ("category", self.category),
            ("created_at", self.created_at),
            ("total_tasks", self.total_tasks),
            ("colour", self.colour),
            ("path_to_cover", self.path_to_cover),
            ("emoji", self.emoji),
        ]
    }
}
