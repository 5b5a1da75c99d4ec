use serde::Deserialize;
use serde_json::Value;

use super::{scalar, Columns};

pub const TABLE: &str = "Settings";
pub const USER_ID: &str = "user_id";

/// Body of `set_settings` / `update_settings`
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsPayload {
    #[serde(deserialize_with = "scalar")]
    pub first_day_week: Value,
    #[serde(deserialize_with = "scalar")]
    pub lang: Value,
    #[serde(deserialize_with = "scalar")]
    pub theme: Value,
    #[serde(deserialize_with = "scalar")]
    pub sort_by: Value,
}

impl SettingsPayload {
    pub fn columns(self) -> Columns {
        vec![
            ("first_day_week", self.first_day_week),
            ("lang", self.lang),
            ("theme", self.theme),
            ("sort_by", self.sort_by),
        ]
    }
}
