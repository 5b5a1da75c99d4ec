use serde::Deserialize;
use serde_json::Value;

use super::{scalar, Columns};

pub const TABLE: &str = "Users";
pub const ID: &str = "user_id";
pub const EMAIL: &str = "email";

/// Body of `add_user` / `update_user`
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    #[serde(deserialize_with = "scalar")]
    pub email: Value,
    #[serde(deserialize_with = "scalar")]
    pub password: Value,
    #[serde(deserialize_with = "scalar")]
    pub created_at: Value,
    #[serde(deserialize_with = "scalar")]
    pub total_session: Value,
    #[serde(deserialize_with = "scalar")]
    pub total_tasks: Value,
    #[serde(deserialize_with = "scalar")]
    pub total_categories: Value,
}

impl UserPayload {
    /// The password is stored as given; the column is `passw`
    pub fn columns(self) -> Columns {
        vec![
            (EMAIL, self.email),
            ("passw", self.password),
            ("created_at", self.created_at),
            ("total_session", self.total_session),
            ("total_tasks", self.total_tasks),
            ("total_categories", self.total_categories),
        ]
    }
}
