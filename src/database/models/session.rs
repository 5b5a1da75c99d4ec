use serde::Deserialize;
use serde_json::Value;

use super::{scalar, Columns};

pub const TABLE: &str = "Sessions";
pub const USER_ID: &str = "user_id";
pub const LAST_LOG: &str = "last_log";

/// Body of `add_session`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionPayload {
    #[serde(deserialize_with = "scalar")]
    pub device: Value,
    #[serde(deserialize_with = "scalar")]
    pub last_log: Value,
    #[serde(deserialize_with = "scalar")]
    pub ip_address: Value,
}

impl SessionPayload {
    pub fn columns(self) -> Columns {
        vec![
            ("device", self.device),
            (LAST_LOG, self.last_log),
            ("ip_address", self.ip_address),
        ]
    }
}
