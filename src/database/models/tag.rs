// Tags are global and read-only through the API
pub const TABLE: &str = "Tags";
