use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use rand::rngs::OsRng;

use crate::auth::StaticCredentials;
use crate::config::ApiConfig;
use crate::database::manager::{DatabaseError, Gateway, Row};
use crate::database::query_builder::SqlResult;
use crate::AppState;

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "admin";

/// Argon2id hash with minimal cost parameters so tests stay fast.
/// Verification reads the parameters back out of the PHC string.
pub fn cheap_hash(password: &str) -> String {
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .expect("hash")
        .to_string()
}

/// What the fake does with the next statement
pub enum Reply {
    Rows(Vec<Row>),
    Affected(u64),
    Fail(String),
}

/// In-memory gateway that records statements and replays queued replies.
/// With nothing queued, selects return no rows and mutations affect none.
#[derive(Default)]
pub struct FakeGateway {
    statements: Mutex<Vec<SqlResult>>,
    replies: Mutex<VecDeque<Reply>>,
    pub connected: bool,
}

impl FakeGateway {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Default::default()
        }
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn statements(&self) -> Vec<SqlResult> {
        self.statements.lock().unwrap().clone()
    }

    fn next(&self, statement: &SqlResult) -> Option<Reply> {
        self.statements.lock().unwrap().push(statement.clone());
        self.replies.lock().unwrap().pop_front()
    }
}

fn driver_error(message: String) -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::Protocol(message))
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn fetch_rows(&self, statement: &SqlResult) -> Result<Vec<Row>, DatabaseError> {
        match self.next(statement) {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Fail(message)) => Err(driver_error(message)),
            Some(Reply::Affected(_)) | None => Ok(Vec::new()),
        }
    }

    async fn execute(&self, statement: &SqlResult) -> Result<u64, DatabaseError> {
        match self.next(statement) {
            Some(Reply::Affected(n)) => Ok(n),
            Some(Reply::Fail(message)) => Err(driver_error(message)),
            Some(Reply::Rows(_)) | None => Ok(0),
        }
    }

    async fn is_connected(&self) -> bool {
        self.connected
    }

    async fn close(&self) {}
}

pub fn test_api_config() -> ApiConfig {
    ApiConfig {
        url_prefix: "api".to_string(),
        version: "v1".to_string(),
        enable_request_logging: false,
    }
}

/// App state over the given fake, accepting `admin:admin`
pub fn test_state(gateway: Arc<FakeGateway>) -> AppState {
    let credentials = StaticCredentials::new(vec![(TEST_USER.to_string(), cheap_hash(TEST_PASSWORD))])
        .expect("valid test credentials");
    AppState::new(gateway, Arc::new(credentials), &test_api_config())
}
