//! Route handlers. Each data route builds exactly one statement and runs it
//! through the select path or the mutate path.

pub mod categories;
pub mod sessions;
pub mod settings;
pub mod system;
pub mod tags;
pub mod tasks;
pub mod users;

use serde_json::Value;

use crate::database::query_builder::SqlResult;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// Run a SELECT: rows as `data`, or "No records found"
pub(crate) async fn run_select(state: &AppState, statement: SqlResult) -> ApiResult<Value> {
    let rows = state.gateway.fetch_rows(&statement).await?;
    Ok(ApiResponse::rows(rows))
}

/// Run an INSERT/UPDATE/DELETE; the affected-row count is not reported
pub(crate) async fn run_mutation(state: &AppState, statement: SqlResult) -> ApiResult<Value> {
    let affected = state.gateway.execute(&statement).await?;
    tracing::debug!("{} row(s) affected", affected);
    Ok(ApiResponse::updated())
}
