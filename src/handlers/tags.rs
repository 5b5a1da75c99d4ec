use axum::extract::State;
use serde_json::Value;

use crate::database::models::tag;
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::run_select;

/// GET /get_tags - every tag; tags are shared between users
pub async fn get_tags(State(state): State<AppState>) -> ApiResult<Value> {
    run_select(&state, QueryBuilder::select(tag::TABLE).build()).await
}
