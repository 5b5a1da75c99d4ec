use axum::extract::State;
use serde_json::Value;

use crate::api::{Payload, QueryParams};
use crate::database::models::{task, TaskPayload};
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::{run_mutation, run_select};

/// GET /get_tasks?user_id=
pub async fn get_tasks(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(task::TABLE)
        .where_eq(task::USER_ID, params.int("user_id"))
        .build();
    run_select(&state, statement).await
}

/// POST /add_task?user_id=
pub async fn add_task(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<TaskPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::insert(task::TABLE)
        .value(task::USER_ID, params.int("user_id"))
        .values(body.columns())
        .build();
    run_mutation(&state, statement).await
}

/// PUT /update_task?user_id=&task_id=
pub async fn update_task(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<TaskPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::update(task::TABLE)
        .values(body.columns())
        .where_eq(task::USER_ID, params.int("user_id"))
        .where_eq(task::ID, params.int("task_id"))
        .build();
    run_mutation(&state, statement).await
}

/// DELETE /delete_task?user_id=&task_id=
pub async fn delete_task(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::delete(task::TABLE)
        .where_eq(task::USER_ID, params.int("user_id"))
        .where_eq(task::ID, params.int("task_id"))
        .build();
    run_mutation(&state, statement).await
}
