use axum::extract::State;
use serde_json::Value;

use crate::api::{Payload, QueryParams};
use crate::database::models::{session, SessionPayload};
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::{run_mutation, run_select};

/// GET /get_sessions?user_id=
pub async fn get_sessions(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(session::TABLE)
        .where_eq(session::USER_ID, params.int("user_id"))
        .build();
    run_select(&state, statement).await
}

/// GET /get_last_session?user_id= - most recent session by `last_log`
pub async fn get_last_session(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(session::TABLE)
        .where_eq(session::USER_ID, params.int("user_id"))
        .order_by_desc(session::LAST_LOG)
        .limit(1)
        .build();
    run_select(&state, statement).await
}

/// POST /add_session?user_id=
pub async fn add_session(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<SessionPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::insert(session::TABLE)
        .value(session::USER_ID, params.int("user_id"))
        .values(body.columns())
        .build();
    run_mutation(&state, statement).await
}
