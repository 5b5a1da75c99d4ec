use axum::extract::State;
use serde_json::Value;

use crate::api::{Payload, QueryParams};
use crate::database::models::{user, UserPayload};
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::{run_mutation, run_select};

/// GET /get_user?email= - look a user up by email
pub async fn get_user(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(user::TABLE)
        .where_eq(user::EMAIL, params.text("email"))
        .build();
    run_select(&state, statement).await
}

/// GET /get_user_bio?user_id= - look a user up by id
pub async fn get_user_bio(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(user::TABLE)
        .where_eq(user::ID, params.int("user_id"))
        .build();
    run_select(&state, statement).await
}

/// POST /add_user
pub async fn add_user(State(state): State<AppState>, Payload(body): Payload<UserPayload>) -> ApiResult<Value> {
    let statement = QueryBuilder::insert(user::TABLE).values(body.columns()).build();
    run_mutation(&state, statement).await
}

/// PUT /update_user?user_id=
pub async fn update_user(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<UserPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::update(user::TABLE)
        .values(body.columns())
        .where_eq(user::ID, params.int("user_id"))
        .build();
    run_mutation(&state, statement).await
}
