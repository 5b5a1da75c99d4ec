use axum::extract::State;
use serde_json::Value;

use crate::api::{Payload, QueryParams};
use crate::database::models::{category, CategoryPayload};
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::{run_mutation, run_select};

/// GET /get_categories?user_id=
pub async fn get_categories(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(category::TABLE)
        .where_eq(category::USER_ID, params.int("user_id"))
        .build();
    run_select(&state, statement).await
}

/// POST /add_category?user_id=
pub async fn add_category(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<CategoryPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::insert(category::TABLE)
        .value(category::USER_ID, params.int("user_id"))
        .values(body.columns())
        .build();
    run_mutation(&state, statement).await
}

/// PUT /update_category?user_id=&category_id=
pub async fn update_category(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<CategoryPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::update(category::TABLE)
        .values(body.columns())
        .where_eq(category::USER_ID, params.int("user_id"))
        .where_eq(category::ID, params.int("category_id"))
        .build();
    run_mutation(&state, statement).await
}

/// DELETE /delete_category?user_id=&category_id=
pub async fn delete_category(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::delete(category::TABLE)
        .where_eq(category::USER_ID, params.int("user_id"))
        .where_eq(category::ID, params.int("category_id"))
        .build();
    run_mutation(&state, statement).await
}
