use axum::extract::State;
use serde_json::Value;

use crate::api::{Payload, QueryParams};
use crate::database::models::{settings, SettingsPayload};
use crate::database::query_builder::QueryBuilder;
use crate::middleware::ApiResult;
use crate::AppState;

use super::{run_mutation, run_select};

/// GET /get_settings?user_id=
pub async fn get_settings(State(state): State<AppState>, params: QueryParams) -> ApiResult<Value> {
    let statement = QueryBuilder::select(settings::TABLE)
        .where_eq(settings::USER_ID, params.int("user_id"))
        .build();
    run_select(&state, statement).await
}

/// POST /set_settings?user_id= - create the settings row for a user
pub async fn set_settings(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<SettingsPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::insert(settings::TABLE)
        .value(settings::USER_ID, params.int("user_id"))
        .values(body.columns())
        .build();
    run_mutation(&state, statement).await
}

/// PUT /update_settings?user_id=
pub async fn update_settings(
    State(state): State<AppState>,
    params: QueryParams,
    Payload(body): Payload<SettingsPayload>,
) -> ApiResult<Value> {
    let statement = QueryBuilder::update(settings::TABLE)
        .values(body.columns())
        .where_eq(settings::USER_ID, params.int("user_id"))
        .build();
    run_mutation(&state, statement).await
}
