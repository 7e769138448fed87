use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::server::AppState;
use crate::server::dto::{CreateStatusCheckRequest, MessageResponse};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, StoreResultExt};
use crate::types::StatusCheck;

const STATUS_CHECK_LIST_LIMIT: usize = 1000;

pub async fn root() -> impl IntoResponse {
    Json(MessageResponse::new("Hello World"))
}

pub async fn create_status_check(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateStatusCheckRequest>,
) -> impl IntoResponse {
    let check = StatusCheck {
        id: Uuid::new_v4().to_string(),
        client_name: req.client_name,
        timestamp: Utc::now(),
    };

    state
        .store
        .insert_status_check(&check)
        .api_err("Status check not found")?;

    Ok::<_, ApiError>(Json(check))
}

pub async fn list_status_checks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let checks = state
        .store
        .list_status_checks(STATUS_CHECK_LIST_LIMIT)
        .api_err("Status check not found")?;

    Ok::<_, ApiError>(Json(checks))
}
