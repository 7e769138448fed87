use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{FormRequest, MessageResponse};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, StoreResultExt};

const FORM_NOT_FOUND: &str = "Form not found";

pub async fn list_forms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let forms = state.forms.list().api_err(FORM_NOT_FOUND)?;

    Ok::<_, ApiError>(Json(forms))
}

pub async fn create_form(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FormRequest>,
) -> impl IntoResponse {
    let form = state
        .forms
        .create(&req.name, req.fields)
        .api_err(FORM_NOT_FOUND)?;

    Ok::<_, ApiError>(Json(form))
}

pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let form = state.forms.get(&id).api_err(FORM_NOT_FOUND)?;

    Ok::<_, ApiError>(Json(form))
}

pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<FormRequest>,
) -> impl IntoResponse {
    let form = state
        .forms
        .update(&id, &req.name, req.fields)
        .api_err(FORM_NOT_FOUND)?;

    Ok::<_, ApiError>(Json(form))
}

pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.forms.delete(&id).api_err(FORM_NOT_FOUND)?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Form deleted successfully")))
}
