use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::run_entries::use_cases::manage_entries::command::EntryInput;
use crate::modules::run_entries::use_cases::manage_entries::handler::EntryServiceError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn error_body(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
        }),
    )
        .into_response()
}

fn error_response(error: EntryServiceError) -> Response {
    match error {
        EntryServiceError::Validation(reason) => {
            error_body(StatusCode::BAD_REQUEST, reason.to_string())
        }
        EntryServiceError::NotFound(_) => error_body(StatusCode::NOT_FOUND, "Entry not found"),
        EntryServiceError::Store(store_error) => {
            tracing::error!(error = %store_error, "entry store failure");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    error_body(
        StatusCode::BAD_REQUEST,
        format!("invalid request body: {}", rejection.body_text()),
    )
}

pub async fn list(State(state): State<AppState>) -> Response {
    match state.entries.list().await {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EntryInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    match state.entries.create(input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EntryInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    match state.entries.update(&id, input).await {
        Ok(entry) => Json(entry).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.entries.delete(&id).await {
        Ok(()) => Json(DeleteResponse { success: true }).into_response(),
        Err(error) => error_response(error),
    }
}
