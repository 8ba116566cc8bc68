use super::crud;
use super::error::AppError;
use super::schema::{HealthResponse, ProcessResponse, ScreeningRequestBody};
use crate::app::AppState;
use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use tracing::{error, info};

pub async fn root() -> &'static str {
    "Backend is working fine."
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            watchlist_path: state.store.watchlist_path().display().to_string(),
        }),
    )
}

pub async fn process_request(
    State(state): State<AppState>,
    Path((user_id, request_id)): Path<(String, String)>,
    body: Option<Json<ScreeningRequestBody>>,
) -> impl IntoResponse {
    let body = body.map(|Json(b)| b);
    let log_prefix = body
        .as_ref()
        .and_then(|b| b.request_id.clone())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| request_id.clone());

    match crud::process_request(&state, &user_id, &request_id, &log_prefix, body).await {
        Ok(outcome) => {
            info!(
                request_id = %log_prefix,
                reprocessed = outcome.reprocessed,
                "screening request served"
            );
            (
                axum::http::StatusCode::OK,
                Json(ProcessResponse {
                    success: true,
                    output_path: Some(outcome.output_dir.display().to_string()),
                    output: outcome.consolidated,
                    error: None,
                    error_code: None,
                }),
            )
        }
        Err(AppError {
            status,
            code,
            message,
        }) => {
            error!(request_id = %log_prefix, error_code = code, reason = %message, "screening request rejected");
            (
                status,
                Json(ProcessResponse {
                    success: false,
                    output_path: None,
                    output: None,
                    error: Some(message),
                    error_code: Some(code.to_string()),
                }),
            )
        }
    }
}
