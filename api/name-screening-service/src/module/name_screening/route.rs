use crate::app::AppState;
use crate::module::name_screening::controller;
use axum::Router;
use axum::routing::{get, post};

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(controller::root))
        .route("/v1/screening/health", get(controller::health))
        .route(
            "/process/:user_id/:request_id",
            post(controller::process_request),
        )
        .with_state(state)
}
