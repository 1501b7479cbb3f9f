pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::form::handlers;
use crate::state::AppState;

/// Transport cap for the multipart route. Sits above the adapter's 5 MiB
/// ceiling so an oversized resume reaches the advisory path instead of a bare
/// 413 from the body limiter.
const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/posting", get(handlers::handle_get_posting))
        .route("/api/v1/application", get(handlers::handle_get_application))
        .route(
            "/api/v1/application/fields",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/application/acknowledgments",
            patch(handlers::handle_update_acknowledgment),
        )
        .route("/api/v1/application/save", post(handlers::handle_save))
        .route(
            "/api/v1/application/resume",
            post(handlers::handle_upload_resume),
        )
        .route("/api/v1/application/submit", post(handlers::handle_submit))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}
