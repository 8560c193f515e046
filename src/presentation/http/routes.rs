use super::{
    handlers::{health, submit},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use crate::domain::submission::entity::MAX_ATTACHMENT_BYTES;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

/// Headroom above the attachment cap so the text fields around a maximum-size
/// file still fit in one request body. The precise 10 MiB verdict on the file
/// itself is made against the decoded part, not this outer limit.
const BODY_LIMIT_BYTES: usize = MAX_ATTACHMENT_BYTES + 2 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let public_dir = PathBuf::from(&state.config.public_dir);
    let frontend =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/upload", post(submit::submit_form))
        // Every other path serves the front-end entry document
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
