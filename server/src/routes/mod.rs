//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the pins API, the editor auth endpoints, and a health
//! probe under one Axum router. When `STATIC_DIR` is configured, the viewer
//! host page and its wasm bundle are served from it as the fallback.

pub mod auth;
pub mod pins;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/api/pins", get(pins::list_pins))
        .route("/api/place", post(pins::place_pin))
        .route("/api/auth", get(auth::status).post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

/// JSON error body shared by every API route: `{"error": message}`.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
