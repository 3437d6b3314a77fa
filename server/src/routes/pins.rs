//! Pin routes: list and place.

#[cfg(test)]
#[path = "pins_test.rs"]
mod tests;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use tracing::{error, info};

use super::auth::AuthEditor;
use super::error_response;
use crate::services::pins::{self as pin_svc, PinError};
use crate::state::AppState;

pub(crate) fn pin_error_to_status(err: &PinError) -> StatusCode {
    match err {
        PinError::NotFound(_) => StatusCode::NOT_FOUND,
        PinError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
        PinError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn pin_error_response(err: PinError) -> Response {
    let status = pin_error_to_status(&err);
    if status.is_server_error() {
        error!(error = %err, "pin request failed");
        return error_response(status, "pin storage unavailable");
    }
    error_response(status, err.to_string())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    refresh: Option<String>,
}

impl ListQuery {
    fn bust_cache(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }
}

/// `GET /api/pins[?refresh=true]`: all pins in draw order.
pub async fn list_pins(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match pin_svc::list_pins(&state, query.bust_cache()).await {
        Ok(pins) => Json(pins.as_slice()).into_response(),
        Err(e) => pin_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceBody {
    #[serde(alias = "pageId")]
    pub pin_id: String,
    pub x: f64,
    pub y: f64,
}

/// `POST /api/place`: store a pin's normalized position. Editors only.
pub async fn place_pin(
    State(state): State<AppState>,
    editor: AuthEditor,
    body: Result<Json<PlaceBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "missing pin_id, x, or y");
    };
    if body.pin_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "missing pin_id, x, or y");
    }

    match pin_svc::place_pin(&state, &body.pin_id, body.x, body.y).await {
        Ok(()) => {
            info!(pin_id = %body.pin_id, author = %editor.name, "placement stored");
            Json(serde_json::json!({ "ok": true })).into_response()
        }
        Err(e) => pin_error_response(e),
    }
}
