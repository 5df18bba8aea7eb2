// --- File: crates/shayari_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, ShayariError};

// Include the client module
pub mod client;

/// Lets handlers return `ShayariError` directly.
impl IntoResponse for ShayariError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // The mobile app reads a flat `error` string
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}
